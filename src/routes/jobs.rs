use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::dto::job_dto::{JobListQuery, JobResponse};
use crate::error::{Error, Result};
use crate::services::job_service;
use crate::utils::time;
use crate::AppState;

pub async fn list_jobs(
    State(state): State<AppState>,
    Query(query): Query<JobListQuery>,
) -> Result<Json<Vec<JobResponse>>> {
    let now = time::now_ms();
    let jobs = state.job_service.list_active(now).await?;
    let jobs = job_service::filter_jobs(jobs, query.category.as_deref(), query.search.as_deref());
    let body = jobs
        .into_iter()
        .map(|job| JobResponse::from_post(job, now))
        .collect();
    Ok(Json(body))
}

pub async fn get_job(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<JobResponse>> {
    let job = state
        .job_service
        .get(&id)
        .await?
        .ok_or_else(|| Error::NotFound(format!("Job post {} not found", id)))?;
    Ok(Json(JobResponse::from_post(job, time::now_ms())))
}

/// Detail-view counter. Safe to call from any number of concurrent
/// viewers; the increment is atomic in the database.
pub async fn record_view(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    state.job_service.increment_views(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
