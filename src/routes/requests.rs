use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::dto::request_dto::{PortalQuery, SubmitRequestPayload, UpdateStatusPayload};
use crate::error::{Error, Result};
use crate::models::contact_request::ContactRequest;
use crate::services::request_service::NewContactRequest;
use crate::utils::{phone, time};
use crate::AppState;

pub async fn submit_request(
    State(state): State<AppState>,
    Json(payload): Json<SubmitRequestPayload>,
) -> Result<(StatusCode, Json<ContactRequest>)> {
    payload.validate()?;
    if !phone::looks_like_phone(&payload.employer_phone) {
        return Err(Error::BadRequest(
            "Please enter a valid phone number".to_string(),
        ));
    }

    let request = state
        .request_service
        .submit(
            NewContactRequest {
                job_id: payload.job_id,
                employer_name: payload.employer_name,
                employer_phone: payload.employer_phone,
            },
            time::now_ms(),
        )
        .await?;
    Ok((StatusCode::CREATED, Json(request)))
}

/// Seeker portal. The phone in the query string is the self-asserted
/// identity the original kept in local storage; it is not verified.
pub async fn list_seeker_requests(
    State(state): State<AppState>,
    Query(query): Query<PortalQuery>,
) -> Result<Json<Vec<ContactRequest>>> {
    require_phone(&query.phone)?;
    let requests = state.request_service.list_for_seeker(&query.phone).await?;
    Ok(Json(requests))
}

pub async fn list_employer_requests(
    State(state): State<AppState>,
    Query(query): Query<PortalQuery>,
) -> Result<Json<Vec<ContactRequest>>> {
    require_phone(&query.phone)?;
    let requests = state
        .request_service
        .list_for_employer(&query.phone)
        .await?;
    Ok(Json(requests))
}

pub async fn update_request_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateStatusPayload>,
) -> Result<Json<ContactRequest>> {
    let request = state
        .request_service
        .update_status(&id, payload.status, time::now_ms())
        .await?;
    Ok(Json(request))
}

fn require_phone(raw: &str) -> Result<()> {
    if !phone::looks_like_phone(raw) {
        return Err(Error::BadRequest(
            "Please enter a valid phone number".to_string(),
        ));
    }
    Ok(())
}
