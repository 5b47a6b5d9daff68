use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::dto::wizard_dto::{AnswerPayload, WizardStateResponse};
use crate::error::Result;
use crate::AppState;

pub async fn start_wizard(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<WizardStateResponse>)> {
    let (id, wizard) = state.wizard_service.start();
    Ok((
        StatusCode::CREATED,
        Json(WizardStateResponse::from_state(id, wizard)),
    ))
}

pub async fn get_wizard(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<WizardStateResponse>> {
    let wizard = state.wizard_service.get(id)?;
    Ok(Json(WizardStateResponse::from_state(id, wizard)))
}

pub async fn answer(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<AnswerPayload>,
) -> Result<Json<WizardStateResponse>> {
    let wizard = state.wizard_service.answer(id, payload.value).await?;
    Ok(Json(WizardStateResponse::from_state(id, wizard)))
}

pub async fn skip(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<WizardStateResponse>> {
    let wizard = state.wizard_service.skip(id).await?;
    Ok(Json(WizardStateResponse::from_state(id, wizard)))
}

pub async fn retry(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<WizardStateResponse>> {
    let wizard = state.wizard_service.retry(id).await?;
    Ok(Json(WizardStateResponse::from_state(id, wizard)))
}
