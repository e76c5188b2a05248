// src/handlers/leads.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::{
    common::error::ApiError,
    config::AppState,
    db::StatusOutcome,
    middleware::i18n::Locale,
    models::lead::{Lead, LeadFilter, LeadPatch, LeadStatus, NewLead, PipelineStage},
};

// =============================================================================
//  ÁREA 1: CADASTRO
// =============================================================================

// GET /api/leads
#[utoipa::path(
    get,
    path = "/api/leads",
    tag = "Leads",
    params(LeadFilter),
    responses(
        (status = 200, description = "Leads filtrados por texto, status e/ou faixa de score", body = Vec<Lead>)
    )
)]
pub async fn list_leads(
    State(app_state): State<AppState>,
    Query(filter): Query<LeadFilter>,
) -> impl IntoResponse {
    let leads = app_state.lead_service.list(&filter);
    (StatusCode::OK, Json(leads))
}

// POST /api/leads
#[utoipa::path(
    post,
    path = "/api/leads",
    tag = "Leads",
    request_body = NewLead,
    responses(
        (status = 201, description = "Lead criado", body = Lead),
        (status = 400, description = "Dados inválidos"),
        (status = 422, description = "Lead não pode nascer descartado")
    )
)]
pub async fn create_lead(
    State(app_state): State<AppState>,
    locale: Locale,
    Json(payload): Json<NewLead>,
) -> Result<impl IntoResponse, ApiError> {

    let lead = app_state.lead_service
        .create(payload)
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(lead)))
}

// GET /api/leads/{id}
#[utoipa::path(
    get,
    path = "/api/leads/{id}",
    tag = "Leads",
    responses(
        (status = 200, description = "Lead encontrado", body = Lead),
        (status = 404, description = "Lead não encontrado")
    ),
    params(("id" = String, Path, description = "ID do Lead"))
)]
pub async fn get_lead(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {

    let lead = app_state.lead_service
        .get(&id)
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(lead)))
}

// PATCH /api/leads/{id}
#[utoipa::path(
    patch,
    path = "/api/leads/{id}",
    tag = "Leads",
    request_body = LeadPatch,
    responses(
        (status = 200, description = "Lead atualizado", body = Lead),
        (status = 400, description = "Dados inválidos"),
        (status = 404, description = "Lead não encontrado")
    ),
    params(("id" = String, Path, description = "ID do Lead"))
)]
pub async fn update_lead(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<String>,
    Json(payload): Json<LeadPatch>,
) -> Result<impl IntoResponse, ApiError> {

    let lead = app_state.lead_service
        .update(&id, payload)
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(lead)))
}

// DELETE /api/leads/{id}
#[utoipa::path(
    delete,
    path = "/api/leads/{id}",
    tag = "Leads",
    responses(
        (status = 204, description = "Lead removido"),
        (status = 404, description = "Lead não encontrado")
    ),
    params(("id" = String, Path, description = "ID do Lead"))
)]
pub async fn delete_lead(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {

    app_state.lead_service
        .remove(&id)
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
//  ÁREA 2: TRANSIÇÕES (STATUS E ETAPA)
// =============================================================================

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SetStatusPayload {
    #[schema(example = "potencial")]
    pub status: LeadStatus,
}

// PUT /api/leads/{id}/status
#[utoipa::path(
    put,
    path = "/api/leads/{id}/status",
    tag = "Leads",
    request_body = SetStatusPayload,
    responses(
        (status = 200, description = "Status atualizado", body = Lead),
        (status = 204, description = "Lead descartado (removido da lista)"),
        (status = 404, description = "Lead não encontrado")
    ),
    params(("id" = String, Path, description = "ID do Lead"))
)]
pub async fn set_lead_status(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<String>,
    Json(payload): Json<SetStatusPayload>,
) -> Result<Response, ApiError> {

    let outcome = app_state.lead_service
        .set_status(&id, payload.status)
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    let response = match outcome {
        StatusOutcome::Updated(lead) => (StatusCode::OK, Json(lead)).into_response(),
        StatusOutcome::Discarded(_) | StatusOutcome::NotFound => StatusCode::NO_CONTENT.into_response(),
    };
    Ok(response)
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MoveStagePayload {
    #[schema(example = "perdido")]
    pub stage: PipelineStage,

    #[schema(example = "Preço muito alto")]
    pub loss_reason: Option<String>,
}

// PUT /api/leads/{id}/stage
#[utoipa::path(
    put,
    path = "/api/leads/{id}/stage",
    tag = "Leads",
    request_body = MoveStagePayload,
    responses(
        (status = 200, description = "Lead movido para a nova etapa", body = Lead),
        (status = 404, description = "Lead não encontrado"),
        (status = 422, description = "Perdido exige observação preenchida")
    ),
    params(("id" = String, Path, description = "ID do Lead"))
)]
pub async fn move_lead_stage(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<String>,
    Json(payload): Json<MoveStagePayload>,
) -> Result<impl IntoResponse, ApiError> {

    let lead = app_state.lead_service
        .move_stage(&id, payload.stage, payload.loss_reason)
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(lead)))
}
