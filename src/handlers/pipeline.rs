// src/handlers/pipeline.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    config::AppState,
    models::{
        dashboard::{PipelineSummary, StageColumn},
        lead::PipelineStage,
    },
};

// GET /api/pipeline
#[utoipa::path(
    get,
    path = "/api/pipeline",
    tag = "Pipeline",
    responses(
        (status = 200, description = "Uma coluna por etapa, na ordem do funil", body = Vec<StageColumn>)
    )
)]
pub async fn get_pipeline_board(State(app_state): State<AppState>) -> impl IntoResponse {
    (StatusCode::OK, Json(app_state.dashboard_service.pipeline_board()))
}

// GET /api/pipeline/summary
#[utoipa::path(
    get,
    path = "/api/pipeline/summary",
    tag = "Pipeline",
    responses(
        (status = 200, description = "Total em negociação, fechado e taxa de conversão", body = PipelineSummary)
    )
)]
pub async fn get_pipeline_summary(State(app_state): State<AppState>) -> impl IntoResponse {
    (StatusCode::OK, Json(app_state.dashboard_service.pipeline_summary()))
}

// GET /api/pipeline/stages/{stage}
#[utoipa::path(
    get,
    path = "/api/pipeline/stages/{stage}",
    tag = "Pipeline",
    responses(
        (status = 200, description = "Leads e valor total de uma etapa", body = StageColumn),
        (status = 400, description = "Etapa desconhecida")
    ),
    params(("stage" = PipelineStage, Path, description = "Etapa do funil"))
)]
pub async fn get_stage(
    State(app_state): State<AppState>,
    Path(stage): Path<PipelineStage>,
) -> impl IntoResponse {
    (StatusCode::OK, Json(app_state.dashboard_service.stage(stage)))
}
