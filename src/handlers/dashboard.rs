// src/handlers/dashboard.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::{config::AppState, models::dashboard::DashboardStats};

// GET /api/dashboard/stats
#[utoipa::path(
    get,
    path = "/api/dashboard/stats",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Contagem por status e por etapa, valor ativo", body = DashboardStats)
    )
)]
pub async fn get_stats(State(app_state): State<AppState>) -> impl IntoResponse {
    (StatusCode::OK, Json(app_state.dashboard_service.stats()))
}
