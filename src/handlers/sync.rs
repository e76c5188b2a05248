// src/handlers/sync.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::{
    common::error::ApiError,
    config::AppState,
    middleware::i18n::Locale,
    models::sync::SyncReport,
};

// POST /api/sync
#[utoipa::path(
    post,
    path = "/api/sync",
    tag = "Sync",
    responses(
        (status = 200, description = "Leads substituídos pelo conteúdo atual da planilha", body = SyncReport),
        (status = 502, description = "Falha ao buscar a planilha; leads atuais mantidos")
    )
)]
pub async fn sync_leads(
    State(app_state): State<AppState>,
    locale: Locale,
) -> Result<impl IntoResponse, ApiError> {

    let report = app_state.sync_service
        .sync()
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(report)))
}
