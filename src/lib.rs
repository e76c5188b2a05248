//! Backend de acompanhamento de leads: importa da planilha, guarda em memória
//! e expõe o funil de vendas por uma API JSON.

pub mod common;
pub mod config;
pub mod db;
pub mod docs;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod sheets;

use axum::{
    routing::{get, post, put},
    Router,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{config::AppState, docs::ApiDoc};

pub fn create_router(app_state: AppState) -> Router {
    let lead_routes = Router::new()
        .route("/"
               ,get(handlers::leads::list_leads)
               .post(handlers::leads::create_lead)
        )
        .route("/{id}"
               ,get(handlers::leads::get_lead)
               .patch(handlers::leads::update_lead)
               .delete(handlers::leads::delete_lead)
        )
        .route("/{id}/status", put(handlers::leads::set_lead_status))
        .route("/{id}/stage", put(handlers::leads::move_lead_stage));

    let pipeline_routes = Router::new()
        .route("/", get(handlers::pipeline::get_pipeline_board))
        .route("/summary", get(handlers::pipeline::get_pipeline_summary))
        .route("/stages/{stage}", get(handlers::pipeline::get_stage));

    Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .route("/api/dashboard/stats", get(handlers::dashboard::get_stats))
        .route("/api/sync", post(handlers::sync::sync_leads))
        .nest("/api/leads", lead_routes)
        .nest("/api/pipeline", pipeline_routes)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .with_state(app_state)
}
