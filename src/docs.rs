// src/docs.rs

use utoipa::OpenApi;

use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Leads ---
        handlers::leads::list_leads,
        handlers::leads::create_lead,
        handlers::leads::get_lead,
        handlers::leads::update_lead,
        handlers::leads::delete_lead,
        handlers::leads::set_lead_status,
        handlers::leads::move_lead_stage,

        // --- Pipeline ---
        handlers::pipeline::get_pipeline_board,
        handlers::pipeline::get_pipeline_summary,
        handlers::pipeline::get_stage,

        // --- Dashboard ---
        handlers::dashboard::get_stats,

        // --- Sync ---
        handlers::sync::sync_leads,
    ),
    components(
        schemas(
            models::lead::Lead,
            models::lead::LeadStatus,
            models::lead::PipelineStage,
            models::lead::ScoreTier,
            models::lead::NewLead,
            models::lead::LeadPatch,
            models::dashboard::StatusCounts,
            models::dashboard::StageCount,
            models::dashboard::DashboardStats,
            models::dashboard::PipelineSummary,
            models::dashboard::StageColumn,
            models::sync::SyncReport,
            handlers::leads::SetStatusPayload,
            handlers::leads::MoveStagePayload,
        )
    ),
    tags(
        (name = "Leads", description = "Cadastro e transições de leads"),
        (name = "Pipeline", description = "Quadro do funil de vendas"),
        (name = "Dashboard", description = "Indicadores"),
        (name = "Sync", description = "Importação da planilha")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_route_is_documented() {
        let doc = ApiDoc::openapi();
        for path in [
            "/api/leads",
            "/api/leads/{id}",
            "/api/leads/{id}/status",
            "/api/leads/{id}/stage",
            "/api/pipeline",
            "/api/pipeline/summary",
            "/api/pipeline/stages/{stage}",
            "/api/dashboard/stats",
            "/api/sync",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
    }
}
