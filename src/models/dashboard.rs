// src/models/dashboard.rs

use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;

use crate::models::lead::{Lead, PipelineStage};

// 1. Contadores por status (os cards do topo do dashboard)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatusCounts {
    pub total: usize,
    pub novo: usize,
    pub potencial: usize,
    pub descartado: usize,
}

// 2. Quantidade de leads em cada etapa
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StageCount {
    pub stage: PipelineStage,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub status: StatusCounts,
    pub stages: Vec<StageCount>,
    pub active_leads: usize,
    #[schema(example = "75000")]
    pub active_value: Decimal,
}

// 3. Os cards do topo do pipeline
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PipelineSummary {
    /// Soma de `value` dos leads ativos ainda fora de fechado/perdido
    #[schema(example = "75000")]
    pub negotiation_value: Decimal,
    /// Soma de `proposalValue` na etapa fechado
    #[schema(example = "80000")]
    pub closed_value: Decimal,
    /// Percentual arredondado: fechados / ativos
    #[schema(example = 20)]
    pub conversion_rate: u32,
    #[schema(example = "155000")]
    pub active_value: Decimal,
}

// 4. Uma coluna do quadro do pipeline
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StageColumn {
    pub stage: PipelineStage,
    #[schema(example = "Em Negociação")]
    pub title: &'static str,
    #[schema(example = "Negociando termos e valores")]
    pub description: &'static str,
    pub count: usize,
    #[schema(example = "35000")]
    pub total_value: Decimal,
    pub leads: Vec<Lead>,
}
