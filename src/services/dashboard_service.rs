// src/services/dashboard_service.rs

use rust_decimal::Decimal;

use crate::{
    db::LeadStore,
    models::{
        dashboard::{DashboardStats, PipelineSummary, StageColumn, StageCount, StatusCounts},
        lead::{sum_amounts, Lead, LeadStatus, PipelineStage},
    },
};

// =============================================================================
//  VISÕES DERIVADAS (funções puras sobre um snapshot)
// =============================================================================

pub fn status_counts(leads: &[Lead]) -> StatusCounts {
    let count = |status: LeadStatus| leads.iter().filter(|l| l.status == status).count();
    StatusCounts {
        total: leads.len(),
        novo: count(LeadStatus::Novo),
        potencial: count(LeadStatus::Potencial),
        descartado: count(LeadStatus::Descartado),
    }
}

pub fn stage_counts(leads: &[Lead]) -> Vec<StageCount> {
    PipelineStage::ALL
        .iter()
        .map(|&stage| StageCount {
            stage,
            count: leads.iter().filter(|l| l.pipeline_stage == stage).count(),
        })
        .collect()
}

pub fn total_value(leads: &[Lead], stage: PipelineStage) -> Decimal {
    sum_amounts(
        leads
            .iter()
            .filter(|l| l.pipeline_stage == stage)
            .map(|l| l.proposal_value),
    )
}

pub fn active_value(leads: &[Lead]) -> Decimal {
    sum_amounts(
        leads
            .iter()
            .filter(|l| l.is_active())
            .map(|l| l.proposal_value),
    )
}

/// Fechados sobre ativos, em percentual arredondado. Sem ativos, 0.
pub fn conversion_rate(leads: &[Lead]) -> u32 {
    let active = leads.iter().filter(|l| l.is_active()).count();
    if active == 0 {
        return 0;
    }
    let closed = leads
        .iter()
        .filter(|l| l.pipeline_stage == PipelineStage::Fechado)
        .count();
    (closed as f64 / active as f64 * 100.0).round() as u32
}

/// "Total em negociação": soma de `value` dos ativos que ainda não fecharam nem perderam.
pub fn negotiation_value(leads: &[Lead]) -> Decimal {
    sum_amounts(
        leads
            .iter()
            .filter(|l| l.is_active() && !l.pipeline_stage.is_terminal())
            .map(|l| l.value),
    )
}

pub fn stage_column(leads: &[Lead], stage: PipelineStage) -> StageColumn {
    let stage_leads: Vec<Lead> = leads
        .iter()
        .filter(|l| l.pipeline_stage == stage)
        .cloned()
        .collect();

    StageColumn {
        stage,
        title: stage.title(),
        description: stage.description(),
        count: stage_leads.len(),
        total_value: sum_amounts(stage_leads.iter().map(|l| l.proposal_value)),
        leads: stage_leads,
    }
}

// =============================================================================
//  SERVIÇO
// =============================================================================

#[derive(Clone)]
pub struct DashboardService {
    store: LeadStore,
}

impl DashboardService {
    pub fn new(store: LeadStore) -> Self {
        Self { store }
    }

    pub fn stats(&self) -> DashboardStats {
        let leads = self.store.snapshot();
        DashboardStats {
            status: status_counts(&leads),
            stages: stage_counts(&leads),
            active_leads: leads.iter().filter(|l| l.is_active()).count(),
            active_value: active_value(&leads),
        }
    }

    pub fn pipeline_summary(&self) -> PipelineSummary {
        let leads = self.store.snapshot();
        PipelineSummary {
            negotiation_value: negotiation_value(&leads),
            closed_value: total_value(&leads, PipelineStage::Fechado),
            conversion_rate: conversion_rate(&leads),
            active_value: active_value(&leads),
        }
    }

    /// Quadro completo: uma coluna por etapa, na ordem do funil.
    pub fn pipeline_board(&self) -> Vec<StageColumn> {
        let leads = self.store.snapshot();
        PipelineStage::ALL
            .iter()
            .map(|&stage| stage_column(&leads, stage))
            .collect()
    }

    pub fn stage(&self, stage: PipelineStage) -> StageColumn {
        stage_column(&self.store.snapshot(), stage)
    }
}
