// src/services/lead_service.rs

use tracing::{info, warn};

use crate::{
    common::error::AppError,
    db::{LeadStore, StageMove, StatusOutcome},
    models::lead::{Lead, LeadFilter, LeadPatch, LeadStatus, NewLead, PipelineStage},
};

// Camada que a interface chama. Aqui ficam as validações; o store continua
// aceitando qualquer mutação para uso programático (correções em lote etc.).
#[derive(Clone)]
pub struct LeadService {
    store: LeadStore,
}

impl LeadService {
    pub fn new(store: LeadStore) -> Self {
        Self { store }
    }

    pub fn list(&self, filter: &LeadFilter) -> Vec<Lead> {
        self.store
            .snapshot()
            .into_iter()
            .filter(|lead| filter.matches(lead))
            .collect()
    }

    pub fn get(&self, id: &str) -> Result<Lead, AppError> {
        self.store
            .get(id)
            .ok_or_else(|| AppError::LeadNotFound(id.to_string()))
    }

    pub fn create(&self, draft: NewLead) -> Result<Lead, AppError> {
        draft.check()?;

        // Descartar = remover; um lead não pode entrar já descartado
        if draft.status == LeadStatus::Descartado {
            return Err(AppError::DiscardedOnCreate);
        }
        if draft.pipeline_stage == PipelineStage::Perdido && !draft.has_notes() {
            warn!("tentativa de criar lead já perdido sem observação");
            return Err(AppError::NotesRequiredForLoss(draft.name));
        }

        let lead = self.store.add(draft);
        info!(id = %lead.id, "lead criado manualmente");
        Ok(lead)
    }

    pub fn update(&self, id: &str, patch: LeadPatch) -> Result<Lead, AppError> {
        patch.check()?;

        self.store
            .update(id, patch)
            .ok_or_else(|| AppError::LeadNotFound(id.to_string()))
    }

    /// Muda o status. `descartado` tira o lead da coleção (`StatusOutcome::Discarded`).
    pub fn set_status(&self, id: &str, status: LeadStatus) -> Result<StatusOutcome, AppError> {
        match self.store.set_status(id, status) {
            StatusOutcome::NotFound => Err(AppError::LeadNotFound(id.to_string())),
            StatusOutcome::Discarded(lead) => {
                info!(id = %lead.id, "lead descartado e removido");
                Ok(StatusOutcome::Discarded(lead))
            }
            updated => Ok(updated),
        }
    }

    /// Move de etapa exigindo observação antes de "perdido".
    pub fn move_stage(
        &self,
        id: &str,
        stage: PipelineStage,
        loss_reason: Option<String>,
    ) -> Result<Lead, AppError> {
        let loss_reason = loss_reason
            .map(|r| r.trim().to_string())
            .filter(|r| !r.is_empty());

        let requires_notes = stage == PipelineStage::Perdido;
        let outcome = self
            .store
            .move_stage_if(id, stage, loss_reason, |lead| !requires_notes || lead.has_notes());

        match outcome {
            StageMove::Moved { lead, from } => {
                info!(id = %id, from = %from, to = %stage, "lead movido no pipeline");
                Ok(lead)
            }
            StageMove::Rejected => {
                warn!(id = %id, "tentativa de marcar como perdido sem observação");
                Err(AppError::NotesRequiredForLoss(id.to_string()))
            }
            StageMove::NotFound => Err(AppError::LeadNotFound(id.to_string())),
        }
    }

    pub fn remove(&self, id: &str) -> Result<Lead, AppError> {
        self.store
            .remove(id)
            .ok_or_else(|| AppError::LeadNotFound(id.to_string()))
    }
}
