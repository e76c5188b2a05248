// src/db/lead_store.rs

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::Local;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::models::lead::{sum_amounts, Lead, LeadPatch, LeadStatus, NewLead, PipelineStage};

/// Mudança de status pedida pelo chamador.
///
/// "Descartado" não é um simples setter: tira o lead da coleção.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusChange {
    Mark(LeadStatus),
    Discard,
}

impl From<LeadStatus> for StatusChange {
    fn from(status: LeadStatus) -> Self {
        match status {
            LeadStatus::Descartado => StatusChange::Discard,
            other => StatusChange::Mark(other),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum StatusOutcome {
    Updated(Lead),
    /// O lead saiu da coleção; devolvemos o último estado dele.
    Discarded(Lead),
    NotFound,
}

#[derive(Debug, Clone, PartialEq)]
pub enum StageMove {
    Moved { lead: Lead, from: PipelineStage },
    /// O lead existe, mas a condição do chamador recusou a mudança.
    Rejected,
    NotFound,
}

// O store em memória: dono da coleção de leads da sessão.
// Mutações não validam nada; as regras de negócio ficam no LeadService.
#[derive(Clone, Default)]
pub struct LeadStore {
    leads: Arc<RwLock<Vec<Lead>>>,
}

impl LeadStore {
    pub fn new() -> Self {
        Self::default()
    }

    // Um panic no meio de uma escrita não deixa a coleção pela metade
    // (todas as escritas são trocas simples), então seguimos com o guard.
    fn read(&self) -> RwLockReadGuard<'_, Vec<Lead>> {
        self.leads.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<Lead>> {
        self.leads.write().unwrap_or_else(PoisonError::into_inner)
    }

    // =========================================================================
    //  MUTAÇÕES
    // =========================================================================

    /// Troca a coleção inteira de uma vez (sync). Nada do estado anterior é mantido.
    pub fn replace_all(&self, leads: Vec<Lead>) {
        let mut guard = self.write();
        *guard = leads;
    }

    /// Insere um lead novo com um id gerado aqui.
    pub fn add(&self, draft: NewLead) -> Lead {
        let today = Local::now().date_naive();
        let mut guard = self.write();

        let mut id = Uuid::new_v4().simple().to_string();
        while guard.iter().any(|l| l.id == id) {
            id = Uuid::new_v4().simple().to_string();
        }

        let lead = draft.into_lead(id, today);
        guard.push(lead.clone());
        lead
    }

    /// Aplica os campos presentes no patch. `None` se o id não existe.
    pub fn update(&self, id: &str, patch: LeadPatch) -> Option<Lead> {
        let mut guard = self.write();
        let lead = guard.iter_mut().find(|l| l.id == id)?;
        patch.apply(lead);
        Some(lead.clone())
    }

    pub fn set_status(&self, id: &str, status: LeadStatus) -> StatusOutcome {
        self.apply_status_change(id, StatusChange::from(status))
    }

    pub fn apply_status_change(&self, id: &str, change: StatusChange) -> StatusOutcome {
        match change {
            StatusChange::Discard => match self.remove(id) {
                Some(lead) => StatusOutcome::Discarded(lead),
                None => StatusOutcome::NotFound,
            },
            StatusChange::Mark(status) => {
                let mut guard = self.write();
                match guard.iter_mut().find(|l| l.id == id) {
                    Some(lead) => {
                        lead.status = status;
                        StatusOutcome::Updated(lead.clone())
                    }
                    None => StatusOutcome::NotFound,
                }
            }
        }
    }

    /// Move o lead de etapa sem checar a observação obrigatória de "perdido".
    /// Quem precisa da regra usa `move_stage_if`.
    pub fn move_stage(
        &self,
        id: &str,
        stage: PipelineStage,
        loss_reason: Option<String>,
    ) -> Option<Lead> {
        match self.move_stage_if(id, stage, loss_reason, |_| true) {
            StageMove::Moved { lead, .. } => Some(lead),
            StageMove::Rejected | StageMove::NotFound => None,
        }
    }

    /// Move de etapa só se `allow` aceitar o lead.
    /// A checagem e a escrita acontecem sob o mesmo lock de escrita.
    pub fn move_stage_if<F>(
        &self,
        id: &str,
        stage: PipelineStage,
        loss_reason: Option<String>,
        allow: F,
    ) -> StageMove
    where
        F: FnOnce(&Lead) -> bool,
    {
        let mut guard = self.write();
        let Some(lead) = guard.iter_mut().find(|l| l.id == id) else {
            return StageMove::NotFound;
        };
        if !allow(&*lead) {
            return StageMove::Rejected;
        }

        let from = lead.pipeline_stage;
        lead.pipeline_stage = stage;
        if let Some(reason) = loss_reason.filter(|r| !r.is_empty()) {
            lead.loss_reason = Some(reason);
        }
        StageMove::Moved {
            lead: lead.clone(),
            from,
        }
    }

    pub fn remove(&self, id: &str) -> Option<Lead> {
        let mut guard = self.write();
        let index = guard.iter().position(|l| l.id == id)?;
        Some(guard.remove(index))
    }

    // =========================================================================
    //  CONSULTAS (sempre sobre um snapshot consistente)
    // =========================================================================

    pub fn get(&self, id: &str) -> Option<Lead> {
        self.read().iter().find(|l| l.id == id).cloned()
    }

    pub fn snapshot(&self) -> Vec<Lead> {
        self.read().clone()
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    pub fn get_by_stage(&self, stage: PipelineStage) -> Vec<Lead> {
        self.read()
            .iter()
            .filter(|l| l.pipeline_stage == stage)
            .cloned()
            .collect()
    }

    pub fn total_value(&self, stage: PipelineStage) -> Decimal {
        sum_amounts(
            self.read()
                .iter()
                .filter(|l| l.pipeline_stage == stage)
                .map(|l| l.proposal_value),
        )
    }

    pub fn active_leads(&self) -> Vec<Lead> {
        self.read().iter().filter(|l| l.is_active()).cloned().collect()
    }

    pub fn active_value(&self) -> Decimal {
        sum_amounts(
            self.read()
                .iter()
                .filter(|l| l.is_active())
                .map(|l| l.proposal_value),
        )
    }
}
