// src/models/lead.rs

use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidateEmail, ValidationError, ValidationErrors};

/// Placeholder de empresa quando a planilha não traz o nome.
pub const COMPANY_PLACEHOLDER: &str = "—";

/// Teto para `value`/`proposalValue`. Mantém as somas do funil longe do limite do `Decimal`.
pub const MAX_AMOUNT: i64 = 1_000_000_000_000_000;

// --- ENUMS ---

/// Triagem do lead. Independente da etapa do funil.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum LeadStatus {
    #[default]
    Novo,
    Potencial,
    Descartado,
}

impl LeadStatus {
    pub const ALL: [LeadStatus; 3] = [LeadStatus::Novo, LeadStatus::Potencial, LeadStatus::Descartado];

    pub fn as_str(&self) -> &'static str {
        match self {
            LeadStatus::Novo => "novo",
            LeadStatus::Potencial => "potencial",
            LeadStatus::Descartado => "descartado",
        }
    }
}

impl fmt::Display for LeadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Etapas do funil de vendas, na ordem em que aparecem no quadro.
/// A ordem é só conceitual: qualquer etapa pode ir para qualquer outra.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum PipelineStage {
    #[default]
    Prospecto,
    Qualificado,
    Proposta,
    Negociacao,
    Fechado,
    Perdido,
}

impl PipelineStage {
    pub const ALL: [PipelineStage; 6] = [
        PipelineStage::Prospecto,
        PipelineStage::Qualificado,
        PipelineStage::Proposta,
        PipelineStage::Negociacao,
        PipelineStage::Fechado,
        PipelineStage::Perdido,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PipelineStage::Prospecto => "prospecto",
            PipelineStage::Qualificado => "qualificado",
            PipelineStage::Proposta => "proposta",
            PipelineStage::Negociacao => "negociacao",
            PipelineStage::Fechado => "fechado",
            PipelineStage::Perdido => "perdido",
        }
    }

    /// Título da coluna no quadro do pipeline.
    pub fn title(&self) -> &'static str {
        match self {
            PipelineStage::Prospecto => "Prospectos",
            PipelineStage::Qualificado => "Qualificados",
            PipelineStage::Proposta => "Proposta Enviada",
            PipelineStage::Negociacao => "Em Negociação",
            PipelineStage::Fechado => "Fechado",
            PipelineStage::Perdido => "Perdido",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            PipelineStage::Prospecto => "Leads identificados",
            PipelineStage::Qualificado => "Leads com interesse confirmado",
            PipelineStage::Proposta => "Proposta comercial enviada",
            PipelineStage::Negociacao => "Negociando termos e valores",
            PipelineStage::Fechado => "Negócio concluído",
            PipelineStage::Perdido => "Oportunidade perdida",
        }
    }

    /// Fechado e perdido encerram o funil.
    pub fn is_terminal(&self) -> bool {
        matches!(self, PipelineStage::Fechado | PipelineStage::Perdido)
    }
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Faixas de score usadas no dashboard (cores verde/amarelo/vermelho).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ScoreTier {
    Alto,
    Medio,
    Baixo,
}

impl ScoreTier {
    pub fn from_score(score: f64) -> Self {
        if score >= 80.0 {
            ScoreTier::Alto
        } else if score >= 60.0 {
            ScoreTier::Medio
        } else {
            ScoreTier::Baixo
        }
    }
}

// --- LEAD (O Dado) ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Lead {
    #[schema(example = "3f2a9c01b7de")]
    pub id: String,
    #[schema(example = "Acme Corp")]
    pub name: String,
    // A importação da planilha nunca preenche o e-mail
    #[serde(default)]
    pub email: String,
    #[schema(example = "Acme Corp")]
    pub company: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "(11) 90000-0000")]
    pub phone: Option<String>,
    #[schema(example = "Google Sheets")]
    pub source: String,
    // 0..=100 por convenção da interface, não validado aqui
    #[schema(example = 85)]
    pub score: f64,
    pub status: LeadStatus,
    #[serde(rename = "pipeline_stage")]
    pub pipeline_stage: PipelineStage,
    // Valor estimado (legado)
    #[schema(example = "15000")]
    pub value: Decimal,
    // Valor usado em todos os totais do funil
    #[schema(example = "15000")]
    pub proposal_value: Decimal,
    #[schema(value_type = String, format = Date, example = "2024-01-15")]
    pub created_at: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_contact: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loss_reason: Option<String>,
}

impl Lead {
    /// Ativo = não descartado e fora da etapa "perdido".
    pub fn is_active(&self) -> bool {
        self.status != LeadStatus::Descartado && self.pipeline_stage != PipelineStage::Perdido
    }

    /// Observação preenchida (espaços não contam).
    pub fn has_notes(&self) -> bool {
        is_filled(self.notes.as_deref())
    }

    pub fn score_tier(&self) -> ScoreTier {
        ScoreTier::from_score(self.score)
    }
}

// =============================================================================
//  PAYLOADS
// =============================================================================

/// Lead sem `id`: o store atribui um identificador novo ao inserir.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewLead {
    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "João Silva")]
    pub name: String,

    #[serde(default)]
    #[schema(example = "joao@empresa.com")]
    pub email: String,

    #[serde(default)]
    #[schema(example = "TechCorp")]
    pub company: String,

    #[schema(example = "(11) 99999-9999")]
    pub phone: Option<String>,

    #[serde(default = "default_manual_source")]
    #[schema(example = "Website")]
    pub source: String,

    #[serde(default)]
    #[validate(range(min = 0.0, message = "invalid_score"))]
    #[schema(example = 85)]
    pub score: f64,

    #[serde(default)]
    pub status: LeadStatus,

    #[serde(default, rename = "pipeline_stage")]
    pub pipeline_stage: PipelineStage,

    #[serde(default)]
    #[schema(example = "15000")]
    pub value: Decimal,

    #[serde(default)]
    #[schema(example = "15000")]
    pub proposal_value: Decimal,

    // Se vier vazio, usa a data de hoje
    #[schema(value_type = Option<String>, format = Date, example = "2024-01-15")]
    pub created_at: Option<NaiveDate>,

    pub notes: Option<String>,
    pub position: Option<String>,
    pub linkedin_url: Option<String>,
    pub last_contact: Option<String>,
    pub loss_reason: Option<String>,
}

fn default_manual_source() -> String {
    "Manual".to_string()
}

impl NewLead {
    /// Validação completa: regras do derive + checagens que o derive não cobre
    /// (nome em branco, e-mail opcional, valores monetários entre 0 e `MAX_AMOUNT`).
    pub fn check(&self) -> Result<(), ValidationErrors> {
        let mut errors = self.validate().err().unwrap_or_else(ValidationErrors::new);

        check_name(&mut errors, Some(&self.name));
        if !self.email.is_empty() && !self.email.validate_email() {
            errors.add("email", field_error("invalid_email"));
        }
        check_money(&mut errors, "value", Some(self.value));
        check_money(&mut errors, "proposalValue", Some(self.proposal_value));

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    pub fn has_notes(&self) -> bool {
        is_filled(self.notes.as_deref())
    }

    pub fn into_lead(self, id: String, today: NaiveDate) -> Lead {
        let company = if self.company.trim().is_empty() {
            COMPANY_PLACEHOLDER.to_string()
        } else {
            self.company
        };

        Lead {
            id,
            name: self.name,
            email: self.email,
            company,
            phone: self.phone,
            source: self.source,
            score: self.score,
            status: self.status,
            pipeline_stage: self.pipeline_stage,
            value: self.value,
            proposal_value: self.proposal_value,
            created_at: self.created_at.unwrap_or(today),
            notes: self.notes,
            position: self.position,
            linkedin_url: self.linkedin_url,
            last_contact: self.last_contact,
            loss_reason: self.loss_reason,
        }
    }
}

/// Atualização parcial. Só os campos presentes são aplicados.
///
/// `id` e `createdAt` são imutáveis. Status e etapa não entram aqui: passam por
/// `set_status` (descartar remove o lead) e `move_stage` (perdido exige observação).
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LeadPatch {
    #[validate(length(min = 1, message = "required"))]
    pub name: Option<String>,
    pub email: Option<String>,
    pub company: Option<String>,
    pub phone: Option<String>,
    pub source: Option<String>,
    #[validate(range(min = 0.0, message = "invalid_score"))]
    pub score: Option<f64>,
    #[schema(example = "20000")]
    pub value: Option<Decimal>,
    #[schema(example = "20000")]
    pub proposal_value: Option<Decimal>,
    #[schema(example = "Cliente pediu retorno na segunda")]
    pub notes: Option<String>,
    pub position: Option<String>,
    pub linkedin_url: Option<String>,
    pub last_contact: Option<String>,
    pub loss_reason: Option<String>,
}

impl LeadPatch {
    pub fn check(&self) -> Result<(), ValidationErrors> {
        let mut errors = self.validate().err().unwrap_or_else(ValidationErrors::new);

        check_name(&mut errors, self.name.as_deref());
        if let Some(email) = self.email.as_deref() {
            if !email.is_empty() && !email.validate_email() {
                errors.add("email", field_error("invalid_email"));
            }
        }
        check_money(&mut errors, "value", self.value);
        check_money(&mut errors, "proposalValue", self.proposal_value);

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    pub fn apply(self, lead: &mut Lead) {
        if let Some(name) = self.name {
            lead.name = name;
        }
        if let Some(email) = self.email {
            lead.email = email;
        }
        if let Some(company) = self.company {
            lead.company = company;
        }
        if let Some(phone) = self.phone {
            lead.phone = Some(phone);
        }
        if let Some(source) = self.source {
            lead.source = source;
        }
        if let Some(score) = self.score {
            lead.score = score;
        }
        if let Some(value) = self.value {
            lead.value = value;
        }
        if let Some(proposal_value) = self.proposal_value {
            lead.proposal_value = proposal_value;
        }
        if let Some(notes) = self.notes {
            lead.notes = Some(notes);
        }
        if let Some(position) = self.position {
            lead.position = Some(position);
        }
        if let Some(linkedin_url) = self.linkedin_url {
            lead.linkedin_url = Some(linkedin_url);
        }
        if let Some(last_contact) = self.last_contact {
            lead.last_contact = Some(last_contact);
        }
        if let Some(loss_reason) = self.loss_reason {
            lead.loss_reason = Some(loss_reason);
        }
    }
}

fn is_filled(text: Option<&str>) -> bool {
    text.is_some_and(|t| !t.trim().is_empty())
}

fn field_error(code: &'static str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(code.into());
    error
}

// O derive só olha o tamanho; "   " passaria
fn check_name(errors: &mut ValidationErrors, name: Option<&str>) {
    if name.is_some_and(|n| !n.is_empty() && n.trim().is_empty()) {
        errors.add("name", field_error("required"));
    }
}

fn check_money(errors: &mut ValidationErrors, field: &'static str, amount: Option<Decimal>) {
    if amount.is_some_and(|v| v < Decimal::ZERO || v > Decimal::from(MAX_AMOUNT)) {
        errors.add(field, field_error("invalid_amount"));
    }
}

/// Soma de valores que nunca entra em pânico: satura em `Decimal::MAX`.
///
/// Os payloads já limitam cada valor a `MAX_AMOUNT`; isto cobre leads
/// inseridos direto no store.
pub fn sum_amounts<I>(amounts: I) -> Decimal
where
    I: IntoIterator<Item = Decimal>,
{
    amounts
        .into_iter()
        .try_fold(Decimal::ZERO, |acc, v| acc.checked_add(v))
        .unwrap_or(Decimal::MAX)
}

// --- FILTRO DE BUSCA ---

/// Busca do dashboard: texto livre em nome/e-mail/empresa + filtros de status e faixa de score.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct LeadFilter {
    /// Trecho procurado em nome, e-mail ou empresa (sem diferenciar maiúsculas)
    pub search: Option<String>,
    /// Restringe a um status
    pub status: Option<LeadStatus>,
    /// Restringe a uma faixa de score (alto >= 80, medio >= 60, baixo)
    pub tier: Option<ScoreTier>,
}

impl LeadFilter {
    pub fn matches(&self, lead: &Lead) -> bool {
        let matches_status = self.status.is_none_or(|s| lead.status == s);
        let matches_tier = self.tier.is_none_or(|t| lead.score_tier() == t);
        let matches_search = match self.search.as_deref().map(str::trim) {
            None | Some("") => true,
            Some(term) => {
                let term = term.to_lowercase();
                [&lead.name, &lead.email, &lead.company]
                    .iter()
                    .any(|field| field.to_lowercase().contains(&term))
            }
        };
        matches_status && matches_tier && matches_search
    }
}
