// src/sheets/grid.rs

use std::collections::HashSet;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::{
    models::lead::{Lead, LeadStatus, PipelineStage, COMPANY_PLACEHOLDER},
    services::identity::lead_fingerprint,
};

pub const SHEETS_SOURCE_LABEL: &str = "Google Sheets";
const DEFAULT_LEAD_NAME: &str = "Lead";
const NOTES_SEPARATOR: &str = " | ";

// Cabeçalhos gerados pelo crawler:
// Nome, Telefone, Endereço, Horário, Categoria, Nota, Avaliações, Site, Tem Site, Termo
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SheetColumns {
    pub name: Option<usize>,
    pub phone: Option<usize>,
    pub address: Option<usize>,
    pub rating: Option<usize>,
    pub website: Option<usize>,
    pub term: Option<usize>,
}

impl SheetColumns {
    /// Resolve as colunas pelo cabeçalho (trim + sem diferenciar maiúsculas).
    pub fn from_header(header: &[String]) -> Self {
        let find = |label: &str| {
            header
                .iter()
                .position(|cell| cell.trim().to_lowercase() == label)
        };

        Self {
            name: find("nome"),
            phone: find("telefone"),
            address: find("endereço"),
            rating: find("nota"),
            website: find("site"),
            term: find("termo"),
        }
    }
}

fn cell(row: &[String], index: Option<usize>) -> &str {
    index
        .and_then(|i| row.get(i))
        .map(|c| c.trim())
        .unwrap_or("")
}

/// Nota da planilha vira score. Vazio, não numérico, infinito ou negativo → 0.
pub fn parse_score(raw: &str) -> f64 {
    match raw.trim().parse::<f64>() {
        Ok(score) if score.is_finite() && score >= 0.0 => score,
        _ => 0.0,
    }
}

/// Converte uma linha da planilha em lead. `None` se a linha estiver toda em branco.
pub fn lead_from_row(row: &[String], columns: &SheetColumns, today: NaiveDate) -> Option<Lead> {
    if row.iter().all(|c| c.trim().is_empty()) {
        return None;
    }

    let name = cell(row, columns.name);
    let phone = cell(row, columns.phone);
    let address = cell(row, columns.address);
    let website = cell(row, columns.website);
    let term = cell(row, columns.term);

    let notes = [address, website, term]
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(NOTES_SEPARATOR);

    Some(Lead {
        id: lead_fingerprint(name, phone, website, term),
        name: if name.is_empty() { DEFAULT_LEAD_NAME } else { name }.to_string(),
        email: String::new(),
        company: if name.is_empty() { COMPANY_PLACEHOLDER } else { name }.to_string(),
        phone: (!phone.is_empty()).then(|| phone.to_string()),
        source: SHEETS_SOURCE_LABEL.to_string(),
        score: parse_score(cell(row, columns.rating)),
        status: LeadStatus::Novo,
        pipeline_stage: PipelineStage::Prospecto,
        value: Decimal::ZERO,
        proposal_value: Decimal::ZERO,
        created_at: today,
        notes: (!notes.is_empty()).then_some(notes),
        position: None,
        linkedin_url: None,
        last_contact: None,
        loss_reason: None,
    })
}

/// Grade completa (primeira linha = cabeçalho) → leads, na ordem da planilha.
///
/// Linhas repetidas geram o mesmo id; só a primeira fica.
pub fn leads_from_grid(values: &[Vec<String>], today: NaiveDate) -> Vec<Lead> {
    let Some((header, rows)) = values.split_first() else {
        return Vec::new();
    };
    let columns = SheetColumns::from_header(header);

    let mut seen = HashSet::new();
    let mut leads = Vec::with_capacity(rows.len());
    for row in rows {
        let Some(lead) = lead_from_row(row, &columns, today) else {
            continue;
        };
        if !seen.insert(lead.id.clone()) {
            tracing::debug!(id = %lead.id, "linha duplicada ignorada na importação");
            continue;
        }
        leads.push(lead);
    }
    leads
}
