// src/sheets.rs
//
// Importação de leads a partir de uma planilha do Google Sheets.

pub mod client;
pub mod grid;

pub use client::GoogleSheetsSource;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::lead::Lead;

#[derive(Debug, Error)]
pub enum SheetsError {
    #[error("Conta de serviço do Google não configurada")]
    MissingServiceAccount,

    #[error("Conta de serviço inválida: {0}")]
    InvalidServiceAccount(String),

    #[error("ID da planilha não configurado")]
    MissingSheetId,

    #[error("Configuração inválida: {0}")]
    InvalidConfig(String),

    #[error("Falha ao obter token de acesso: {0}")]
    TokenExchange(String),

    #[error("Google Sheets respondeu {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Erro HTTP: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Erro de JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Erro de JWT: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),
}

/// De onde vêm os leads de uma sincronização.
///
/// Ou devolve a lista completa, ou um erro: nunca um resultado parcial.
#[async_trait]
pub trait LeadSource: Send + Sync {
    async fn fetch_leads(&self) -> Result<Vec<Lead>, SheetsError>;
}
