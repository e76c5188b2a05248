use std::collections::HashMap;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use thiserror::Error;

use crate::{common::i18n::I18nStore, middleware::i18n::Locale, sheets::SheetsError};

// Nosso tipo de erro, com `thiserror` para melhor ergonomia.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Lead não encontrado: {0}")]
    LeadNotFound(String),

    // Regra do funil: só marca perdido com observação preenchida
    #[error("Lead {0} sem observação não pode ir para perdido")]
    NotesRequiredForLoss(String),

    #[error("Lead novo não pode ser criado como descartado")]
    DiscardedOnCreate,

    // Falha na sincronização (rede, credenciais, API do Google)
    #[error("Falha na importação: {0}")]
    Import(#[from] SheetsError),
}

/// Erro já pronto para virar resposta HTTP.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
    pub details: Option<Value>,
}

impl AppError {
    /// Traduz o erro para o idioma do cliente e escolhe o status HTTP.
    pub fn to_api_error(self, locale: &Locale, i18n: &I18nStore) -> ApiError {
        let lang = locale.0.as_str();
        match self {
            // Retorna todos os detalhes da validação.
            AppError::ValidationError(errors) => {
                let mut details = HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors.iter()
                        .map(|e| e.message.as_ref().map(|m| m.to_string()).unwrap_or_else(|| e.code.to_string()))
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                ApiError {
                    status: StatusCode::BAD_REQUEST,
                    message: i18n.translate(lang, "validation").to_string(),
                    details: Some(json!(details)),
                }
            }
            AppError::LeadNotFound(id) => ApiError {
                status: StatusCode::NOT_FOUND,
                message: format!("{}: {}", i18n.translate(lang, "lead_not_found"), id),
                details: None,
            },
            AppError::NotesRequiredForLoss(_) => ApiError {
                status: StatusCode::UNPROCESSABLE_ENTITY,
                message: i18n.translate(lang, "notes_required_for_loss").to_string(),
                details: None,
            },
            AppError::DiscardedOnCreate => ApiError {
                status: StatusCode::UNPROCESSABLE_ENTITY,
                message: i18n.translate(lang, "discarded_on_create").to_string(),
                details: None,
            },
            AppError::Import(e) => {
                // O detalhe técnico vai para o log; o cliente recebe a mensagem traduzida + causa
                tracing::error!("Erro na importação de leads: {}", e);
                ApiError {
                    status: StatusCode::BAD_GATEWAY,
                    message: format!("{}: {}", i18n.translate(lang, "import_failed"), e),
                    details: None,
                }
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = match self.details {
            Some(details) => json!({ "error": self.message, "details": details }),
            None => json!({ "error": self.message }),
        };
        (self.status, Json(body)).into_response()
    }
}
