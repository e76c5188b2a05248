// src/config.rs

use std::{env, sync::Arc};

use anyhow::Context;

use crate::{
    common::i18n::I18nStore,
    db::LeadStore,
    services::{DashboardService, LeadService, SyncService},
    sheets::{GoogleSheetsSource, LeadSource},
};

pub const DEFAULT_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_SHEET_RANGE: &str = "Página1!A1:Z20000";

// Sem Debug de propósito: carrega a chave privada da conta de serviço
#[derive(Clone, Default)]
pub struct SheetsSettings {
    pub sheet_id: Option<String>,
    pub range: String,
    pub service_account_json: Option<String>,
}

impl SheetsSettings {
    pub fn is_configured(&self) -> bool {
        self.sheet_id.is_some() && self.service_account_json.is_some()
    }
}

#[derive(Clone)]
pub struct Settings {
    pub addr: String,
    pub sync_on_startup: bool,
    pub sheets: SheetsSettings,
}

impl Settings {
    /// Lê as configurações do ambiente (e do `.env`, se existir).
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        // Arquivo tem prioridade sobre o JSON colado na variável
        let service_account_json = match env::var("GOOGLE_SERVICE_ACCOUNT_FILE") {
            Ok(path) => Some(
                std::fs::read_to_string(&path)
                    .with_context(|| format!("Falha ao ler a conta de serviço em {path}"))?,
            ),
            Err(_) => env::var("GOOGLE_SERVICE_ACCOUNT_JSON").ok(),
        };

        let sync_on_startup = match env::var("SYNC_ON_STARTUP") {
            Ok(raw) => raw
                .parse::<bool>()
                .with_context(|| format!("SYNC_ON_STARTUP inválido: {raw}"))?,
            Err(_) => true,
        };

        Ok(Self {
            addr: env::var("APP_ADDR").unwrap_or_else(|_| DEFAULT_ADDR.to_string()),
            sync_on_startup,
            sheets: SheetsSettings {
                sheet_id: env::var("SHEET_ID").ok().filter(|id| !id.trim().is_empty()),
                range: env::var("SHEET_RANGE").unwrap_or_else(|_| DEFAULT_SHEET_RANGE.to_string()),
                service_account_json,
            },
        })
    }
}

// O estado compartilhado que será acessível em toda a aplicação.
// Um único LeadStore por processo; os serviços recebem clones do mesmo Arc.
#[derive(Clone)]
pub struct AppState {
    pub lead_service: LeadService,
    pub dashboard_service: DashboardService,
    pub sync_service: SyncService,
    pub i18n_store: Arc<I18nStore>,
}

impl AppState {
    pub fn new(settings: &Settings) -> anyhow::Result<Self> {
        let source = GoogleSheetsSource::new(&settings.sheets)
            .context("Falha ao configurar o cliente do Google Sheets")?;

        if !settings.sheets.is_configured() {
            tracing::warn!("Google Sheets não configurado: POST /api/sync vai falhar até definir SHEET_ID e a conta de serviço");
        }

        Ok(Self::with_source(Arc::new(source)))
    }

    // --- Monta o gráfico de dependências ---
    pub fn with_source(source: Arc<dyn LeadSource>) -> Self {
        let store = LeadStore::new();

        Self {
            lead_service: LeadService::new(store.clone()),
            dashboard_service: DashboardService::new(store.clone()),
            sync_service: SyncService::new(source, store),
            i18n_store: Arc::new(I18nStore::default()),
        }
    }
}
