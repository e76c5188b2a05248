// src/services/sync_service.rs

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::{
    common::error::AppError,
    db::LeadStore,
    models::sync::SyncReport,
    sheets::LeadSource,
};

// Sincronização planilha -> store.
// As chamadas são serializadas: uma segunda sync espera a primeira terminar e
// então busca de novo, então o resultado aplicado segue a ordem das chamadas.
#[derive(Clone)]
pub struct SyncService {
    source: Arc<dyn LeadSource>,
    store: LeadStore,
    gate: Arc<Mutex<()>>,
}

impl SyncService {
    pub fn new(source: Arc<dyn LeadSource>, store: LeadStore) -> Self {
        Self {
            source,
            store,
            gate: Arc::new(Mutex::new(())),
        }
    }

    /// Busca tudo na fonte e substitui a coleção. Em caso de erro, nada muda.
    pub async fn sync(&self) -> Result<SyncReport, AppError> {
        let _guard = self.gate.lock().await;

        info!("sincronizando leads da planilha");
        let leads = match self.source.fetch_leads().await {
            Ok(leads) => leads,
            Err(e) => {
                warn!(kept = self.store.len(), "sync falhou, coleção anterior mantida");
                return Err(AppError::Import(e));
            }
        };

        let imported = leads.len();
        self.store.replace_all(leads);
        info!(imported, "sync concluída");

        Ok(SyncReport {
            imported,
            synced_at: Utc::now(),
        })
    }
}
