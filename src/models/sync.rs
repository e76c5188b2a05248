// src/models/sync.rs

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

/// Resultado de uma sincronização com a planilha.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SyncReport {
    #[schema(example = 42)]
    pub imported: usize,
    pub synced_at: DateTime<Utc>,
}
