//src/main.rs

use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use leads_backend::{
    config::{AppState, Settings},
    create_router,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .compact()
        .init();

    // Se a configuração falhar, a aplicação não deve iniciar.
    let settings = Settings::from_env()?;
    let app_state = AppState::new(&settings)?;

    // Primeira carga da planilha; se falhar, sobe vazio e a sync pode ser refeita por POST /api/sync
    if settings.sync_on_startup && settings.sheets.is_configured() {
        match app_state.sync_service.sync().await {
            Ok(report) => tracing::info!("✅ {} leads carregados da planilha", report.imported),
            Err(e) => tracing::error!("🔥 Falha na sincronização inicial: {}", e),
        }
    }

    let app = create_router(app_state);

    // Inicia o servidor
    let listener = TcpListener::bind(&settings.addr).await?;
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}
