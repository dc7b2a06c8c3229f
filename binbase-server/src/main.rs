use std::sync::Arc;

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use binbase_server::config::AppConfig;
use binbase_server::handy::HandyClient;
use binbase_server::lookup::LookupService;
use binbase_server::store::{BinStore, MemoryBinStore, PgBinStore};
use binbase_server::web::{AppState, create_router};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "binbase_server=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env();

    // `--memory` skips PostgreSQL entirely (records are lost on exit)
    let use_memory = std::env::args().skip(1).any(|arg| arg == "--memory");

    let handy = HandyClient::new(config.handy.clone()).inspect_err(|e| {
        tracing::error!(error = %e, "failed to create HandyAPI client");
    })?;

    let store: Arc<dyn BinStore> = if use_memory {
        tracing::warn!("using in-memory store; cached BINs will not persist");
        Arc::new(MemoryBinStore::new())
    } else {
        let store = PgBinStore::connect(&config.database)
            .await
            .inspect_err(|e| {
                tracing::error!(error = %e, "database connection failed");
                tracing::error!(
                    "check the POSTGRES_* environment variables and that PostgreSQL is running"
                );
            })?;
        store.migrate().await?;
        Arc::new(store)
    };

    let lookup = LookupService::new(store, Arc::new(handy));
    let state = AppState::new(lookup);
    let app = create_router(state, &config.static_dir);

    let addr = config.bind_addr;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("BIN lookup listening on http://{addr}");
    tracing::info!("  GET  /            - Lookup page");
    tracing::info!("  GET  /api/{{bin}}  - JSON lookup");
    tracing::info!("  GET  /health      - Health check");

    axum::serve(listener, app).await?;
    Ok(())
}
