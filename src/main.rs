//! Runs the NVX29 HTTP API.
//!
//! Configuration is read from the environment (and an optional `.env` file):
//!
//! - `DATABASE_URL`: `PostgreSQL` connection string
//! - `NVX29_STORE`: `postgres` (default) or `memory`
//! - `NVX29_BIND`: listen address, default `0.0.0.0:8000`
//! - `NVX29_DB_POOL_SIZE`: pooled connections, default 10
//! - `NVX29_LOG_JSON`: emit JSON log lines when true

use mockable::DefaultClock;
use nvx29::api::{AppState, build_router};
use nvx29::config::{AppConfig, ConfigError, StoreKind};
use nvx29::records::adapters::memory::InMemoryRecordStore;
use nvx29::records::adapters::postgres::{PostgresRecordStore, build_pool};
use nvx29::records::ports::RecordStore;
use nvx29::telemetry::init_tracing;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let config = AppConfig::from_env()?;
    init_tracing(config.log_json);

    match config.store {
        StoreKind::Postgres => {
            let url = config
                .database_url
                .as_deref()
                .ok_or(ConfigError::Missing("DATABASE_URL"))?;
            let pool = build_pool(url, config.pool_size)?;
            let store = PostgresRecordStore::new(pool);
            store.ensure_schema().await?;
            info!(pool_size = config.pool_size, "connected to PostgreSQL");
            serve(store, config.bind).await
        }
        StoreKind::Memory => {
            warn!("using in-memory record store; records are lost on exit");
            serve(InMemoryRecordStore::new(), config.bind).await
        }
    }
}

async fn serve<S: RecordStore>(store: S, bind: SocketAddr) -> Result<(), BoxError> {
    let state = Arc::new(AppState::new(Arc::new(store), Arc::new(DefaultClock)));
    let app = build_router(state);
    let listener = TcpListener::bind(bind).await?;
    info!(%bind, "nvx29 listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("nvx29 stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
