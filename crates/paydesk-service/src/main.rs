//! Paydesk Service - customer registration and card payments over HTTP.

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use paydesk_service::{create_router, AppState, ServiceConfig, StorageBackend};
use paydesk_store::MemoryStore;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,paydesk=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Paydesk Service");

    let config = ServiceConfig::from_env();

    tracing::info!(
        listen_addr = %config.listen_addr,
        data_dir = %config.data_dir,
        storage_backend = ?config.storage_backend,
        stripe_configured = %config.stripe_api_key.is_some(),
        accepted_currencies = ?config.accepted_currencies,
        "Service configuration loaded"
    );

    let state = build_state(config.clone())?;

    let app = create_router(state);
    tracing::info!("Router configured with all API endpoints");

    tracing::info!(listen_addr = %config.listen_addr, "Starting HTTP server");
    let listener = tokio::net::TcpListener::bind(&config.listen_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Open the configured store and wire the application state.
fn build_state(config: ServiceConfig) -> Result<AppState, Box<dyn std::error::Error>> {
    match config.storage_backend {
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory store - data will not survive a restart");
            Ok(AppState::new(Arc::new(MemoryStore::new()), config))
        }
        #[cfg(feature = "rocksdb-backend")]
        StorageBackend::RocksDb => {
            tracing::info!(path = %config.data_dir, "Opening RocksDB store");
            let store = paydesk_store::RocksStore::open(&config.data_dir)?;
            Ok(AppState::new(Arc::new(store), config))
        }
        #[cfg(not(feature = "rocksdb-backend"))]
        StorageBackend::RocksDb => {
            Err("RocksDB backend requested but `rocksdb-backend` is not enabled".into())
        }
    }
}
