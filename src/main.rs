//! gigboard server entry point.
//!
//! Starts the Axum HTTP server with the REST endpoints.

use std::sync::Arc;

use anyhow::Context;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use gigboard::api;
use gigboard::app_state::AppState;
use gigboard::config::{DirectoryConfig, LogFormat};
use gigboard::persistence::{EntityStore, MemoryStore, SqliteStore};
use gigboard::service::DirectoryService;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing (reads LOG_FORMAT only)
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    match LogFormat::from_env() {
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init(),
        LogFormat::Text => tracing_subscriber::fmt().with_env_filter(filter).init(),
    }

    // Load configuration
    let config = DirectoryConfig::from_env()
        .map_err(|e| anyhow::anyhow!(e))
        .context("invalid configuration")?;
    tracing::info!(addr = %config.listen_addr, "starting gigboard");

    // Build persistence layer
    let store: Arc<dyn EntityStore> = if config.uses_memory_store() {
        tracing::warn!("using in-memory store, data will not survive a restart");
        Arc::new(MemoryStore::new())
    } else {
        let store = SqliteStore::connect(
            &config.database_url,
            config.database_max_connections,
            config.connect_timeout(),
        )
        .await
        .with_context(|| format!("failed to open {}", config.database_url))?;
        Arc::new(store)
    };

    // Build application state
    let app_state = AppState::new(DirectoryService::new(store));

    // Build router
    let app = Router::new()
        .merge(api::build_router())
        .layer(TimeoutLayer::new(config.request_timeout()))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(app_state);

    // Start server
    let listener = tokio::net::TcpListener::bind(config.listen_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.listen_addr))?;
    tracing::info!(addr = %config.listen_addr, "server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
    }
}
