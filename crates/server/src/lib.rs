//! REST server for the neutrino search façade
//!
//! This crate validates inbound search requests, forwards them to the
//! configured search backend and serves the greeting and health endpoints.

#![deny(warnings)]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]

pub mod api;
pub mod rest_server;

use neutrino_core::config::Config;
use neutrino_core::SearchBackend;
use std::sync::Arc;
use tracing::info;

// Re-export error types from core
pub use neutrino_core::error::{Error, Result};

pub use api::SearchRequestAdapter;
pub use rest_server::{build_router, ApiDoc, AppState};

/// Run the REST server with the given configuration.
///
/// It:
/// 1. Creates the search backend selected by `config.search`
/// 2. Binds `server.host:server.port`
/// 3. Serves requests until Ctrl+C, then shuts down gracefully
pub async fn run_server(config: Config) -> Result<()> {
    let backend = neutrino_search_client::create_search_backend(&config.search)?;
    run_server_with_backend(config, backend).await
}

/// Run the REST server over an already constructed backend
pub async fn run_server_with_backend(
    config: Config,
    backend: Arc<dyn SearchBackend>,
) -> Result<()> {
    let adapter = SearchRequestAdapter::new(backend, config.search.index_name.clone());
    let app = build_router(AppState::new(adapter), &config.server);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| Error::with_context(format!("Failed to bind to {addr}"), e))?;

    info!("REST server listening on http://{addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| Error::with_context("REST server error", e))?;

    info!("neutrino server shut down successfully");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Received Ctrl+C, initiating graceful shutdown"),
        Err(e) => tracing::error!("Error setting up signal handler: {e}"),
    }
}
