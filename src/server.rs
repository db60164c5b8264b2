//! HTTP server initialization and runtime setup.
//!
//! Handles state loading, port resolution, and the Axum server lifecycle.

use crate::config::Config;
use crate::application::services::RedirectService;
use crate::infrastructure::persistence::JsonStateStore;
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::Result;
use axum::ServiceExt;
use axum::extract::Request;
use std::net::SocketAddr;
use std::sync::Arc;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - JSON state store rooted at the configured data directory
/// - The redirect engine, loaded once from persisted state
/// - Axum HTTP server on the engine's port (or the `PORT` override)
///
/// Changing the port through the API does not rebind the running listener;
/// the new value is picked up here on the next start.
///
/// # Errors
///
/// Returns an error if:
/// - Persisted state cannot be read
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let store = Arc::new(JsonStateStore::new(&config.data_dir));

    let redirect_service = Arc::new(RedirectService::load(store).await?);

    let port = match config.port_override {
        Some(port) => port,
        None => redirect_service.port().await,
    };

    let state = AppState::new(redirect_service);
    let app = app_router(state);

    let addr: SocketAddr = format!("{}:{}", config.listen_host, port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    Ok(())
}

/// Resolves when the process receives Ctrl-C / SIGINT.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to install shutdown signal handler: {e}");
        return;
    }
    tracing::info!("Shutdown signal received");
}
