// Web surface - Axum HTTP server for the recommendation form
// Serves the HTML form, a JSON endpoint and a health check.

pub mod routes;
pub mod views;

use axum::{
    routing::{get, post},
    Router,
};
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use crate::error::Result;
use crate::pipeline::Pipeline;

/// Shared, read-only state for all requests
pub struct AppState {
    pub pipeline: Arc<Pipeline>,
    pub provider_name: String,
    pub model: String,
}

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(routes::index).post(routes::submit_form))
        .route("/api/recommend", post(routes::recommend))
        .route("/health", get(routes::health))
        .with_state(state)
}

/// Bind and serve until Ctrl-C
pub async fn serve(state: Arc<AppState>, addr: SocketAddr) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    log::info!("VibeTune listening on http://{}", listener.local_addr()?);

    axum::serve(listener, create_router(state))
        .with_graceful_shutdown(shutdown_signal(tokio::signal::ctrl_c()))
        .await?;

    Ok(())
}

/// Resolves once `signal` fires
///
/// If the signal handler cannot be installed the server keeps running
/// instead of shutting down immediately.
async fn shutdown_signal<F>(signal: F)
where
    F: Future<Output = std::io::Result<()>>,
{
    match signal.await {
        Ok(()) => log::info!("Shutting down"),
        Err(e) => {
            log::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    }
}
