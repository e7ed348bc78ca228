use std::net::SocketAddr;

use anyhow::{Context as AnyhowContext, Result};
use axum::{routing::get, Router};
use tokio::{net::TcpListener, signal};
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::context::CommonContext;

use self::handlers::{get_block_reward, get_sync_duties, healthz};

pub mod error;
mod handlers;
pub mod types;

pub fn router(context: Box<dyn CommonContext>) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/blockreward/{slot}", get(get_block_reward))
        .route("/syncduties/{slot}", get(get_sync_duties))
        .layer(TraceLayer::new_for_http())
        .with_state(context)
}

pub async fn serve(context: Box<dyn CommonContext>, address: SocketAddr) -> Result<()> {
    let listener = TcpListener::bind(address)
        .await
        .with_context(|| format!("Failed to bind to {address}"))?;

    info!(address = %listener.local_addr()?, "Server listening…");

    axum::serve(listener, router(context))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server failed")
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(error) = signal::ctrl_c().await {
            error!(?error, "Failed to listen for Ctrl+C");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(error) => {
                error!(?error, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, shutting down gracefully"),
        _ = terminate => info!("Received SIGTERM, shutting down gracefully"),
    }
}
