//! Liveness endpoint for the hosting platform.

use axum::{routing::get, Router};
use std::net::SocketAddr;
use tracing::info;

pub fn router() -> Router {
    Router::new().route("/health", get(health))
}

async fn health() -> &'static str {
    "OK"
}

/// Serve `GET /health` until the process exits
pub async fn serve(addr: SocketAddr) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(addr = %listener.local_addr()?, "Health endpoint listening");
    axum::serve(listener, router()).await?;
    Ok(())
}
