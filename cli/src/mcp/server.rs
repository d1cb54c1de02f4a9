//! Transports for the MCP tool server: stdio and streamable HTTP.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::http::StatusCode;
use rmcp::ServiceExt as _;
use rmcp::transport::streamable_http_server::{
    StreamableHttpService, session::local::LocalSessionManager,
};
use tracing::info;

use crate::mcp::tools::{AutodockTools, ToolState};

/// Serve one MCP session over stdin/stdout until the client disconnects.
///
/// Logs go to stderr so stdout carries only protocol frames.
///
/// # Errors
///
/// Returns an error if the session cannot be initialised or ends abnormally.
pub async fn serve_stdio(state: Arc<ToolState>) -> Result<()> {
    info!("MCP server ready on stdio");
    let service = AutodockTools::new(state)
        .serve(rmcp::transport::stdio())
        .await
        .context("failed to start MCP stdio session")?;
    service.waiting().await.context("MCP stdio session error")?;
    info!("MCP stdio session closed");
    Ok(())
}

/// Serve MCP over streamable HTTP at `/mcp`, with a `/health` probe.
///
/// # Errors
///
/// Returns an error if the listener cannot be bound or the server fails.
pub async fn serve_http(state: Arc<ToolState>, addr: SocketAddr) -> Result<()> {
    // Each HTTP session gets its own handler sharing one Arc<ToolState>.
    let service = StreamableHttpService::new(
        move || Ok(AutodockTools::new(state.clone())),
        LocalSessionManager::default().into(),
        Default::default(),
    );

    let router = axum::Router::new()
        .nest_service("/mcp", service)
        .route("/health", axum::routing::get(health));

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!("MCP server ready at http://{addr}/mcp");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    info!("MCP server shut down");
    Ok(())
}

/// Minimal health-check handler for container and load-balancer probes.
async fn health() -> StatusCode {
    StatusCode::OK
}

/// Wait for Ctrl-C. If the handler cannot be installed, never resolve.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "cannot install Ctrl-C handler");
        std::future::pending::<()>().await;
    }
    info!("received shutdown signal");
}
