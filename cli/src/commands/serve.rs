//! `autodock serve` — run the MCP tool server.

use std::net::SocketAddr;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Result;
use clap::Args;

use crate::domain::config::AutodockConfig;
use crate::mcp::{ToolState, serve_http, serve_stdio};

/// Arguments for the serve command.
#[derive(Args)]
pub struct ServeArgs {
    /// Serve streamable HTTP on this address instead of stdio
    #[arg(long, value_name = "ADDR", env = "AUTODOCK_LISTEN_ADDR")]
    pub http: Option<SocketAddr>,
}

/// Run the MCP server until the client disconnects or Ctrl-C.
///
/// # Errors
///
/// Returns an error if the transport cannot be started or fails.
pub async fn run(args: &ServeArgs, config: &AutodockConfig) -> Result<ExitCode> {
    let state = Arc::new(ToolState::from_config(config));
    tracing::info!(
        docker_host = config.docker.host.as_deref().unwrap_or("local"),
        budget_secs = config.remediation.budget_secs,
        "autodock MCP server starting"
    );
    match args.http {
        Some(addr) => serve_http(state, addr).await?,
        None => serve_stdio(state).await?,
    }
    Ok(ExitCode::SUCCESS)
}
