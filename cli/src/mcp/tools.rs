//! MCP tool implementations for the AutoDock server.
//!
//! Exposes four tools via the `rmcp` `#[tool]` macro:
//!   - `ping`
//!   - `inspect_container`
//!   - `diagnose_logs`
//!   - `restart_container`
//!
//! `restart_container` is the only tool that changes anything. Log output is
//! redacted before it is scanned, so credentials never reach the agent.

use std::sync::Arc;

use rmcp::{
    ServerHandler,
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router,
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::application::ports::{RuntimeConnector, Sleeper};
use crate::application::services::diagnosis::{self, LogDiagnosis, PING_MESSAGE};
use crate::application::services::remediation::Remediator;
use crate::domain::config::{AutodockConfig, MAX_TAIL_LINES};
use crate::domain::container::validate_container_id;
use crate::infra::docker::DockerConnector;
use crate::infra::sleeper::TokioSleeper;

// ===================================================================
// Shared state
// ===================================================================

/// Dependencies shared by every MCP session.
pub struct ToolState {
    pub connector: DockerConnector,
    pub remediator: Remediator<DockerConnector, TokioSleeper>,
    pub default_tail: usize,
}

impl ToolState {
    #[must_use]
    pub fn from_config(config: &AutodockConfig) -> Self {
        let connector = DockerConnector::new(&config.docker);
        Self {
            remediator: Remediator::new(connector.clone(), TokioSleeper)
                .with_policy(config.remediation.policy()),
            connector,
            default_tail: config.logs.tail_lines,
        }
    }
}

// ===================================================================
// Input structs
// ===================================================================

/// Input for tools that act on a single container.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ContainerInput {
    /// Container id (full or short) or name.
    pub container_id: String,
}

/// Input for the `diagnose_logs` tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct DiagnoseLogsInput {
    /// Container id (full or short) or name.
    pub container_id: String,
    /// Number of trailing log lines to scan. Defaults to the configured tail.
    pub tail: Option<usize>,
}

// ===================================================================
// Output structs
// ===================================================================

/// Output returned by the `diagnose_logs` tool.
#[derive(Debug, Clone, Serialize)]
pub struct DiagnoseLogsOutput {
    pub container: String,
    pub tail: usize,
    /// Number of distinct issue lines found.
    pub issue_count: usize,
    /// Issue lines, oldest first, or a single sentinel line when none were found.
    pub findings: Vec<String>,
}

impl From<LogDiagnosis> for DiagnoseLogsOutput {
    fn from(diagnosis: LogDiagnosis) -> Self {
        Self {
            issue_count: diagnosis.issues.issue_count(),
            findings: diagnosis.issues.lines(),
            container: diagnosis.container,
            tail: diagnosis.tail,
        }
    }
}

// ===================================================================
// AutodockTools — the MCP server handler
// ===================================================================

/// MCP server handler exposing container diagnostics and repair.
#[derive(Clone)]
pub struct AutodockTools {
    state: Arc<ToolState>,
    tool_router: ToolRouter<Self>,
}

impl std::fmt::Debug for AutodockTools {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AutodockTools")
            .field("state", &"<ToolState>")
            .finish()
    }
}

impl AutodockTools {
    pub fn new(state: Arc<ToolState>) -> Self {
        Self {
            state,
            tool_router: Self::tool_router(),
        }
    }
}

// -------------------------------------------------------------------
// Tool implementations
// -------------------------------------------------------------------

#[tool_router]
impl AutodockTools {
    #[tool(description = "Basic connectivity check to ensure AutoDock is running.")]
    async fn ping(&self) -> String {
        PING_MESSAGE.to_string()
    }

    #[tool(description = "Get the id, name, status, health check result and start \
        time of a container. Use this first to see whether a container is running.")]
    async fn inspect_container(
        &self,
        params: Parameters<ContainerInput>,
    ) -> Result<String, String> {
        inspect_reply(&self.state.connector, &params.0).await
    }

    #[tool(description = "Scan a container's recent logs for crashes, panics, \
        exceptions and errors. Returns up to 10 distinct matching lines with \
        credentials redacted.")]
    async fn diagnose_logs(&self, params: Parameters<DiagnoseLogsInput>) -> Result<String, String> {
        diagnose_reply(&self.state.connector, &params.0, self.state.default_tail).await
    }

    #[tool(description = "Restart a container and wait for it to come back. \
        Reports success, a container that stopped again, a container still not \
        running after the wait budget, or why the restart could not be done.")]
    async fn restart_container(&self, params: Parameters<ContainerInput>) -> Result<String, String> {
        Ok(restart_reply(&self.state.remediator, &params.0).await)
    }
}

// -------------------------------------------------------------------
// Tool bodies, generic over the runtime ports
// -------------------------------------------------------------------

/// Reply for `inspect_container`: the details as JSON.
///
/// # Errors
///
/// Returns the message of an invalid id or a runtime error.
pub async fn inspect_reply(
    connector: &impl RuntimeConnector,
    input: &ContainerInput,
) -> Result<String, String> {
    validate_container_id(&input.container_id).map_err(|e| e.to_string())?;

    let details = diagnosis::inspect_container(connector, &input.container_id)
        .await
        .map_err(|e| e.to_string())?;

    serde_json::to_string(&details).map_err(|e| format!("Serialization error: {e}"))
}

/// Reply for `diagnose_logs`: the findings as JSON.
///
/// # Errors
///
/// Returns the message of an invalid id, an out-of-range tail or a runtime error.
pub async fn diagnose_reply(
    connector: &impl RuntimeConnector,
    input: &DiagnoseLogsInput,
    default_tail: usize,
) -> Result<String, String> {
    validate_container_id(&input.container_id).map_err(|e| e.to_string())?;
    let tail = resolve_tail(input.tail, default_tail)?;

    let diagnosis = diagnosis::diagnose_logs(connector, &input.container_id, tail)
        .await
        .map_err(|e| e.to_string())?;

    serde_json::to_string(&DiagnoseLogsOutput::from(diagnosis))
        .map_err(|e| format!("Serialization error: {e}"))
}

/// Reply for `restart_container`: always one of the four outcome messages.
pub async fn restart_reply<C: RuntimeConnector, S: Sleeper>(
    remediator: &Remediator<C, S>,
    input: &ContainerInput,
) -> String {
    info!(container = %input.container_id, "restart requested over MCP");
    remediator.remediate(&input.container_id).await.to_string()
}

// -------------------------------------------------------------------
// ServerHandler implementation (via tool_handler macro)
// -------------------------------------------------------------------

#[tool_handler]
impl ServerHandler for AutodockTools {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            instructions: Some(
                "AutoDock — container diagnostics and repair. \
                 Use inspect_container to check state, diagnose_logs to find \
                 errors, and restart_container to restart and verify."
                    .into(),
            ),
            ..Default::default()
        }
    }
}

// -------------------------------------------------------------------
// Helpers
// -------------------------------------------------------------------

/// Pick the tail length for a log scan, rejecting zero and oversized requests.
fn resolve_tail(requested: Option<usize>, default: usize) -> Result<usize, String> {
    let tail = requested.unwrap_or(default);
    let max = usize::try_from(MAX_TAIL_LINES).unwrap_or(usize::MAX);
    if tail == 0 || tail > max {
        return Err(format!("tail must be between 1 and {max}, got {tail}"));
    }
    Ok(tail)
}
