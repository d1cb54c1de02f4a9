//! Application service — read-only container diagnostics.
//!
//! Each call opens its own runtime session and releases it before returning,
//! whether or not the runtime call succeeded.

use autodock_common::{ContainerDetails, LogScan, redact, scan};
use serde::Serialize;
use tracing::debug;

use crate::application::ports::{ContainerRuntime, RuntimeConnector};
use crate::application::services::release;
use crate::domain::error::RuntimeError;

/// Liveness reply for agents checking the tool server is up.
pub const PING_MESSAGE: &str = "Pong! AutoDock is online and ready for tools.";

/// Issues found in a container's recent logs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogDiagnosis {
    pub container: String,
    /// Number of log lines requested from the runtime.
    pub tail: usize,
    pub issues: LogScan,
}

/// Look up a container's current state.
///
/// # Errors
///
/// Returns the runtime error from connecting or inspecting.
pub async fn inspect_container(
    connector: &impl RuntimeConnector,
    id: &str,
) -> Result<ContainerDetails, RuntimeError> {
    let session = connector.connect().await?;
    let result = session.inspect(id).await;
    release(session, id).await;
    result
}

/// Read the last `tail` log lines with credentials masked.
///
/// Bytes that are not valid UTF-8 are replaced rather than rejected.
///
/// # Errors
///
/// Returns the runtime error from connecting or reading logs.
pub async fn read_redacted_logs(
    connector: &impl RuntimeConnector,
    id: &str,
    tail: usize,
) -> Result<String, RuntimeError> {
    let session = connector.connect().await?;
    let result = session.logs(id, tail).await;
    release(session, id).await;
    let raw = result?;
    debug!(container = id, bytes = raw.len(), tail, "read container logs");
    Ok(redact(&String::from_utf8_lossy(&raw)))
}

/// Scan a container's recent logs for crash and error lines.
///
/// # Errors
///
/// Returns the runtime error from connecting or reading logs.
pub async fn diagnose_logs(
    connector: &impl RuntimeConnector,
    id: &str,
    tail: usize,
) -> Result<LogDiagnosis, RuntimeError> {
    let text = read_redacted_logs(connector, id, tail).await?;
    Ok(LogDiagnosis {
        container: id.to_string(),
        tail,
        issues: scan(&text),
    })
}
