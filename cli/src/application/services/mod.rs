//! Application services — use-case orchestration.
//!
//! Each service module implements a single use-case by composing domain logic
//! with port trait calls. Services import only from `crate::domain` and
//! `crate::application::ports` — never from `crate::infra`, `crate::commands`,
//! or `crate::output`.

pub mod config_service;
pub mod diagnosis;
pub mod remediation;

use tracing::warn;

use crate::application::ports::ContainerRuntime;

/// Close a session, logging rather than propagating a close failure.
pub(crate) async fn release(session: impl ContainerRuntime, id: &str) {
    if let Err(err) = session.close().await {
        warn!(container = id, error = %err, "failed to close runtime session");
    }
}
