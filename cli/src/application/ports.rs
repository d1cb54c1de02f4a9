//! Port trait definitions for the Application layer.
//!
//! Ports are the interfaces (contracts) that infrastructure must fulfill.
//! This file imports only from `crate::domain` and `autodock_common` — never
//! from `crate::infra`, `crate::commands`, or `crate::output`.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use autodock_common::{ContainerDetails, ContainerStatus};

use crate::domain::{AutodockConfig, RuntimeError};

// ── Container Runtime Ports ───────────────────────────────────────────────────

/// Opens container runtime sessions.
///
/// Every use-case acquires its own session and releases it before returning;
/// sessions are never pooled or shared between invocations.
#[allow(async_fn_in_trait)]
pub trait RuntimeConnector {
    type Session: ContainerRuntime;

    /// Connect and verify the daemon answers.
    ///
    /// # Errors
    ///
    /// Returns [`RuntimeError::Unreachable`] when the daemon cannot be reached.
    async fn connect(&self) -> Result<Self::Session, RuntimeError>;
}

/// One live conversation with the container runtime.
#[allow(async_fn_in_trait)]
pub trait ContainerRuntime {
    /// Look up a container by id or name.
    async fn inspect(&self, id: &str) -> Result<ContainerDetails, RuntimeError>;
    /// Restart a container, giving it `grace` to stop before it is killed.
    async fn restart(&self, id: &str, grace: Duration) -> Result<(), RuntimeError>;
    /// Read the container's current status. Never cached.
    async fn status(&self, id: &str) -> Result<ContainerStatus, RuntimeError>;
    /// Read the last `tail` lines of combined stdout/stderr as raw bytes.
    async fn logs(&self, id: &str, tail: usize) -> Result<Vec<u8>, RuntimeError>;
    /// Release the session.
    async fn close(self) -> Result<(), RuntimeError>;
}

// ── Timing Port ───────────────────────────────────────────────────────────────

/// Timed wait between status polls.
#[allow(async_fn_in_trait)]
pub trait Sleeper {
    async fn sleep(&self, duration: Duration);
}

// ── Progress Reporting Port ───────────────────────────────────────────────────

/// Abstracts progress reporting so services can emit events without
/// depending on the Presentation layer. Sync trait — no async needed.
pub trait ProgressReporter {
    /// Emit an in-progress step message.
    fn step(&self, message: &str);
    /// Emit a success message.
    fn success(&self, message: &str);
    /// Emit a warning message.
    fn warn(&self, message: &str);
}

/// Reporter that discards every event.
pub struct SilentReporter;

impl ProgressReporter for SilentReporter {
    fn step(&self, _message: &str) {}
    fn success(&self, _message: &str) {}
    fn warn(&self, _message: &str) {}
}

// ── Config Port ───────────────────────────────────────────────────────────────

/// Abstracts configuration persistence.
pub trait ConfigStore {
    /// Load the configuration, falling back to defaults when no file exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    fn load(&self) -> Result<AutodockConfig>;
    /// Persist the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    fn save(&self, config: &AutodockConfig) -> Result<()>;
    /// Location of the configuration file.
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    fn path(&self) -> Result<PathBuf>;
}
