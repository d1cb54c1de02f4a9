//! Typed domain error enums.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All error types implement `thiserror::Error` and convert to `anyhow::Error`
//! via the `?` operator.

use thiserror::Error;

// ── Runtime errors ────────────────────────────────────────────────────────────

/// Errors returned by every container runtime capability call.
///
/// The variants keep "the daemon is down", "no such container" and "the
/// daemon refused" apart so callers can classify without string matching.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RuntimeError {
    #[error("Docker daemon not reachable: {0}")]
    Unreachable(String),

    #[error("Container '{0}' not found.")]
    NotFound(String),

    #[error("Docker API error: {0}")]
    Api(String),
}

impl RuntimeError {
    /// Stable machine-readable code used in JSON error output.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::Unreachable(_) => "DOCKER_UNREACHABLE",
            Self::NotFound(_) => "CONTAINER_NOT_FOUND",
            Self::Api(_) => "DOCKER_API_ERROR",
        }
    }
}

// ── Input errors ──────────────────────────────────────────────────────────────

/// Rejected caller input, raised before any runtime call is made.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum InputError {
    #[error("Invalid container id '{id}': {reason}")]
    InvalidContainerId { id: String, reason: &'static str },
}

// ── Config errors ─────────────────────────────────────────────────────────────

/// Errors related to configuration key/value validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Unknown setting: {key}\n\nValid settings: {valid}")]
    UnknownKey { key: String, valid: String },

    #[error("Invalid value for {key}: {value}\n\nExpected: {expected}")]
    InvalidValue {
        key: String,
        value: String,
        expected: String,
    },
}
