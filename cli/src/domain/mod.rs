//! Domain layer — pure business logic, types, and validation.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All functions are synchronous and take data in, returning data out.

pub mod config;
pub mod container;
pub mod error;
pub mod remediation;

pub use config::{AutodockConfig, validate_config_key, validate_config_value};
pub use container::validate_container_id;
pub use error::{ConfigError, InputError, RuntimeError};
pub use remediation::{BackoffPolicy, BackoffState, FailureKind, RemediationOutcome, Severity};
