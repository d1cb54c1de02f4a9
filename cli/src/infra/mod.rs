//! Infrastructure layer — concrete implementations of application port traits.
//!
//! This module contains all I/O-performing code: the Docker Engine client,
//! the tokio timer, and the YAML config file.
//!
//! Imports from `crate::domain` and `crate::application::ports` are allowed.
//! Imports from `crate::commands` or `crate::output` are forbidden.

pub mod config;
pub mod docker;
pub mod logging;
pub mod sleeper;
