//! Domain types and validators for AutoDock configuration.
//!
//! Pure functions only — no I/O, no async, no filesystem access.

use std::time::Duration;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::domain::error::ConfigError;
use crate::domain::remediation::BackoffPolicy;

// ── Constants ────────────────────────────────────────────────────────────────

pub const VALID_CONFIG_KEYS: &[&str] = &[
    "log_level",
    "docker.host",
    "docker.timeout_secs",
    "logs.tail_lines",
    "remediation.restart_grace_secs",
    "remediation.initial_interval_ms",
    "remediation.max_interval_ms",
    "remediation.budget_secs",
];
pub const VALID_LOG_LEVELS: &[&str] = &["error", "warn", "info", "debug", "trace"];
pub const VALID_DOCKER_SCHEMES: &[&str] = &["unix://", "tcp://", "http://"];

/// Value that clears an optional setting.
pub const UNSET_VALUE: &str = "none";

pub const MAX_TAIL_LINES: u64 = 10_000;

// ── Config schema ────────────────────────────────────────────────────────────

/// Top-level configuration stored in `~/.autodock/config.yaml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AutodockConfig {
    /// Log filter used when `RUST_LOG` is unset. `None` means the command's
    /// own default (`warn`, or `info` for `serve`).
    pub log_level: Option<String>,
    pub docker: DockerConfig,
    pub logs: LogsConfig,
    pub remediation: RemediationConfig,
}

/// Docker daemon connection settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DockerConfig {
    /// Daemon address. `None` uses the local socket or `DOCKER_HOST`.
    pub host: Option<String>,
    /// Per-request timeout applied by the Docker client.
    pub timeout_secs: u64,
}

impl Default for DockerConfig {
    fn default() -> Self {
        Self {
            host: None,
            timeout_secs: 120,
        }
    }
}

impl DockerConfig {
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogsConfig {
    /// Lines read by `diagnose_logs` when the caller gives no tail.
    pub tail_lines: usize,
}

impl Default for LogsConfig {
    fn default() -> Self {
        Self { tail_lines: 100 }
    }
}

/// Restart grace and poll backoff.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RemediationConfig {
    pub restart_grace_secs: u64,
    pub initial_interval_ms: u64,
    pub max_interval_ms: u64,
    pub budget_secs: u64,
}

impl Default for RemediationConfig {
    fn default() -> Self {
        Self {
            restart_grace_secs: 10,
            initial_interval_ms: 500,
            max_interval_ms: 4000,
            budget_secs: 30,
        }
    }
}

impl RemediationConfig {
    #[must_use]
    pub fn policy(&self) -> BackoffPolicy {
        BackoffPolicy::default()
            .with_restart_grace(Duration::from_secs(self.restart_grace_secs))
            .with_initial_interval(Duration::from_millis(self.initial_interval_ms))
            .with_max_interval(Duration::from_millis(self.max_interval_ms))
            .with_max_elapsed(Duration::from_secs(self.budget_secs))
    }
}

impl AutodockConfig {
    /// Flatten into `(key, value)` pairs in whitelist order, for display.
    #[must_use]
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        vec![
            (
                "log_level",
                self.log_level.clone().unwrap_or_else(|| UNSET_VALUE.to_string()),
            ),
            (
                "docker.host",
                self.docker
                    .host
                    .clone()
                    .unwrap_or_else(|| UNSET_VALUE.to_string()),
            ),
            ("docker.timeout_secs", self.docker.timeout_secs.to_string()),
            ("logs.tail_lines", self.logs.tail_lines.to_string()),
            (
                "remediation.restart_grace_secs",
                self.remediation.restart_grace_secs.to_string(),
            ),
            (
                "remediation.initial_interval_ms",
                self.remediation.initial_interval_ms.to_string(),
            ),
            (
                "remediation.max_interval_ms",
                self.remediation.max_interval_ms.to_string(),
            ),
            (
                "remediation.budget_secs",
                self.remediation.budget_secs.to_string(),
            ),
        ]
    }

    /// Validate and apply one `key = value` setting.
    ///
    /// The config is left untouched when any check fails, including the
    /// cross-field interval ordering check.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown, the value is invalid for the
    /// key, or the result would violate `initial_interval_ms <= max_interval_ms`.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        validate_config_key(key)?;
        validate_config_value(key, value)?;

        let mut next = self.clone();
        match key {
            "log_level" => next.log_level = optional(value).map(str::to_ascii_lowercase),
            "docker.host" => next.docker.host = optional(value).map(str::to_string),
            "docker.timeout_secs" => next.docker.timeout_secs = parse_positive(key, value)?,
            "logs.tail_lines" => {
                next.logs.tail_lines = usize::try_from(parse_positive(key, value)?)
                    .map_err(|_| invalid(key, value, "a smaller number"))?;
            }
            "remediation.restart_grace_secs" => {
                next.remediation.restart_grace_secs = parse_positive(key, value)?;
            }
            "remediation.initial_interval_ms" => {
                next.remediation.initial_interval_ms = parse_positive(key, value)?;
            }
            "remediation.max_interval_ms" => {
                next.remediation.max_interval_ms = parse_positive(key, value)?;
            }
            "remediation.budget_secs" => {
                next.remediation.budget_secs = parse_positive(key, value)?;
            }
            _ => anyhow::bail!("Unknown setting: {key}"),
        }
        next.validate()?;
        *self = next;
        Ok(())
    }

    /// Check every value against its key's rules, then the cross-field ordering.
    ///
    /// Applied to files loaded from disk as well as to `set`, so a hand-edited
    /// file cannot carry a value `config set` would reject.
    ///
    /// # Errors
    ///
    /// Returns an error naming the first invalid key, or if the initial poll
    /// interval exceeds the maximum.
    pub fn validate(&self) -> Result<()> {
        for (key, value) in self.entries() {
            validate_config_value(key, &value)?;
        }
        let r = &self.remediation;
        if r.initial_interval_ms > r.max_interval_ms {
            return Err(ConfigError::InvalidValue {
                key: "remediation.initial_interval_ms".to_string(),
                value: r.initial_interval_ms.to_string(),
                expected: format!(
                    "at most remediation.max_interval_ms ({})",
                    r.max_interval_ms
                ),
            }
            .into());
        }
        Ok(())
    }
}

// ── Validators ───────────────────────────────────────────────────────────────

/// Validates a configuration key against the whitelist.
///
/// # Errors
///
/// Returns an error if the key is not in the allowed list.
pub fn validate_config_key(key: &str) -> Result<()> {
    if !VALID_CONFIG_KEYS.contains(&key) {
        return Err(ConfigError::UnknownKey {
            key: key.to_string(),
            valid: VALID_CONFIG_KEYS.join(", "),
        }
        .into());
    }
    Ok(())
}

/// Validates a configuration value for the given key.
///
/// # Errors
///
/// Returns an error if the value is not valid for the key.
pub fn validate_config_value(key: &str, value: &str) -> Result<()> {
    match key {
        "log_level" => {
            if optional(value).is_some_and(|v| {
                !VALID_LOG_LEVELS.contains(&v.to_ascii_lowercase().as_str())
            }) {
                return Err(invalid(key, value, &VALID_LOG_LEVELS.join(", ")).into());
            }
        }
        "docker.host" => {
            if optional(value)
                .is_some_and(|v| !VALID_DOCKER_SCHEMES.iter().any(|s| v.starts_with(s)))
            {
                let expected = format!(
                    "an address starting with {}, or '{UNSET_VALUE}'",
                    VALID_DOCKER_SCHEMES.join(", ")
                );
                return Err(invalid(key, value, &expected).into());
            }
        }
        "logs.tail_lines" => {
            let lines = parse_positive(key, value)?;
            if lines > MAX_TAIL_LINES {
                return Err(invalid(key, value, &format!("at most {MAX_TAIL_LINES}")).into());
            }
        }
        _ => {
            parse_positive(key, value)?;
        }
    }
    Ok(())
}

fn optional(value: &str) -> Option<&str> {
    let value = value.trim();
    (!value.is_empty() && !value.eq_ignore_ascii_case(UNSET_VALUE)).then_some(value)
}

fn parse_positive(key: &str, value: &str) -> Result<u64, ConfigError> {
    match value.trim().parse::<u64>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(invalid(key, value, "a positive integer")),
    }
}

fn invalid(key: &str, value: &str, expected: &str) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
        expected: expected.to_string(),
    }
}

// ── Unit tests ───────────────────────────────────────────────────────────────
