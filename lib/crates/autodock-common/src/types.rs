use std::fmt;

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};

/// Length of the short container id shown to users.
pub const SHORT_ID_LEN: usize = 12;

/// Health value reported when the image defines no healthcheck.
pub const HEALTH_NOT_CONFIGURED: &str = "not_configured";

/// Lifecycle status of a container as reported by the runtime.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ContainerStatus {
    Created,
    Running,
    Paused,
    Restarting,
    Removing,
    Exited,
    Dead,
    Starting,
    Unknown,
}

impl ContainerStatus {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Running => "running",
            Self::Paused => "paused",
            Self::Restarting => "restarting",
            Self::Removing => "removing",
            Self::Exited => "exited",
            Self::Dead => "dead",
            Self::Starting => "starting",
            Self::Unknown => "unknown",
        }
    }

    /// `exited` or `dead`: the process is gone and will not come back on its own.
    #[must_use]
    pub fn is_stopped(self) -> bool {
        matches!(self, Self::Exited | Self::Dead)
    }

    /// Statuses that end a stabilization poll: `running`, `exited`, `dead`.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        self == Self::Running || self.is_stopped()
    }
}

impl From<&str> for ContainerStatus {
    /// Lossy parse; anything the runtime reports that we do not model is `Unknown`.
    fn from(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "created" => Self::Created,
            "running" => Self::Running,
            "paused" => Self::Paused,
            "restarting" => Self::Restarting,
            "removing" => Self::Removing,
            "exited" => Self::Exited,
            "dead" => Self::Dead,
            "starting" => Self::Starting,
            _ => Self::Unknown,
        }
    }
}

impl fmt::Display for ContainerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Point-in-time snapshot of a container, as returned by inspection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContainerDetails {
    /// Short (12 character) container id.
    pub id: String,
    /// Container name without the leading `/` Docker prepends.
    pub name: String,
    pub status: ContainerStatus,
    /// Healthcheck status (`healthy`, `unhealthy`, `starting`) or `not_configured`.
    pub health_check: String,
    /// `None` when the container has never been started.
    pub started_at: Option<DateTime<Utc>>,
}

/// Truncate a full container id to its short form.
#[must_use]
pub fn short_id(id: &str) -> String {
    id.chars().take(SHORT_ID_LEN).collect()
}

/// Strip the leading `/` from a Docker container name.
#[must_use]
pub fn display_name(raw: &str) -> String {
    raw.trim_start_matches('/').to_string()
}

/// Parse a runtime start timestamp.
///
/// Docker reports `0001-01-01T00:00:00Z` for containers that never ran; that
/// and any unparseable value map to `None`.
#[must_use]
pub fn parse_started_at(raw: &str) -> Option<DateTime<Utc>> {
    let parsed = DateTime::parse_from_rfc3339(raw.trim()).ok()?;
    let utc = parsed.with_timezone(&Utc);
    (utc.year() > 1).then_some(utc)
}

/// Normalise a runtime health value, mapping absent or empty to `not_configured`.
#[must_use]
pub fn health_or_default(raw: Option<&str>) -> String {
    match raw.map(str::trim) {
        Some(value) if !value.is_empty() && value != "none" => value.to_string(),
        _ => HEALTH_NOT_CONFIGURED.to_string(),
    }
}
