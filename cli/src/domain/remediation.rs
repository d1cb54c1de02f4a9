//! Restart-and-verify domain types: backoff policy, poll state and outcomes.
//!
//! Pure data and arithmetic only. The poll loop that drives these types lives
//! in `application::services::remediation`.

use std::fmt;
use std::time::Duration;

use autodock_common::ContainerStatus;
use serde::Serialize;

// ── Constants ────────────────────────────────────────────────────────────────

pub const DEFAULT_INITIAL_INTERVAL: Duration = Duration::from_millis(500);
pub const DEFAULT_MAX_INTERVAL: Duration = Duration::from_secs(4);
pub const DEFAULT_MAX_ELAPSED: Duration = Duration::from_secs(30);
pub const DEFAULT_RESTART_GRACE: Duration = Duration::from_secs(10);

/// Floor applied to the first poll interval so `elapsed` always advances.
pub const MIN_INTERVAL: Duration = Duration::from_millis(1);

pub const SUCCESS_GLYPH: &str = "✅";
pub const WARNING_GLYPH: &str = "⚠️";
pub const FAILURE_GLYPH: &str = "❌";

// ── Backoff ──────────────────────────────────────────────────────────────────

/// How long to wait between status polls after a restart, and for how long.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackoffPolicy {
    /// First wait before the first status poll.
    pub initial_interval: Duration,
    /// Upper bound on any single wait.
    pub max_interval: Duration,
    /// Stop polling once cumulative waiting reaches this.
    pub max_elapsed: Duration,
    /// Seconds the runtime gives the process to stop before killing it.
    pub restart_grace: Duration,
}

impl Default for BackoffPolicy {
    fn default() -> Self {
        Self {
            initial_interval: DEFAULT_INITIAL_INTERVAL,
            max_interval: DEFAULT_MAX_INTERVAL,
            max_elapsed: DEFAULT_MAX_ELAPSED,
            restart_grace: DEFAULT_RESTART_GRACE,
        }
    }
}

impl BackoffPolicy {
    #[must_use]
    pub fn with_initial_interval(mut self, interval: Duration) -> Self {
        self.initial_interval = interval;
        self
    }

    #[must_use]
    pub fn with_max_interval(mut self, interval: Duration) -> Self {
        self.max_interval = interval;
        self
    }

    #[must_use]
    pub fn with_max_elapsed(mut self, budget: Duration) -> Self {
        self.max_elapsed = budget;
        self
    }

    #[must_use]
    pub fn with_restart_grace(mut self, grace: Duration) -> Self {
        self.restart_grace = grace;
        self
    }
}

/// Mutable poll-loop state. Created when polling starts, dropped when it ends.
///
/// `interval` never decreases and never exceeds `max_interval`; `elapsed`
/// grows by the current interval on every [`record_wait`](Self::record_wait).
#[derive(Debug, Clone)]
pub struct BackoffState {
    policy: BackoffPolicy,
    interval: Duration,
    elapsed: Duration,
}

impl BackoffState {
    #[must_use]
    pub fn new(policy: BackoffPolicy) -> Self {
        let ceiling = policy.max_interval.max(MIN_INTERVAL);
        Self {
            policy,
            interval: policy.initial_interval.clamp(MIN_INTERVAL, ceiling),
            elapsed: Duration::ZERO,
        }
    }

    /// The wait to apply before the next poll.
    #[must_use]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Total time waited so far.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    #[must_use]
    pub fn budget(&self) -> Duration {
        self.policy.max_elapsed
    }

    /// Account for one completed wait of the current interval.
    pub fn record_wait(&mut self) {
        self.elapsed = self.elapsed.saturating_add(self.interval);
    }

    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.elapsed >= self.policy.max_elapsed
    }

    /// Double the interval, capped at `max_interval`.
    pub fn advance(&mut self) {
        let ceiling = self.policy.max_interval.max(self.interval);
        self.interval = self.interval.saturating_mul(2).min(ceiling);
    }
}

// ── Outcome ──────────────────────────────────────────────────────────────────

/// Why a remediation attempt failed outright.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// The runtime could not be reached, or refused the container lookup.
    Connection,
    /// The container does not exist.
    NotFound,
    /// The restart request itself was rejected.
    Mutation,
    /// The restart went out but a later status read failed.
    Verification,
}

impl FailureKind {
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Self::Connection => "DOCKER_UNREACHABLE",
            Self::NotFound => "CONTAINER_NOT_FOUND",
            Self::Mutation => "RESTART_FAILED",
            Self::Verification => "VERIFICATION_FAILED",
        }
    }
}

/// How loudly an outcome should be reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Ok,
    Warning,
    Error,
}

/// The single result of one restart-and-verify attempt.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum RemediationOutcome {
    /// The container came back `running`.
    Success { name: String },
    /// The restart went through but the container stopped again.
    Degraded { status: ContainerStatus },
    /// No terminal status was observed within the budget.
    TimedOut {
        status: ContainerStatus,
        elapsed_secs: f64,
        budget_secs: f64,
    },
    Failure { kind: FailureKind, reason: String },
}

impl RemediationOutcome {
    #[must_use]
    pub fn failure(kind: FailureKind, reason: impl Into<String>) -> Self {
        Self::Failure {
            kind,
            reason: reason.into(),
        }
    }

    #[must_use]
    pub fn severity(&self) -> Severity {
        match self {
            Self::Success { .. } => Severity::Ok,
            Self::Degraded { .. } | Self::TimedOut { .. } => Severity::Warning,
            Self::Failure { .. } => Severity::Error,
        }
    }

    #[must_use]
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failure { .. })
    }
}

impl fmt::Display for RemediationOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success { name } => {
                write!(f, "{SUCCESS_GLYPH} Successfully restarted '{name}'.")
            }
            Self::Degraded { status } => {
                write!(f, "{WARNING_GLYPH} Restarted, but container is now '{status}'.")
            }
            Self::TimedOut {
                status,
                elapsed_secs,
                budget_secs,
            } => write!(
                f,
                "{WARNING_GLYPH} Container restart initiated, but status is '{status}' \
                 after {budget_secs}s (waited {elapsed_secs}s)."
            ),
            Self::Failure { reason, .. } => write!(f, "{FAILURE_GLYPH} Fix failed: {reason}"),
        }
    }
}

// ── Unit tests ───────────────────────────────────────────────────────────────
