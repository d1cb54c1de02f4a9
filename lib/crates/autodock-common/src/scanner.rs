//! Log issue scanner.
//!
//! Picks out lines that look like crashes or errors so an agent can read a
//! handful of relevant lines instead of a full log tail.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

/// Sentinel returned for an empty log.
pub const NO_LOGS_MESSAGE: &str = "No logs found.";

/// Prefix marking a clean scan result.
pub const CLEAN_MARKER: &str = "✅";

/// Sentinel returned when no line matched.
pub const CLEAN_MESSAGE: &str = "✅ No obvious errors found in logs.";

/// At most this many distinct issues are reported (the most recent ones).
pub const MAX_REPORTED_ISSUES: usize = 10;

/// Matched lines of this many characters or fewer are dropped as noise.
pub const MIN_LINE_CHARS: usize = 10;

#[allow(clippy::expect_used)] // pattern is a compile-time constant
static ISSUE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(critical|fatal|panic|exception|traceback|error:|uncaught)")
        .expect("valid issue pattern")
});

/// Result of scanning a log for issues.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "result", content = "lines", rename_all = "snake_case")]
pub enum LogScan {
    /// The log was empty.
    NoLogs,
    /// Nothing matched.
    Clean,
    /// Distinct matching lines, oldest first, capped at [`MAX_REPORTED_ISSUES`].
    Issues(Vec<String>),
}

impl LogScan {
    /// Render as the line list tool callers expect, sentinels included.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        match self {
            Self::NoLogs => vec![NO_LOGS_MESSAGE.to_string()],
            Self::Clean => vec![CLEAN_MESSAGE.to_string()],
            Self::Issues(lines) => lines.clone(),
        }
    }

    #[must_use]
    pub fn issue_count(&self) -> usize {
        match self {
            Self::Issues(lines) => lines.len(),
            Self::NoLogs | Self::Clean => 0,
        }
    }
}

/// Scan raw log text for error-looking lines.
#[must_use]
pub fn scan(logs: &str) -> LogScan {
    if logs.is_empty() {
        return LogScan::NoLogs;
    }

    let mut seen = HashSet::new();
    let mut issues = Vec::new();
    // A bare '\r' ends a line too; progress-style output redraws with it.
    for line in logs.split(['\n', '\r']).map(str::trim) {
        if line.chars().count() > MIN_LINE_CHARS
            && ISSUE_PATTERN.is_match(line)
            && seen.insert(line)
        {
            issues.push(line.to_string());
        }
    }

    if issues.is_empty() {
        return LogScan::Clean;
    }
    let overflow = issues.len().saturating_sub(MAX_REPORTED_ISSUES);
    issues.drain(..overflow);
    LogScan::Issues(issues)
}
