//! Human-readable terminal renderer.

use std::path::Path;

use autodock_common::{ContainerDetails, LogScan};
use chrono::{DateTime, Utc};
use owo_colors::OwoColorize as _;

use crate::application::services::diagnosis::LogDiagnosis;
use crate::domain::config::AutodockConfig;
use crate::domain::remediation::{RemediationOutcome, Severity};
use crate::infra::config::CONFIG_ENV_VAR;
use crate::output::OutputContext;

/// Renders domain types as human-readable terminal output using `OutputContext`.
pub struct HumanRenderer<'a> {
    ctx: &'a OutputContext,
}

impl<'a> HumanRenderer<'a> {
    /// Create a new `HumanRenderer` wrapping the given output context.
    #[must_use]
    pub fn new(ctx: &'a OutputContext) -> Self {
        Self { ctx }
    }

    /// Render a container inspection.
    pub fn render_details(&self, details: &ContainerDetails) {
        if self.ctx.quiet {
            return;
        }
        self.ctx.header(&details.name);
        self.ctx.kv("ID:", &details.id);
        println!(
            "  {:<16} {}",
            "Status:".style(self.ctx.styles.dim),
            details
                .status
                .as_str()
                .style(self.ctx.styles.for_status(details.status))
        );
        self.ctx.kv("Health:", &details.health_check);
        self.ctx.kv(
            "Started:",
            &format_started(details.started_at, Utc::now()),
        );
    }

    /// Render a log scan.
    pub fn render_diagnosis(&self, diagnosis: &LogDiagnosis) {
        self.ctx.header(&format!(
            "Log scan: {} (last {} lines)",
            diagnosis.container, diagnosis.tail
        ));
        match &diagnosis.issues {
            LogScan::NoLogs => self.ctx.info("No logs found."),
            LogScan::Clean => self.ctx.success("No obvious errors found in logs."),
            LogScan::Issues(lines) => {
                let noun = if lines.len() == 1 { "issue" } else { "issues" };
                self.ctx.warn(&format!("{} {noun} found", lines.len()));
                if !self.ctx.quiet {
                    for line in lines {
                        println!("    {line}");
                    }
                }
            }
        }
    }

    /// Render a remediation outcome. Failures go to stderr and are never suppressed.
    pub fn render_outcome(&self, outcome: &RemediationOutcome) {
        let message = outcome.to_string();
        match outcome.severity() {
            Severity::Ok if !self.ctx.quiet => {
                println!("  {}", message.style(self.ctx.styles.success));
            }
            Severity::Warning if !self.ctx.quiet => {
                println!("  {}", message.style(self.ctx.styles.warning));
            }
            Severity::Error => eprintln!("  {}", message.style(self.ctx.styles.error)),
            Severity::Ok | Severity::Warning => {}
        }
    }

    /// Render the current configuration.
    pub fn render_config(&self, config: &AutodockConfig, path: &Path) {
        println!();
        println!(
            "  {}",
            format!("Configuration ({})", path.display()).style(self.ctx.styles.header)
        );
        println!();
        for (key, value) in config.entries() {
            println!("  {:<34} {value}", format!("{key}:"));
        }
        println!();
        println!("  {}", "Environment:".style(self.ctx.styles.bold));
        for var in [CONFIG_ENV_VAR, "DOCKER_HOST", "RUST_LOG", "NO_COLOR"] {
            println!(
                "    {:<18} {}",
                format!("{var}:"),
                std::env::var(var).unwrap_or_else(|_| "(not set)".to_string())
            );
        }
    }

    /// Render the CLI version.
    pub fn render_version(&self, version: &str) {
        println!("autodock {version}");
    }
}

// ── Display helpers ──────────────────────────────────────────────────────────

#[must_use]
pub fn format_uptime(seconds: u64) -> String {
    let days = seconds / 86_400;
    let hours = (seconds % 86_400) / 3600;
    let minutes = (seconds % 3600) / 60;
    if days > 0 {
        format!("{days}d {hours}h")
    } else if hours > 0 {
        format!("{hours}h {minutes}m")
    } else {
        format!("{minutes}m")
    }
}

/// `2024-05-01 12:30:45 UTC (up 2h 34m)`, or `never` for a container that never ran.
#[must_use]
pub fn format_started(started_at: Option<DateTime<Utc>>, now: DateTime<Utc>) -> String {
    let Some(started) = started_at else {
        return "never".to_string();
    };
    let stamp = started.format("%Y-%m-%d %H:%M:%S UTC");
    match u64::try_from((now - started).num_seconds()) {
        Ok(secs) => format!("{stamp} (up {})", format_uptime(secs)),
        Err(_) => stamp.to_string(),
    }
}
