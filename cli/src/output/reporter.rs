//! Presentation-layer implementations of `ProgressReporter`.
//!
//! Application services emit progress through the port; these adapters turn
//! it into terminal lines or spinner updates.

use indicatif::ProgressBar;
use owo_colors::OwoColorize as _;

use crate::application::ports::ProgressReporter;
use crate::output::OutputContext;

/// Line-per-event reporter for non-TTY output.
///
/// - `step()` prints `"  → {message}"` (suppressed when `ctx.quiet`)
/// - `success()` prints `"  ✓ {message}"` (suppressed when `ctx.quiet`)
/// - `warn()` prints `"  ! {message}"` (suppressed when `ctx.quiet`)
pub struct TerminalReporter<'a> {
    ctx: &'a OutputContext,
}

impl<'a> TerminalReporter<'a> {
    #[must_use]
    pub fn new(ctx: &'a OutputContext) -> Self {
        Self { ctx }
    }
}

impl ProgressReporter for TerminalReporter<'_> {
    fn step(&self, message: &str) {
        if !self.ctx.quiet {
            println!("  {} {message}", "→".style(self.ctx.styles.info));
        }
    }

    fn success(&self, message: &str) {
        if !self.ctx.quiet {
            println!("  {} {message}", "✓".style(self.ctx.styles.success));
        }
    }

    fn warn(&self, message: &str) {
        if !self.ctx.quiet {
            println!("  {} {message}", "!".style(self.ctx.styles.warning));
        }
    }
}

/// Reporter that rewrites a single spinner line. The caller finishes the bar.
pub struct SpinnerReporter<'a> {
    pb: &'a ProgressBar,
}

impl<'a> SpinnerReporter<'a> {
    #[must_use]
    pub fn new(pb: &'a ProgressBar) -> Self {
        Self { pb }
    }
}

impl ProgressReporter for SpinnerReporter<'_> {
    fn step(&self, message: &str) {
        self.pb.set_message(message.to_string());
    }

    fn success(&self, message: &str) {
        self.pb.set_message(message.to_string());
    }

    fn warn(&self, message: &str) {
        self.pb.set_message(message.to_string());
    }
}
