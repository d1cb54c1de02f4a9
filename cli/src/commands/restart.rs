//! `autodock restart` — restart a container and verify it comes back.

use std::process::ExitCode;

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use crate::app::AppContext;
use crate::application::ports::{RuntimeConnector, Sleeper};
use crate::application::services::remediation::Remediator;
use crate::domain::remediation::RemediationOutcome;
use crate::output::{SpinnerReporter, TerminalReporter, json, progress};

/// Arguments for the restart command.
#[derive(Args)]
pub struct RestartArgs {
    /// Container id or name
    pub container: String,
}

#[derive(Serialize)]
struct RestartReport<'a> {
    container: &'a str,
    message: String,
    #[serde(flatten)]
    outcome: &'a RemediationOutcome,
}

/// Run the restart command. Exits 1 only when the restart could not be done.
///
/// # Errors
///
/// Returns an error only if JSON serialization fails.
pub async fn run<C: RuntimeConnector, S: Sleeper>(
    app: &AppContext,
    args: &RestartArgs,
    remediator: &Remediator<C, S>,
) -> Result<ExitCode> {
    let id = args.container.as_str();

    let outcome = if app.is_json() {
        remediator.remediate(id).await
    } else if app.output.show_progress() {
        let pb = progress::spinner(&format!("Connecting to Docker for '{id}'..."));
        let outcome = remediator
            .remediate_with_progress(id, &SpinnerReporter::new(&pb))
            .await;
        pb.finish_and_clear();
        outcome
    } else {
        remediator
            .remediate_with_progress(id, &TerminalReporter::new(&app.output))
            .await
    };

    if app.is_json() {
        let report = RestartReport {
            container: id,
            message: outcome.to_string(),
            outcome: &outcome,
        };
        println!("{}", json::format_value(&report)?);
    } else {
        app.renderer().render_outcome(&outcome);
    }

    Ok(if outcome.is_failure() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}
