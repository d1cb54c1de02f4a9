//! `autodock logs` — scan recent container logs for errors.

use std::process::ExitCode;

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use crate::app::AppContext;
use crate::application::ports::RuntimeConnector;
use crate::application::services::diagnosis;
use crate::commands::report_runtime_error;
use crate::domain::config::MAX_TAIL_LINES;
use crate::domain::container::validate_container_id;
use crate::output::json;

/// Arguments for the logs command.
#[derive(Args)]
pub struct LogsArgs {
    /// Container id or name
    pub container: String,

    /// Number of trailing lines to read [default: logs.tail_lines]
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..=MAX_TAIL_LINES))]
    pub tail: Option<u64>,

    /// Print the redacted log text instead of scanning it
    #[arg(long)]
    pub raw: bool,
}

#[derive(Serialize)]
struct RawLogs<'a> {
    container: &'a str,
    tail: usize,
    logs: String,
}

/// Run the logs command.
///
/// # Errors
///
/// Returns an error if the container id is malformed.
pub async fn run(
    app: &AppContext,
    args: &LogsArgs,
    connector: &impl RuntimeConnector,
    default_tail: usize,
) -> Result<ExitCode> {
    validate_container_id(&args.container)?;
    let tail = match args.tail {
        Some(n) => usize::try_from(n)?,
        None => default_tail,
    };

    if args.raw {
        return match diagnosis::read_redacted_logs(connector, &args.container, tail).await {
            Ok(logs) => {
                if app.is_json() {
                    let out = RawLogs {
                        container: &args.container,
                        tail,
                        logs,
                    };
                    println!("{}", json::format_value(&out)?);
                } else {
                    print!("{logs}");
                }
                Ok(ExitCode::SUCCESS)
            }
            Err(err) => report_runtime_error(app, &err),
        };
    }

    match diagnosis::diagnose_logs(connector, &args.container, tail).await {
        Ok(report) => {
            if app.is_json() {
                println!("{}", json::format_value(&report)?);
            } else {
                app.renderer().render_diagnosis(&report);
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => report_runtime_error(app, &err),
    }
}
