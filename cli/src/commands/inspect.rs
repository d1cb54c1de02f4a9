//! `autodock inspect` — show a container's current state.

use std::process::ExitCode;

use anyhow::Result;
use clap::Args;

use crate::app::AppContext;
use crate::application::ports::RuntimeConnector;
use crate::application::services::diagnosis;
use crate::commands::report_runtime_error;
use crate::domain::container::validate_container_id;
use crate::output::json;

/// Arguments for the inspect command.
#[derive(Args)]
pub struct InspectArgs {
    /// Container id or name
    pub container: String,
}

/// Run the inspect command.
///
/// # Errors
///
/// Returns an error if the container id is malformed.
pub async fn run(
    app: &AppContext,
    args: &InspectArgs,
    connector: &impl RuntimeConnector,
) -> Result<ExitCode> {
    validate_container_id(&args.container)?;

    match diagnosis::inspect_container(connector, &args.container).await {
        Ok(details) => {
            if app.is_json() {
                println!("{}", json::format_value(&details)?);
            } else {
                app.renderer().render_details(&details);
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => report_runtime_error(app, &err),
    }
}
