//! Command implementations

pub mod config;
pub mod inspect;
pub mod logs;
pub mod restart;
pub mod serve;
pub mod version;

use std::process::ExitCode;

use anyhow::Result;

use crate::app::AppContext;
use crate::domain::error::RuntimeError;
use crate::output::json;

/// Report a runtime failure in the active output mode and signal exit 1.
///
/// # Errors
///
/// Returns an error only if JSON serialization fails.
pub fn report_runtime_error(app: &AppContext, err: &RuntimeError) -> Result<ExitCode> {
    if app.is_json() {
        println!("{}", json::format_error(&err.to_string(), err.code())?);
    } else {
        app.output.error(&err.to_string());
    }
    Ok(ExitCode::FAILURE)
}
