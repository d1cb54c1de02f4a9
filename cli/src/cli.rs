//! CLI argument parsing with clap derive

use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};

use autodock_cli::app::{AppContext, OutputFlags};
use autodock_cli::application::services::remediation::Remediator;
use autodock_cli::commands;
use autodock_cli::domain::config::AutodockConfig;
use autodock_cli::infra::docker::DockerConnector;
use autodock_cli::infra::logging;
use autodock_cli::infra::sleeper::TokioSleeper;

/// Log filter when neither `RUST_LOG` nor `log_level` is set.
const DEFAULT_LOG_LEVEL: &str = "warn";
/// `serve` is long-running, so it logs lifecycle events by default.
const SERVE_LOG_LEVEL: &str = "info";

/// Container diagnostics and self-healing tools for AI agents
#[derive(Parser)]
#[command(
    name = "autodock",
    version,
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(
        long,
        global = true,
        env = "NO_COLOR",
        value_parser = clap::builder::FalseyValueParser::new()
    )]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Show a container's status, health and start time
    Inspect(commands::inspect::InspectArgs),

    /// Scan a container's recent logs for errors
    Logs(commands::logs::LogsArgs),

    /// Restart a container and verify it comes back
    Restart(commands::restart::RestartArgs),

    /// Run the MCP tool server (stdio by default)
    Serve(commands::serve::ServeArgs),

    /// Manage configuration
    #[command(subcommand)]
    Config(commands::config::ConfigCommand),

    /// Show version
    Version,
}

impl Cli {
    /// Execute the CLI command.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the command fails.
    pub async fn run(self) -> Result<ExitCode> {
        let Cli {
            no_color,
            quiet,
            json,
            command,
        } = self;
        let app = AppContext::new(&OutputFlags {
            no_color,
            quiet,
            json,
        });

        // Config and version must work even when the config file is broken.
        match command {
            Command::Version => {
                commands::version::run(&app)?;
                Ok(ExitCode::SUCCESS)
            }
            Command::Config(cmd) => {
                logging::init(DEFAULT_LOG_LEVEL);
                commands::config::run(&app, cmd)
            }
            Command::Inspect(args) => {
                let config = load_config(&app, DEFAULT_LOG_LEVEL)?;
                let connector = DockerConnector::new(&config.docker);
                commands::inspect::run(&app, &args, &connector).await
            }
            Command::Logs(args) => {
                let config = load_config(&app, DEFAULT_LOG_LEVEL)?;
                let connector = DockerConnector::new(&config.docker);
                commands::logs::run(&app, &args, &connector, config.logs.tail_lines).await
            }
            Command::Restart(args) => {
                let config = load_config(&app, DEFAULT_LOG_LEVEL)?;
                let remediator =
                    Remediator::new(DockerConnector::new(&config.docker), TokioSleeper)
                        .with_policy(config.remediation.policy());
                commands::restart::run(&app, &args, &remediator).await
            }
            Command::Serve(args) => {
                let config = load_config(&app, SERVE_LOG_LEVEL)?;
                commands::serve::run(&args, &config).await
            }
        }
    }
}

/// Load the config file and install logging at its level.
fn load_config(app: &AppContext, default_level: &str) -> Result<AutodockConfig> {
    let config = app.load_config()?;
    logging::init(config.log_level.as_deref().unwrap_or(default_level));
    Ok(config)
}
