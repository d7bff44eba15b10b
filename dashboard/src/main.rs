//! Users CLI entry-point: loads settings, installs tracing, runs one command.

use std::ffi::OsString;
use std::io;
use std::process::ExitCode;

use clap::Parser;
use ortho_config::OrthoConfig;
use tracing::{error, warn};
use tracing_subscriber::{EnvFilter, fmt};

use dashboard::config::DashboardSettings;
use dashboard::inbound::cli::{self, Cli};

/// Application bootstrap.
#[tokio::main]
async fn main() -> ExitCode {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .with_writer(io::stderr)
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let args = Cli::parse();
    // Settings come from the environment and config files only; the command
    // line belongs to clap.
    let settings = match DashboardSettings::load_from_iter([OsString::from("users-cli")]) {
        Ok(settings) => settings,
        Err(e) => {
            error!(error = %e, "failed to load settings");
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let mut stdout = io::stdout().lock();
    match cli::run(args, &settings, &mut stdout).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "command failed");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
