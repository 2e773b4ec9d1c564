//! Command line interface for qt-transifex.
//!
//! Parses arguments, installs logging at the requested verbosity and
//! dispatches to the subcommands. Errors are rendered by [`report_error`].

mod args;
pub mod commands;
mod output;

pub use args::{Args, Command, RuntimeConfig, TOKEN_ENV};
pub use output::OutputManager;

use crate::error::{Error, Result};
use crate::logging;

/// Main CLI entry point
pub async fn run() -> Result<i32> {
    let args = Args::parse_args();
    let config = RuntimeConfig::from_args(&args)?;

    logging::init(config.log_level());
    log::debug!("Project root: {}", config.rootdir().display());

    commands::execute(&args.command, &config).await?;
    Ok(0)
}

/// Print an error for the user and return the process exit code.
///
/// Workflow errors get the red `ERROR:` line; anything else is printed plain.
pub fn report_error(error: &Error) -> i32 {
    let output = OutputManager::new();
    let printed = match error {
        Error::Translation(e) => output.error(&format!("ERROR: {}", e)),
        other => output.eprintln(&format!("Error: {}", other)),
    };

    if printed.is_err() {
        eprintln!("Error: {}", error);
    }
    1
}
