//! Subcommand implementations.

mod compile;
mod list;
mod pull;
mod push;

use super::args::Command;
use super::RuntimeConfig;
use crate::error::Result;

/// Dispatch a parsed subcommand
pub async fn execute(command: &Command, config: &RuntimeConfig) -> Result<()> {
    match command {
        Command::Push(args) => push::run(args, config).await,
        Command::Pull(args) => pull::run(args, config).await,
        Command::Compile => compile::run(config).await,
        Command::List(args) => list::run(args, config).await,
    }
}
