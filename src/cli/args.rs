//! Command line argument parsing.

use crate::logging::LogLevel;
use clap::{ArgAction, Parser, Subcommand};
use std::path::{Path, PathBuf};

/// Environment variable holding the Transifex API token
pub const TOKEN_ENV: &str = "TRANSIFEX_TOKEN";

/// Synchronize Qt plugin translations with Transifex
#[derive(Parser, Debug)]
#[command(
    name = "qt-transifex",
    version,
    about = "Synchronize Qt plugin translations with Transifex",
    long_about = "Extracts source strings with pylupdate5, pushes them to Transifex, pulls
translated .ts files back and compiles them into .qm files with lrelease.

Configuration is read from the [tool.qt-transifex] table of pyproject.toml, or
from the [qt-transifex] table of qt-transifex.toml / .qt-transifex.toml.

Usage:
  qt-transifex push --dry-run
  qt-transifex -v pull --compile -l fr -l de
  qt-transifex list --json"
)]
pub struct Args {
    /// Increase verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Project root containing the configuration file [default: current directory]
    #[arg(short = 'C', long, value_name = "DIR", global = true)]
    pub rootdir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Push source translation file to Transifex
    Push(PushArgs),

    /// Pull translations from Transifex
    Pull(PullArgs),

    /// Compile ts files
    Compile,

    /// List available translations
    List(ListArgs),
}

#[derive(clap::Args, Debug)]
pub struct TokenArgs {
    /// Transifex API token
    #[arg(long, env = TOKEN_ENV, hide_env_values = true, value_name = "TOKEN")]
    pub transifex_token: String,
}

#[derive(clap::Args, Debug)]
pub struct PushArgs {
    #[command(flatten)]
    pub token: TokenArgs,

    /// Extract strings but do not push them
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(clap::Args, Debug)]
pub struct PullArgs {
    #[command(flatten)]
    pub token: TokenArgs,

    /// Compile TS files into QM files
    #[arg(long)]
    pub compile: bool,

    /// Selected languages (repeatable); defaults to the configured ones
    #[arg(short, long = "lang", value_name = "LANG")]
    pub lang: Vec<String>,
}

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    #[command(flatten)]
    pub token: TokenArgs,

    /// Output as json
    #[arg(long)]
    pub json: bool,
}

impl Args {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

/// Settings shared by every command
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    rootdir: PathBuf,
    log_level: LogLevel,
    output: super::OutputManager,
}

impl RuntimeConfig {
    pub fn from_args(args: &Args) -> std::io::Result<Self> {
        let rootdir = match &args.rootdir {
            Some(dir) => dir.clone(),
            None => std::env::current_dir()?,
        };

        Ok(Self {
            rootdir,
            log_level: LogLevel::from_verbosity(args.verbose),
            output: super::OutputManager::new(),
        })
    }

    pub fn rootdir(&self) -> &Path {
        &self.rootdir
    }

    pub fn log_level(&self) -> LogLevel {
        self.log_level
    }

    pub fn output(&self) -> &super::OutputManager {
        &self.output
    }
}
