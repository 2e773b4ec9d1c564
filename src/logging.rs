//! Log level selection and logger installation.

use log::LevelFilter;
use std::io::Write;

/// Log level selected from the command line verbosity counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Warning,
    Info,
    Debug,
}

impl LogLevel {
    /// Map the `-v` count: 0 → warning, 1 → info, 2 and more → debug.
    pub fn from_verbosity(count: u8) -> Self {
        match count {
            0 => Self::Warning,
            1 => Self::Info,
            _ => Self::Debug,
        }
    }

    pub fn filter(self) -> LevelFilter {
        match self {
            Self::Warning => LevelFilter::Warn,
            Self::Info => LevelFilter::Info,
            Self::Debug => LevelFilter::Debug,
        }
    }
}

/// Target prefix of every record emitted by this crate
const CRATE_TARGET: &str = "qt_transifex";

/// Logger writing `[LEVEL] message` lines to stderr.
///
/// `level` applies to this crate only; dependencies (HTTP stack included)
/// stay at warnings.
fn builder(level: LogLevel) -> env_logger::Builder {
    let mut builder = env_logger::Builder::new();
    builder
        .filter_level(LevelFilter::Warn)
        .filter_module(CRATE_TARGET, level.filter())
        .target(env_logger::Target::Stderr)
        .format(|buf, record| writeln!(buf, "[{}] {}", record.level(), record.args()));
    builder
}

/// Install the stderr logger at `level`.
///
/// `RUST_LOG` directives, when set, refine the filter afterwards. Calling
/// this twice is harmless: the second installation is ignored.
pub fn init(level: LogLevel) {
    let _ = builder(level).parse_default_env().try_init();
}
