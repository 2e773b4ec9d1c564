//! Translation synchronization between Qt plugin projects and Transifex.
//!
//! The crate loads the project configuration ([`config`]), talks to the
//! Transifex REST API ([`client`]) and runs the push/pull/compile workflow
//! ([`translation`]). The `qt-transifex` binary wraps it in a CLI ([`cli`]).

pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod logging;
pub mod translation;

// Re-export commonly used types
pub use config::{Parameters, load_parameters};
pub use error::{ConfigError, Error, Result, TranslationError};
pub use translation::Translation;
