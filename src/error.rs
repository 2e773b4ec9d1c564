//! Error types for translation synchronization.
//!
//! [`TranslationError`] is the domain error reported to users as a plain
//! `ERROR:` line. Everything else (configuration problems, I/O, transport)
//! travels through the crate-level [`Error`] and is equally fatal.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for qt-transifex operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for all operations
#[derive(Error, Debug)]
pub enum Error {
    /// Workflow errors with a user-facing message
    #[error(transparent)]
    Translation(#[from] TranslationError),

    /// Configuration loading and validation errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Transport-level failures talking to the remote service
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Error responses returned by the remote service
    #[error("Transifex API error ({status}): {detail}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Error details reported by the service
        detail: String,
    },

    /// JSON decoding errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Domain error of the translation workflow.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct TranslationError {
    message: String,
}

impl TranslationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Configuration-specific errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// No candidate configuration file in the root directory
    #[error("Cannot find configuration file in {}", rootdir.display())]
    NotFound {
        /// Directory that was searched
        rootdir: PathBuf,
    },

    /// Configuration or metadata file could not be read
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        /// File that failed to read
        path: PathBuf,
        /// Underlying IO error
        source: std::io::Error,
    },

    /// Configuration file is not valid TOML or has unexpected keys
    #[error("Failed to parse {}: {source}", path.display())]
    Parse {
        /// File that failed to parse
        path: PathBuf,
        /// Underlying TOML error
        source: toml::de::Error,
    },

    /// Required field absent
    #[error("Missing required field: {field}")]
    MissingField {
        /// Field name
        field: &'static str,
    },

    /// Field present but invalid
    #[error("Invalid value for '{field}': {reason}")]
    InvalidValue {
        /// Field name
        field: &'static str,
        /// Reason for the error
        reason: String,
    },
}

/// Shorthand for returning a [`TranslationError`] from a function.
#[macro_export]
macro_rules! bail {
    ($($arg:tt)*) => {
        return Err($crate::error::TranslationError::new(format!($($arg)*)).into())
    };
}
