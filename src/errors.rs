//! Typed error definitions for guardfs.
//! Covers the ambient failure modes (config, logging) with stable codes for logs and tests.
//! Precondition conflicts are not errors; see `fs_ops::Outcome`.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GuardFsError {
    #[error("Failed to read config file {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file {path}: {message}")]
    ConfigInvalid { path: PathBuf, message: String },

    #[error("Invalid log level: '{0}' (expected quiet, normal, info or debug)")]
    InvalidLogLevel(String),

    #[error("Refusing to log to {0}: an ancestor directory is a symlink")]
    LogPathSymlink(PathBuf),
}

impl GuardFsError {
    /// Short snake_case label logged next to `code`.
    pub fn kind(&self) -> &'static str {
        match self {
            GuardFsError::ConfigRead { .. } => "config_read",
            GuardFsError::ConfigInvalid { .. } => "config_invalid",
            GuardFsError::InvalidLogLevel(_) => "invalid_log_level",
            GuardFsError::LogPathSymlink(_) => "log_path_symlink",
        }
    }

    /// Stable numeric code for structured logs.
    pub fn code(&self) -> u16 {
        match self {
            GuardFsError::ConfigRead { .. } => 10,
            GuardFsError::ConfigInvalid { .. } => 11,
            GuardFsError::InvalidLogLevel(_) => 12,
            GuardFsError::LogPathSymlink(_) => 20,
        }
    }
}
