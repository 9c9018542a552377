//! Settings shared by the XML loader and the command line.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::errors::GuardFsError;

/// Console verbosity. Each level maps to a tracing filter in the binary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    /// Failures only.
    Quiet,
    /// Completions, refusals and dry-run notes.
    #[default]
    Normal,
    /// Adds debug events such as the resolved config.
    Info,
    Debug,
}

impl LogLevel {
    /// Case-insensitive, with a few aliases (`error`, `verbose`, `trace`).
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "quiet" | "error" | "none" => Some(LogLevel::Quiet),
            "normal" => Some(LogLevel::Normal),
            "info" | "verbose" | "detailed" => Some(LogLevel::Info),
            "debug" | "trace" => Some(LogLevel::Debug),
            _ => None,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LogLevel::Quiet => "quiet",
            LogLevel::Normal => "normal",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
        };
        f.write_str(s)
    }
}

impl FromStr for LogLevel {
    type Err = GuardFsError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| GuardFsError::InvalidLogLevel(s.to_string()))
    }
}

/// Runtime configuration for the tool.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    /// Console verbosity
    pub log_level: LogLevel,
    /// Optional path to a log file
    pub log_file: Option<PathBuf>,
    /// Emit logs as JSON lines
    pub json: bool,
    /// If true, check preconditions and report, but do not modify the filesystem
    pub dry_run: bool,
}
