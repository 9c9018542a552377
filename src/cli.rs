//! CLI definition and parsing.
//! Defines Args (global flags) and Command (one subcommand per operation).
//!
//! Notes:
//! - --debug is a shorthand for --log-level debug and wins over it.
//! - Relative paths are resolved against --dir when given.

use clap::{Parser, Subcommand, ValueHint};
use std::path::PathBuf;

use crate::config::types::{Config, LogLevel};

/// CLI wrapper for the guardfs library.
/// CLI flags override config values (which are loaded from XML if present).
#[derive(Parser, Debug, Clone)]
#[command(
    author,
    version,
    about = "Create, read, copy, move and delete files only when it is safe to",
    arg_required_else_help = true
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Resolve relative paths against this directory instead of the working directory.
    #[arg(long, global = true, value_hint = ValueHint::DirPath, value_name = "DIR")]
    pub dir: Option<PathBuf>,

    /// Check preconditions and report, but do not modify the filesystem.
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// Enable debug logging (equivalent to `--log-level debug`).
    #[arg(short = 'd', long, global = true)]
    pub debug: bool,

    /// Set log level. One of: quiet, normal, info, debug.
    #[arg(long, global = true, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Also write logs to this file (refused if an ancestor is a symlink).
    #[arg(long, global = true, value_hint = ValueHint::FilePath, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Emit logs in structured JSON.
    #[arg(long, global = true)]
    pub json: bool,

    /// Print the config file location used by guardfs and exit.
    #[arg(long)]
    pub print_config: bool,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Create a new file; refused if the path already exists.
    Create {
        #[arg(value_hint = ValueHint::FilePath)]
        path: PathBuf,
        /// Text to write (a trailing newline is added if missing).
        #[arg(short, long, default_value = "")]
        content: String,
    },
    /// Print a file line by line; refused if it does not exist.
    Read {
        #[arg(value_hint = ValueHint::FilePath)]
        path: PathBuf,
    },
    /// Delete a file; refused if it does not exist.
    Delete {
        #[arg(value_hint = ValueHint::FilePath)]
        path: PathBuf,
    },
    /// Copy SRC to DST; refused if SRC is missing or DST exists.
    Copy {
        #[arg(value_hint = ValueHint::FilePath)]
        src: PathBuf,
        #[arg(value_hint = ValueHint::FilePath)]
        dst: PathBuf,
    },
    /// Move SRC to DST; refused if SRC is missing or DST exists.
    Move {
        #[arg(value_hint = ValueHint::FilePath)]
        src: PathBuf,
        #[arg(value_hint = ValueHint::FilePath)]
        dst: PathBuf,
    },
    /// Create a directory (and parents); refused if it already exists.
    Mkdir {
        #[arg(value_hint = ValueHint::DirPath)]
        path: PathBuf,
    },
    /// Run the scripted walkthrough of every operation.
    Demo {
        /// Delete the files the walkthrough created when it finishes.
        #[arg(long)]
        cleanup: bool,
    },
    /// Run the recoverable-fault demonstrations.
    Faults,
}

impl Args {
    /// Effective log level derived from flags.
    /// Precedence: --debug > --log-level value > None (use config default).
    pub fn effective_log_level(&self) -> Option<LogLevel> {
        if self.debug {
            return Some(LogLevel::Debug);
        }
        self.log_level
    }

    /// Apply CLI overrides to a loaded Config (in-place). No-ops for unset flags.
    pub fn apply_overrides(&self, cfg: &mut Config) {
        if let Some(level) = self.effective_log_level() {
            cfg.log_level = level;
        }
        if let Some(lf) = &self.log_file {
            cfg.log_file = Some(lf.clone());
        }
        if self.json {
            cfg.json = true;
        }
        if self.dry_run {
            cfg.dry_run = true;
        }
    }
}

pub fn parse() -> Args {
    Args::parse()
}
