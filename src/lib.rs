//! Core library for `guardfs`.
//!
//! Existence-guarded file operations: every action checks the state it
//! assumes (file present, destination free) before touching the filesystem,
//! and reports a conflict as a value instead of failing.
//!
//! Layout:
//! - `fs_ops`: the `FileSystem` seam, precondition checks and the operator.
//! - `demo`: a scripted walkthrough of every operation.
//! - `faults`: small recoverable-error demonstrations.
//! - `config`, `cli`, `output`, `platform`, `errors`: the tool around it.

pub mod cli;
pub mod config;
pub mod demo;
pub mod errors;
pub mod faults;
pub mod fs_ops;
pub mod output;
pub mod platform;

pub use config::{default_config_path, load_config, path_has_symlink_ancestor, Config, LogLevel};
pub use errors::GuardFsError;
pub use fs_ops::{Conflict, FileSystem, GuardedFileOperator, MemoryFs, Op, Outcome, RealFs};
