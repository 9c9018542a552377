//! Filesystem operations: modularized.
//!
//! - `backend`: the `FileSystem` seam plus the host implementation.
//! - `memory`: in-memory backend for hermetic tests.
//! - `guard`: pure precondition checks.
//! - `operator`: check-then-act wrapper returning `Outcome`s.

mod backend;
pub mod guard;
mod helpers;
mod memory;
mod operator;
mod outcome;

pub use backend::{FileSystem, RealFs};
pub use helpers::describe_io_error;
pub use memory::MemoryFs;
pub use operator::GuardedFileOperator;
pub use outcome::{Conflict, Op, Outcome};
