//! Operation outcomes.
//! Every guarded operation returns an [`Outcome`] instead of a `Result`; the
//! `Display` impl renders the one-line status a user sees.

use std::fmt;
use std::path::{Path, PathBuf};

/// The six guarded operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    Create,
    Read,
    Delete,
    Copy,
    Move,
    MakeDirectory,
}

impl Op {
    /// Verb used in refusal messages ("Cannot <verb>! ...").
    pub fn verb(self) -> &'static str {
        match self {
            Op::Create => "write",
            Op::Read => "read",
            Op::Delete => "delete",
            Op::Copy => "copy",
            Op::Move => "move",
            Op::MakeDirectory => "create directory",
        }
    }

    /// False only for `Read`.
    pub fn mutates(self) -> bool {
        !matches!(self, Op::Read)
    }

    fn done(self) -> &'static str {
        match self {
            Op::Create => "File created",
            Op::Read => "Finished reading",
            Op::Delete => "File deleted",
            Op::Copy => "File copied",
            Op::Move => "File moved",
            Op::MakeDirectory => "Directory created",
        }
    }

    fn planned(self) -> &'static str {
        match self {
            Op::Create => "create file",
            Op::Read => "read file",
            Op::Delete => "delete file",
            Op::Copy => "copy file",
            Op::Move => "move file",
            Op::MakeDirectory => "create directory",
        }
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Op::Create => "create",
            Op::Read => "read",
            Op::Delete => "delete",
            Op::Copy => "copy",
            Op::Move => "move",
            Op::MakeDirectory => "mkdir",
        };
        f.write_str(s)
    }
}

/// Why a precondition did not hold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Conflict {
    /// A file the operation needs is missing.
    NotFound(PathBuf),
    /// The target of a create/mkdir is already present.
    AlreadyExists(PathBuf),
    /// The destination of a copy/move is already present.
    DestinationExists(PathBuf),
}

impl Conflict {
    pub fn path(&self) -> &Path {
        match self {
            Conflict::NotFound(p) | Conflict::AlreadyExists(p) | Conflict::DestinationExists(p) => p,
        }
    }

    /// Short machine-friendly label for structured logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Conflict::NotFound(_) => "not_found",
            Conflict::AlreadyExists(_) => "already_exists",
            Conflict::DestinationExists(_) => "destination_exists",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The action ran.
    Completed(Op),
    /// A precondition failed; nothing was touched.
    Skipped { op: Op, conflict: Conflict },
    /// Preconditions held; dry-run mode suppressed the mutation.
    DryRun(Op),
    /// Preconditions held but the host filesystem rejected the action.
    Failed { op: Op, path: PathBuf, error: String },
}

impl Outcome {
    pub fn op(&self) -> Op {
        match self {
            Outcome::Completed(op) | Outcome::DryRun(op) => *op,
            Outcome::Skipped { op, .. } | Outcome::Failed { op, .. } => *op,
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, Outcome::Completed(_))
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, Outcome::Skipped { .. })
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Outcome::Failed { .. })
    }

    pub fn conflict(&self) -> Option<&Conflict> {
        match self {
            Outcome::Skipped { conflict, .. } => Some(conflict),
            _ => None,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Completed(op) => f.write_str(op.done()),
            Outcome::Skipped { op, conflict } => match (op, conflict) {
                (Op::MakeDirectory, Conflict::AlreadyExists(_)) => {
                    f.write_str("Directory already exists")
                }
                (_, Conflict::AlreadyExists(_)) => {
                    write!(f, "Cannot {}! File already exists", op.verb())
                }
                (_, Conflict::NotFound(_)) => {
                    write!(f, "Cannot {}! File does not exist", op.verb())
                }
                (_, Conflict::DestinationExists(_)) => {
                    write!(f, "Cannot {}! Destination file already exists", op.verb())
                }
            },
            Outcome::DryRun(op) => write!(f, "Dry-run: would {}", op.planned()),
            Outcome::Failed { op, error, .. } => write!(f, "Cannot {}! {}", op.verb(), error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn skipped(op: Op, conflict: Conflict) -> String {
        Outcome::Skipped { op, conflict }.to_string()
    }

    #[test]
    fn refusal_lines_match_operation() {
        let p = PathBuf::from("x.txt");
        assert_eq!(
            skipped(Op::Create, Conflict::AlreadyExists(p.clone())),
            "Cannot write! File already exists"
        );
        assert_eq!(
            skipped(Op::Delete, Conflict::NotFound(p.clone())),
            "Cannot delete! File does not exist"
        );
        assert_eq!(
            skipped(Op::Copy, Conflict::DestinationExists(p.clone())),
            "Cannot copy! Destination file already exists"
        );
        assert_eq!(
            skipped(Op::MakeDirectory, Conflict::AlreadyExists(p)),
            "Directory already exists"
        );
    }

    #[test]
    fn completed_and_dry_run_lines() {
        assert_eq!(Outcome::Completed(Op::Move).to_string(), "File moved");
        assert_eq!(
            Outcome::DryRun(Op::MakeDirectory).to_string(),
            "Dry-run: would create directory"
        );
    }

    #[test]
    fn accessors() {
        let o = Outcome::Skipped {
            op: Op::Read,
            conflict: Conflict::NotFound(PathBuf::from("gone")),
        };
        assert_eq!(o.op(), Op::Read);
        assert!(o.is_skipped());
        assert_eq!(o.conflict().map(Conflict::kind), Some("not_found"));
        assert_eq!(o.conflict().map(Conflict::path), Some(Path::new("gone")));
        assert!(!Op::Read.mutates());
        assert!(Op::Delete.mutates());
    }
}
