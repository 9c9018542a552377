//! Guarded file operator.
//!
//! Each operation runs its precondition check first and only then performs the
//! mutation. Expected conflicts come back as `Outcome::Skipped`; host failures
//! after a passed check come back as `Outcome::Failed`. Nothing is raised.

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};

use super::backend::FileSystem;
use super::guard;
use super::helpers::{describe_io_error, is_cross_device};
use super::outcome::{Conflict, Op, Outcome};

/// Line terminator appended by `create` unless the content already ends with one.
const LINE_END: char = '\n';

/// Host error from an action, optionally pinned to a path other than the
/// operation's primary one.
struct ActError {
    path: Option<PathBuf>,
    source: io::Error,
}

impl ActError {
    fn at(path: &Path, source: io::Error) -> Self {
        Self {
            path: Some(path.to_path_buf()),
            source,
        }
    }
}

impl From<io::Error> for ActError {
    fn from(source: io::Error) -> Self {
        Self { path: None, source }
    }
}

pub struct GuardedFileOperator<F: FileSystem> {
    fs: F,
    dry_run: bool,
}

impl<F: FileSystem> GuardedFileOperator<F> {
    pub fn new(fs: F) -> Self {
        Self { fs, dry_run: false }
    }

    /// In dry-run mode checks still run, mutations are reported as `DryRun` and skipped.
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    pub fn filesystem(&self) -> &F {
        &self.fs
    }

    /// Create `path` holding `content` as line-terminated text. Refuses if `path` is occupied.
    pub fn create(&self, path: impl AsRef<Path>, content: &str) -> Outcome {
        let path = path.as_ref();
        self.gate(Op::Create, guard::can_create(&self.fs, path), path, || {
            if content.ends_with(LINE_END) {
                Ok(self.fs.create_text(path, content)?)
            } else {
                let mut text = String::with_capacity(content.len() + 1);
                text.push_str(content);
                text.push(LINE_END);
                Ok(self.fs.create_text(path, &text)?)
            }
        })
    }

    /// Stream `path` line by line into `sink`. Refuses if `path` is not an existing file.
    ///
    /// Lines are copied as raw bytes, so content that is not valid UTF-8 still
    /// reads. A trailing `\r\n` is normalized to `\n`.
    pub fn read<W: Write + ?Sized>(&self, path: impl AsRef<Path>, sink: &mut W) -> Outcome {
        let path = path.as_ref();
        self.gate(Op::Read, guard::can_read(&self.fs, path), path, || {
            let mut reader = self.fs.open_lines(path)?;
            let mut line = Vec::new();
            let mut count = 0usize;
            loop {
                line.clear();
                if reader.read_until(b'\n', &mut line)? == 0 {
                    break;
                }
                let body = line.strip_suffix(b"\n").unwrap_or(&line[..]);
                let body = body.strip_suffix(b"\r").unwrap_or(body);
                sink.write_all(body)?;
                sink.write_all(b"\n")?;
                count += 1;
            }
            sink.flush()?;
            debug!(path = %path.display(), lines = count, "read complete");
            Ok(())
        })
    }

    /// Remove `path`. Refuses if it is not an existing file.
    pub fn delete(&self, path: impl AsRef<Path>) -> Outcome {
        let path = path.as_ref();
        self.gate(Op::Delete, guard::can_delete(&self.fs, path), path, || {
            Ok(self.fs.remove_file(path)?)
        })
    }

    /// Duplicate `src` into `dst`. Refuses if `src` is missing or `dst` is occupied.
    pub fn copy(&self, src: impl AsRef<Path>, dst: impl AsRef<Path>) -> Outcome {
        let (src, dst) = (src.as_ref(), dst.as_ref());
        self.gate(Op::Copy, guard::can_copy(&self.fs, src, dst), dst, || {
            let bytes = self.fs.copy(src, dst)?;
            debug!(src = %src.display(), dst = %dst.display(), bytes, "copied");
            Ok(())
        })
    }

    /// Relocate `src` to `dst`. Refuses if `src` is missing or `dst` is occupied.
    ///
    /// Tries a rename first; across filesystems it falls back to copy then remove.
    pub fn move_file(&self, src: impl AsRef<Path>, dst: impl AsRef<Path>) -> Outcome {
        let (src, dst) = (src.as_ref(), dst.as_ref());
        self.gate(Op::Move, guard::can_move(&self.fs, src, dst), dst, || {
            match self.fs.rename(src, dst) {
                Err(e) if is_cross_device(&e) => {
                    warn!(error = %e, src = %src.display(), dst = %dst.display(), "Rename crosses filesystems; copying instead");
                    self.fs.copy(src, dst)?;
                    if let Err(e) = self.fs.remove_file(src) {
                        // Source stays put, so the copy must not survive.
                        if let Err(undo) = self.fs.remove_file(dst) {
                            error!(dst = %dst.display(), error = %undo, "Could not remove copied destination");
                        }
                        return Err(ActError::at(src, e));
                    }
                    Ok(())
                }
                other => other.map_err(ActError::from),
            }
        })
    }

    /// Create directory `path` and any missing parents. Refuses if it already exists.
    pub fn make_directory(&self, path: impl AsRef<Path>) -> Outcome {
        let path = path.as_ref();
        self.gate(
            Op::MakeDirectory,
            guard::can_make_directory(&self.fs, path),
            path,
            || Ok(self.fs.create_dir_all(path)?),
        )
    }

    /// Check-then-act core shared by every operation.
    fn gate(
        &self,
        op: Op,
        check: Result<(), Conflict>,
        path: &Path,
        act: impl FnOnce() -> Result<(), ActError>,
    ) -> Outcome {
        if let Err(conflict) = check {
            warn!(
                op = %op,
                kind = conflict.kind(),
                path = %conflict.path().display(),
                "Precondition failed; skipping"
            );
            return Outcome::Skipped { op, conflict };
        }

        if self.dry_run && op.mutates() {
            info!(op = %op, path = %path.display(), "dry-run");
            return Outcome::DryRun(op);
        }

        match act() {
            Ok(()) => {
                info!(op = %op, path = %path.display(), "Operation completed");
                Outcome::Completed(op)
            }
            Err(ActError { path: failed_at, source }) => {
                let path = failed_at.as_deref().unwrap_or(path);
                let error = describe_io_error(&op.to_string(), path, &source);
                error!(op = %op, path = %path.display(), error = %source, "Operation failed");
                Outcome::Failed {
                    op,
                    path: path.to_path_buf(),
                    error,
                }
            }
        }
    }
}
