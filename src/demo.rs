//! Scripted walkthrough of every guarded operation, including the refusals.
//!
//! On a clean directory the sequence is: create, refused re-create, read,
//! copy, read copy, delete copy, refused read, mkdir, move, read moved,
//! refused read of the moved-away source. A second run without cleanup shows
//! the other branch: the source is re-created and the move is refused.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::fs_ops::{FileSystem, GuardedFileOperator, Outcome};

pub const SOURCE_FILE: &str = "test.txt";
pub const COPY_FILE: &str = "default.txt";
pub const MOVE_DIR: &str = "temp";
pub const MOVED_NAME: &str = "moved.txt";

pub const SOURCE_TEXT: &str = "This is a test file.
It's not very interesting.
But it does have multiple lines!
Written by guardfs.";

const REPLACEMENT_TEXT: &str = "This is a new file";

/// One executed step of the scenario.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub label: String,
    pub outcome: Outcome,
}

/// Path of the moved file relative to the scenario root.
pub fn moved_file() -> PathBuf {
    Path::new(MOVE_DIR).join(MOVED_NAME)
}

struct Script<'a, F: FileSystem, W: Write + ?Sized> {
    op: &'a GuardedFileOperator<F>,
    sink: &'a mut W,
    steps: Vec<Step>,
}

impl<F: FileSystem, W: Write + ?Sized> Script<'_, F, W> {
    fn record(&mut self, label: String, outcome: Outcome) -> io::Result<()> {
        writeln!(self.sink, "{outcome}")?;
        writeln!(self.sink)?;
        self.steps.push(Step { label, outcome });
        Ok(())
    }

    fn header(&mut self, label: &str) -> io::Result<()> {
        writeln!(self.sink, "> {label}")
    }

    fn create(&mut self, path: &Path, text: &str) -> io::Result<()> {
        let label = format!("create {}", path.display());
        self.header(&label)?;
        let outcome = self.op.create(path, text);
        self.record(label, outcome)
    }

    fn read(&mut self, path: &Path) -> io::Result<()> {
        let label = format!("read {}", path.display());
        self.header(&label)?;
        let outcome = self.op.read(path, &mut *self.sink);
        self.record(label, outcome)
    }

    fn copy(&mut self, src: &Path, dst: &Path) -> io::Result<()> {
        let label = format!("copy {} -> {}", src.display(), dst.display());
        self.header(&label)?;
        let outcome = self.op.copy(src, dst);
        self.record(label, outcome)
    }

    fn move_file(&mut self, src: &Path, dst: &Path) -> io::Result<()> {
        let label = format!("move {} -> {}", src.display(), dst.display());
        self.header(&label)?;
        let outcome = self.op.move_file(src, dst);
        self.record(label, outcome)
    }

    fn delete(&mut self, path: &Path) -> io::Result<()> {
        let label = format!("delete {}", path.display());
        self.header(&label)?;
        let outcome = self.op.delete(path);
        self.record(label, outcome)
    }

    fn make_directory(&mut self, path: &Path) -> io::Result<()> {
        let label = format!("mkdir {}", path.display());
        self.header(&label)?;
        let outcome = self.op.make_directory(path);
        self.record(label, outcome)
    }
}

/// Run the scenario against `op`, narrating to `sink`.
///
/// With `cleanup` the three artifacts are deleted at the end so the next run
/// starts clean. Only a failing `sink` produces an `Err`.
pub fn run_scenario<F: FileSystem, W: Write + ?Sized>(
    op: &GuardedFileOperator<F>,
    sink: &mut W,
    cleanup: bool,
) -> io::Result<Vec<Step>> {
    let source = Path::new(SOURCE_FILE);
    let copy = Path::new(COPY_FILE);
    let moved = moved_file();

    let mut script = Script {
        op,
        sink,
        steps: Vec::new(),
    };

    script.create(source, SOURCE_TEXT)?;
    script.create(source, REPLACEMENT_TEXT)?;
    script.read(source)?;
    script.copy(source, copy)?;
    script.read(copy)?;
    script.delete(copy)?;
    script.read(copy)?;
    script.make_directory(Path::new(MOVE_DIR))?;
    script.move_file(source, &moved)?;
    script.read(&moved)?;
    script.read(source)?;

    if cleanup {
        script.delete(source)?;
        script.delete(copy)?;
        script.delete(&moved)?;
    }

    script.sink.flush()?;
    Ok(script.steps)
}
