//! Filesystem backend seam.
//!
//! The operator never touches `std::fs` directly; it goes through [`FileSystem`]
//! so the same guarded logic runs against the host filesystem ([`RealFs`]) or an
//! in-memory one (`MemoryFs`) in tests.
//!
//! Handle scoping: every method that opens a file owns the handle for the length
//! of the call. `open_lines` hands the reader to the caller, which drops it
//! before reporting an outcome.

use std::fs::{self, File, OpenOptions};
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Primitive filesystem actions used by the guarded operator.
pub trait FileSystem {
    /// True if a regular file (following symlinks) exists at `path`.
    fn is_file(&self, path: &Path) -> bool;

    /// True if a directory exists at `path`.
    fn is_dir(&self, path: &Path) -> bool;

    /// True if anything (file or directory) occupies `path`.
    fn exists(&self, path: &Path) -> bool {
        self.is_file(path) || self.is_dir(path)
    }

    /// Create a new file and write `text` to it. Fails if `path` already exists.
    fn create_text(&self, path: &Path, text: &str) -> io::Result<()>;

    /// Open `path` for buffered line reading.
    fn open_lines(&self, path: &Path) -> io::Result<Box<dyn BufRead + '_>>;

    /// Copy the bytes of `src` into a newly created `dst`. Never clobbers `dst`.
    fn copy(&self, src: &Path, dst: &Path) -> io::Result<u64>;

    /// Rename `src` to `dst`.
    fn rename(&self, src: &Path, dst: &Path) -> io::Result<()>;

    fn remove_file(&self, path: &Path) -> io::Result<()>;

    /// Create `path` and any missing parents.
    fn create_dir_all(&self, path: &Path) -> io::Result<()>;
}

/// Host filesystem backend.
///
/// With a root set, relative paths are resolved against it; absolute paths are
/// used as-is.
#[derive(Debug, Clone, Default)]
pub struct RealFs {
    root: Option<PathBuf>,
}

impl RealFs {
    /// Backend that resolves relative paths against the process working directory.
    pub fn new() -> Self {
        Self { root: None }
    }

    /// Backend that resolves relative paths against `root`.
    pub fn rooted(root: impl Into<PathBuf>) -> Self {
        Self {
            root: Some(root.into()),
        }
    }

    pub fn root(&self) -> Option<&Path> {
        self.root.as_deref()
    }

    /// Resolve `path` against the configured root (if any).
    pub fn resolve(&self, path: &Path) -> PathBuf {
        match &self.root {
            Some(root) => root.join(path),
            None => path.to_path_buf(),
        }
    }
}

impl FileSystem for RealFs {
    fn is_file(&self, path: &Path) -> bool {
        self.resolve(path).is_file()
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.resolve(path).is_dir()
    }

    fn exists(&self, path: &Path) -> bool {
        // symlink_metadata so a dangling symlink still counts as occupying the path
        fs::symlink_metadata(self.resolve(path)).is_ok()
    }

    fn create_text(&self, path: &Path, text: &str) -> io::Result<()> {
        let file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(self.resolve(path))?;
        let mut writer = BufWriter::new(file);
        writer.write_all(text.as_bytes())?;
        writer.flush()?;
        writer.get_ref().sync_all()
    }

    fn open_lines(&self, path: &Path) -> io::Result<Box<dyn BufRead + '_>> {
        let file = File::open(self.resolve(path))?;
        Ok(Box::new(BufReader::new(file)))
    }

    fn copy(&self, src: &Path, dst: &Path) -> io::Result<u64> {
        let src_path = self.resolve(src);
        let dst_path = self.resolve(dst);

        let src_file = File::open(&src_path)?;
        let perms = src_file.metadata()?.permissions();
        let dst_file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&dst_path)?;

        let copied = (|| -> io::Result<u64> {
            let mut reader = BufReader::new(src_file);
            let mut writer = BufWriter::new(dst_file);
            let bytes = io::copy(&mut reader, &mut writer)?;
            writer.flush()?;
            let dst_file = writer.get_ref();
            dst_file.sync_all()?;
            // Best-effort: a copy that cannot carry permissions is still a copy.
            let _ = dst_file.set_permissions(perms);
            Ok(bytes)
        })();

        if copied.is_err() {
            // We created dst above, so a partial file is ours to clean up.
            let _ = fs::remove_file(&dst_path);
        }
        copied
    }

    fn rename(&self, src: &Path, dst: &Path) -> io::Result<()> {
        fs::rename(self.resolve(src), self.resolve(dst))
    }

    fn remove_file(&self, path: &Path) -> io::Result<()> {
        fs::remove_file(self.resolve(path))
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        fs::create_dir_all(self.resolve(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::prelude::*;

    #[test]
    fn rooted_resolves_relative_and_keeps_absolute() {
        let temp = assert_fs::TempDir::new().unwrap();
        let fs = RealFs::rooted(temp.path());
        assert_eq!(fs.resolve(Path::new("a.txt")), temp.path().join("a.txt"));
        let abs = temp.path().join("b.txt");
        assert_eq!(fs.resolve(&abs), abs);
    }

    #[test]
    fn copy_refuses_existing_destination() {
        let temp = assert_fs::TempDir::new().unwrap();
        temp.child("src.txt").write_str("new").unwrap();
        temp.child("dst.txt").write_str("old").unwrap();

        let fs = RealFs::rooted(temp.path());
        let err = fs
            .copy(Path::new("src.txt"), Path::new("dst.txt"))
            .expect_err("create_new must refuse");
        assert_eq!(err.kind(), io::ErrorKind::AlreadyExists);
        temp.child("dst.txt").assert("old");
    }

    #[test]
    fn create_text_then_open_lines() {
        let temp = assert_fs::TempDir::new().unwrap();
        let fs = RealFs::rooted(temp.path());
        fs.create_text(Path::new("notes.txt"), "one\ntwo\n").unwrap();

        let lines: Vec<String> = fs
            .open_lines(Path::new("notes.txt"))
            .unwrap()
            .lines()
            .collect::<io::Result<_>>()
            .unwrap();
        assert_eq!(lines, vec!["one", "two"]);
    }

    #[cfg(unix)]
    #[test]
    fn dangling_symlink_counts_as_occupied() {
        let temp = assert_fs::TempDir::new().unwrap();
        let link = temp.child("dangling");
        std::os::unix::fs::symlink(temp.path().join("missing"), link.path()).unwrap();

        let fs = RealFs::rooted(temp.path());
        assert!(!fs.is_file(Path::new("dangling")));
        assert!(fs.exists(Path::new("dangling")));
    }
}
