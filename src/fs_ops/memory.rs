//! In-memory filesystem backend for hermetic tests and dry demos.
//!
//! Files are byte buffers keyed by path; directories are a set of paths.
//! Path identity is component-wise (`a/b/` == `a/b`), no normalization of `.`/`..`.
//! Not `Sync`: the operator is single-threaded.

use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, BTreeSet};
use std::io::{self, BufRead, Cursor};
use std::path::{Path, PathBuf};

use super::backend::FileSystem;

#[derive(Debug, Default)]
pub struct MemoryFs {
    files: RefCell<BTreeMap<PathBuf, Vec<u8>>>,
    dirs: RefCell<BTreeSet<PathBuf>>,
    read_only: Cell<bool>,
}

impl MemoryFs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a file directly, bypassing guards. Parent directories are not required.
    pub fn insert_file(&self, path: impl Into<PathBuf>, contents: impl Into<Vec<u8>>) {
        self.files.borrow_mut().insert(path.into(), contents.into());
    }

    /// Seed a directory directly.
    pub fn insert_dir(&self, path: impl Into<PathBuf>) {
        self.dirs.borrow_mut().insert(path.into());
    }

    /// Current contents of a file, if present.
    pub fn contents(&self, path: impl AsRef<Path>) -> Option<Vec<u8>> {
        self.files.borrow().get(path.as_ref()).cloned()
    }

    /// Current contents as UTF-8 (lossy), if present.
    pub fn contents_string(&self, path: impl AsRef<Path>) -> Option<String> {
        self.contents(path)
            .map(|b| String::from_utf8_lossy(&b).into_owned())
    }

    /// When set, every mutation fails with `PermissionDenied`.
    pub fn set_read_only(&self, read_only: bool) {
        self.read_only.set(read_only);
    }

    pub fn file_count(&self) -> usize {
        self.files.borrow().len()
    }

    fn ensure_writable(&self, path: &Path) -> io::Result<()> {
        if self.read_only.get() {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                format!("read-only filesystem: {}", path.display()),
            ));
        }
        Ok(())
    }

    /// Bare names and the root need no parent; anything else needs its parent dir.
    fn ensure_parent(&self, path: &Path) -> io::Result<()> {
        match path.parent() {
            None => Ok(()),
            Some(p) if p.as_os_str().is_empty() || p.parent().is_none() => Ok(()),
            Some(p) if self.dirs.borrow().contains(p) => Ok(()),
            Some(p) => Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("parent directory missing: {}", p.display()),
            )),
        }
    }
}

fn not_found(path: &Path) -> io::Error {
    io::Error::new(io::ErrorKind::NotFound, format!("no such file: {}", path.display()))
}

fn already_exists(path: &Path) -> io::Error {
    io::Error::new(
        io::ErrorKind::AlreadyExists,
        format!("already exists: {}", path.display()),
    )
}

impl FileSystem for MemoryFs {
    fn is_file(&self, path: &Path) -> bool {
        self.files.borrow().contains_key(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.dirs.borrow().contains(path)
    }

    fn create_text(&self, path: &Path, text: &str) -> io::Result<()> {
        self.ensure_writable(path)?;
        if self.exists(path) {
            return Err(already_exists(path));
        }
        self.ensure_parent(path)?;
        self.insert_file(path, text.as_bytes());
        Ok(())
    }

    fn open_lines(&self, path: &Path) -> io::Result<Box<dyn BufRead + '_>> {
        let bytes = self.contents(path).ok_or_else(|| not_found(path))?;
        Ok(Box::new(Cursor::new(bytes)))
    }

    fn copy(&self, src: &Path, dst: &Path) -> io::Result<u64> {
        self.ensure_writable(dst)?;
        let bytes = self.contents(src).ok_or_else(|| not_found(src))?;
        if self.exists(dst) {
            return Err(already_exists(dst));
        }
        self.ensure_parent(dst)?;
        let len = bytes.len() as u64;
        self.insert_file(dst, bytes);
        Ok(len)
    }

    fn rename(&self, src: &Path, dst: &Path) -> io::Result<()> {
        self.ensure_writable(src)?;
        if !self.is_file(src) {
            return Err(not_found(src));
        }
        if self.is_dir(dst) {
            return Err(already_exists(dst));
        }
        self.ensure_parent(dst)?;
        let mut files = self.files.borrow_mut();
        if let Some(bytes) = files.remove(src) {
            files.insert(dst.to_path_buf(), bytes);
        }
        Ok(())
    }

    fn remove_file(&self, path: &Path) -> io::Result<()> {
        self.ensure_writable(path)?;
        self.files
            .borrow_mut()
            .remove(path)
            .map(|_| ())
            .ok_or_else(|| not_found(path))
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        self.ensure_writable(path)?;
        let chain: Vec<PathBuf> = path
            .ancestors()
            .filter(|a| !a.as_os_str().is_empty() && a.parent().is_some())
            .map(Path::to_path_buf)
            .collect();
        if let Some(blocker) = chain.iter().find(|a| self.is_file(a)) {
            return Err(io::Error::new(
                io::ErrorKind::AlreadyExists,
                format!("not a directory: {}", blocker.display()),
            ));
        }
        self.dirs.borrow_mut().extend(chain);
        Ok(())
    }
}
