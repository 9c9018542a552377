//! Precondition checks.
//! Pure functions: they only inspect the filesystem and never mutate it.
//! Source conditions are checked before destination conditions.

use std::path::Path;

use super::backend::FileSystem;
use super::outcome::Conflict;

fn require_file<F: FileSystem + ?Sized>(fs: &F, path: &Path) -> Result<(), Conflict> {
    if fs.is_file(path) {
        Ok(())
    } else {
        Err(Conflict::NotFound(path.to_path_buf()))
    }
}

fn require_vacant_destination<F: FileSystem + ?Sized>(fs: &F, path: &Path) -> Result<(), Conflict> {
    if fs.exists(path) {
        Err(Conflict::DestinationExists(path.to_path_buf()))
    } else {
        Ok(())
    }
}

pub fn can_create<F: FileSystem + ?Sized>(fs: &F, path: &Path) -> Result<(), Conflict> {
    if fs.exists(path) {
        Err(Conflict::AlreadyExists(path.to_path_buf()))
    } else {
        Ok(())
    }
}

pub fn can_read<F: FileSystem + ?Sized>(fs: &F, path: &Path) -> Result<(), Conflict> {
    require_file(fs, path)
}

pub fn can_delete<F: FileSystem + ?Sized>(fs: &F, path: &Path) -> Result<(), Conflict> {
    require_file(fs, path)
}

pub fn can_copy<F: FileSystem + ?Sized>(fs: &F, src: &Path, dst: &Path) -> Result<(), Conflict> {
    require_file(fs, src)?;
    require_vacant_destination(fs, dst)
}

pub fn can_move<F: FileSystem + ?Sized>(fs: &F, src: &Path, dst: &Path) -> Result<(), Conflict> {
    require_file(fs, src)?;
    require_vacant_destination(fs, dst)
}

/// Only an existing directory blocks; a file at `path` is left for the backend to reject.
pub fn can_make_directory<F: FileSystem + ?Sized>(fs: &F, path: &Path) -> Result<(), Conflict> {
    if fs.is_dir(path) {
        Err(Conflict::AlreadyExists(path.to_path_buf()))
    } else {
        Ok(())
    }
}
