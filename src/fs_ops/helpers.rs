//! I/O helper utilities.
//!
//! Enriches io::Error with the operation, the path and an actionable hint so a
//! failed outcome tells the user what to check.
//!
//! Usage:
//!   let msg = describe_io_error("create file", path, &e);

use std::io;
use std::path::Path;

fn hint_for(e: &io::Error) -> Option<&'static str> {
    if is_cross_device(e) {
        return Some("cross-filesystem; atomic rename not possible");
    }
    match e.kind() {
        io::ErrorKind::PermissionDenied => {
            Some("permission denied; check ownership and write permissions")
        }
        io::ErrorKind::NotFound => Some("path not found; verify the parent directory exists"),
        io::ErrorKind::AlreadyExists => {
            Some("already exists; it appeared after the check, remove it or pick another name")
        }
        io::ErrorKind::StorageFull => Some("insufficient space on device"),
        io::ErrorKind::ReadOnlyFilesystem => Some("read-only filesystem; cannot write here"),
        io::ErrorKind::IsADirectory | io::ErrorKind::NotADirectory => {
            Some("file/directory mismatch along the path")
        }
        io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut => {
            Some("busy/timed out; retry after the current write finishes")
        }
        _ => None,
    }
}

/// Format "<op> '<path>': <error>[; <hint>][ [os code: N]]".
pub fn describe_io_error(op: &str, path: &Path, e: &io::Error) -> String {
    let text = e.to_string();
    let mut msg = format!("{} '{}': {}", op, path.display(), text);
    if let Some(hint) = hint_for(e) {
        // Drop the hint's lead phrase when the error text already says it.
        let hint = match hint.split_once("; ") {
            Some((lead, rest)) if text.starts_with(lead) => rest,
            _ => hint,
        };
        msg.push_str("; ");
        msg.push_str(hint);
    }
    if let Some(code) = e.raw_os_error() {
        msg.push_str(&format!(" [os code: {}]", code));
    }
    msg
}

/// True for EXDEV / ERROR_NOT_SAME_DEVICE, i.e. a rename that must become copy+remove.
pub fn is_cross_device(e: &io::Error) -> bool {
    if e.kind() == io::ErrorKind::CrossesDevices {
        return true;
    }
    match e.raw_os_error() {
        #[cfg(unix)]
        Some(18) => true,
        #[cfg(windows)]
        Some(17) => true,
        _ => false,
    }
}
