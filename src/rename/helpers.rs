//! I/O error helpers.
//!
//! Enriches io::Error with the failed operation, the path, and a hint about the usual
//! cause, for use with map_err:
//!   fs::rename(src, dst).map_err(io_error_with_help("rename", src))?;

use anyhow::anyhow;
use std::io;
use std::path::Path;

/// Hint from the raw OS code, if it is one we know.
#[cfg(unix)]
fn os_hint(code: i32) -> Option<&'static str> {
    match code {
        libc::EACCES | libc::EPERM => {
            Some("permission denied; check ownership of the entry and its parent directory")
        }
        libc::EBUSY => Some("resource busy; the entry may be in use or a mount point"),
        libc::EXDEV => Some("cross-filesystem rename is not possible"),
        libc::ENOENT => Some("path not found; it may have been moved or deleted during the pass"),
        libc::EEXIST | libc::ENOTEMPTY => Some("target already exists"),
        libc::EROFS => Some("read-only filesystem"),
        libc::ENAMETOOLONG => Some("name or path too long; lower max_length"),
        libc::ELOOP => Some("too many symbolic link levels; possible symlink cycle"),
        libc::EMFILE | libc::ENFILE => Some("too many open files"),
        libc::ENOSPC => Some("no space left on device"),
        _ => None,
    }
}

/// Common Win32 error codes.
#[cfg(windows)]
fn os_hint(code: i32) -> Option<&'static str> {
    match code {
        5 => Some("access denied; check permissions"),
        32 => Some("sharing violation; the file is in use"),
        17 => Some("cross-device rename is not possible"),
        2 | 3 => Some("path not found; it may have been moved or deleted during the pass"),
        80 | 183 => Some("target already exists"),
        206 => Some("name or path too long; lower max_length"),
        _ => None,
    }
}

#[cfg(not(any(unix, windows)))]
fn os_hint(_code: i32) -> Option<&'static str> {
    None
}

fn kind_hint(kind: io::ErrorKind) -> Option<&'static str> {
    match kind {
        io::ErrorKind::PermissionDenied => Some("permission denied; check ownership"),
        io::ErrorKind::NotFound => Some("path not found"),
        io::ErrorKind::AlreadyExists => Some("target already exists"),
        _ => None,
    }
}

fn build_message(op: &str, path: &Path, e: &io::Error) -> String {
    let mut msg = format!("{} '{}': {}", op, path.display(), e);
    let hint = e.raw_os_error().and_then(os_hint).or_else(|| kind_hint(e.kind()));
    if let Some(h) = hint {
        msg.push_str("; ");
        msg.push_str(h);
    }
    if let Some(code) = e.raw_os_error() {
        msg.push_str(&format!(" [os code: {code}]"));
    }
    msg
}

/// Returns a closure for `.map_err(...)` converting io::Error into a hinted anyhow::Error.
pub fn io_error_with_help<'a>(
    op: &'a str,
    path: &'a Path,
) -> impl FnOnce(io::Error) -> anyhow::Error + 'a {
    move |e: io::Error| anyhow!(build_message(op, path, &e))
}
