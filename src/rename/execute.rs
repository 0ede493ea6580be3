//! Rename executor: the only place the walker mutates the filesystem.

use anyhow::Result;
use std::fs;
use std::io;
use std::path::Path;
use tracing::info;

use super::FsEntry;
use super::collision::path_is_taken;
use super::helpers::io_error_with_help;
use crate::platform::fsync_dir;

/// Rename `src` to `dest`, refusing to replace anything already at `dest`.
/// std's rename would silently replace files (and empty directories on Unix).
fn rename_no_clobber(src: &Path, dest: &Path) -> io::Result<()> {
    if path_is_taken(dest) {
        return Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("destination appeared before rename: {}", dest.display()),
        ));
    }
    fs::rename(src, dest)
}

/// Move `entry` to `dest` and emit the rename event (console + log file).
/// In dry-run mode only the event is emitted.
pub fn apply_rename(entry: &FsEntry, dest: &Path, dry_run: bool) -> Result<()> {
    let label = entry.kind.label();
    if dry_run {
        info!(
            kind = %entry.kind,
            src = %entry.path.display(),
            dest = %dest.display(),
            "Would rename {}: {} to {}",
            label.to_ascii_lowercase(),
            entry.path.display(),
            dest.display()
        );
        return Ok(());
    }

    rename_no_clobber(&entry.path, dest).map_err(io_error_with_help("rename", &entry.path))?;

    // Persisting the directory entry is best-effort; the rename itself already succeeded.
    if let Some(parent) = dest.parent() {
        let _ = fsync_dir(parent);
    }

    info!(
        kind = %entry.kind,
        src = %entry.path.display(),
        dest = %dest.display(),
        "{} renamed: {} to {}",
        label,
        entry.path.display(),
        dest.display()
    );
    Ok(())
}
