//! Collision handling: pick the first free candidate `base`, `base~1`, `base~2`, ...

use anyhow::Result;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::trace;

use super::name::ResolvedName;
use crate::errors::RenamerError;

/// Upper bound on suffix attempts for a single entry.
pub const MAX_COLLISION_ATTEMPTS: u32 = 10_000;

/// Where an entry should go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// The entry already carries the resolved name.
    Unchanged,
    /// A path that did not exist when checked.
    Free(PathBuf),
}

/// True if anything (file, directory, dangling symlink) occupies `path`.
/// Errors other than NotFound count as occupied.
pub fn path_is_taken(path: &Path) -> bool {
    match fs::symlink_metadata(path) {
        Ok(_) => true,
        Err(e) => e.kind() != io::ErrorKind::NotFound,
    }
}

/// Choose the target for `current` inside `dir`.
///
/// `is_taken` decides occupancy so dry runs can also treat earlier planned targets as used.
pub fn choose_target(
    dir: &Path,
    current: &Path,
    resolved: &ResolvedName,
    is_taken: impl Fn(&Path) -> bool,
) -> Result<Target> {
    for attempt in 0..=MAX_COLLISION_ATTEMPTS {
        let candidate = dir.join(resolved.candidate(attempt));
        if candidate == current {
            return Ok(Target::Unchanged);
        }
        if !is_taken(&candidate) {
            return Ok(Target::Free(candidate));
        }
        if attempt == 3 {
            trace!(base = resolved.base(), dir = %dir.display(), "collision: several suffixes taken, still searching");
        }
    }
    Err(RenamerError::CollisionsExhausted {
        path: current.to_path_buf(),
        attempts: MAX_COLLISION_ATTEMPTS,
    }
    .into())
}
