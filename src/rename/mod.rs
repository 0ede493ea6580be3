//! Renaming: walker, name resolution, collision handling and the rename executor.

mod collision;
mod execute;
mod helpers;
mod name;
mod walker;

pub use collision::{MAX_COLLISION_ATTEMPTS, Target, choose_target, path_is_taken};
pub use execute::apply_rename;
pub use helpers::io_error_with_help;
pub use name::{
    DISALLOWED_CHARS, NameResolver, ResolvedName, SUFFIX_SEPARATOR, parse_node_id, sanitize_name,
    truncate_name,
};
pub use walker::{EntryOutcome, Renamer};

use std::fmt;
use std::path::PathBuf;

/// Kind of a filesystem entry as seen by the walker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
}

impl EntryKind {
    /// Capitalized label used in rename events.
    pub fn label(&self) -> &'static str {
        match self {
            EntryKind::File => "File",
            EntryKind::Directory => "Directory",
        }
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            EntryKind::File => "file",
            EntryKind::Directory => "directory",
        })
    }
}

/// One enumerated entry. Symlinks carry the kind of their target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FsEntry {
    pub path: PathBuf,
    pub kind: EntryKind,
    pub is_symlink: bool,
}

/// Counters for one pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenameSummary {
    pub scanned: usize,
    pub files_renamed: usize,
    pub dirs_renamed: usize,
    pub unchanged: usize,
    pub invalid: usize,
    pub skipped: usize,
}

impl RenameSummary {
    pub fn renamed(&self) -> usize {
        self.files_renamed + self.dirs_renamed
    }
}
