//! Depth-first renaming walker.
//!
//! Directories are processed from an explicit stack, so tree depth never turns into call
//! depth. A directory is pushed under its post-rename path, after its own rename.

use anyhow::Result;
use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use super::collision::{Target, choose_target, path_is_taken};
use super::execute::apply_rename;
use super::helpers::io_error_with_help;
use super::name::NameResolver;
use super::{EntryKind, FsEntry, RenameSummary};
use crate::config::Config;
use crate::errors::RenamerError;
use crate::shutdown;
use crate::store::NameStore;

/// What happened to one entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryOutcome {
    /// Resolved name equals the current name (or nothing usable was resolved).
    Unchanged,
    /// Name is not valid UTF-8 and cannot be looked up or sanitized.
    Skipped,
    /// Moved (or, in a dry run, planned) to this path.
    Renamed(PathBuf),
}

/// Sorted child paths of `dir`.
fn list_entries(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for entry in fs::read_dir(dir).map_err(io_error_with_help("read directory", dir))? {
        let entry = entry.map_err(io_error_with_help("read directory entry", dir))?;
        paths.push(entry.path());
    }
    paths.sort();
    Ok(paths)
}

/// Classify a path at processing time. Ok(None) means "invalid path": it vanished, is a
/// dangling symlink, or is neither a file nor a directory.
fn classify(path: &Path) -> Result<Option<FsEntry>> {
    let lmeta = match fs::symlink_metadata(path) {
        Ok(m) => m,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(io_error_with_help("inspect", path)(e)),
    };

    let is_symlink = lmeta.file_type().is_symlink();
    let meta = if is_symlink {
        match fs::metadata(path) {
            Ok(m) => m,
            Err(_) => return Ok(None),
        }
    } else {
        lmeta
    };

    let kind = if meta.is_file() {
        EntryKind::File
    } else if meta.is_dir() {
        EntryKind::Directory
    } else {
        return Ok(None);
    };

    Ok(Some(FsEntry {
        path: path.to_path_buf(),
        kind,
        is_symlink,
    }))
}

/// Renames every entry below a root using names from a [`NameStore`].
pub struct Renamer<'a, S: NameStore + ?Sized> {
    config: &'a Config,
    resolver: NameResolver<'a, S>,
    // Dry runs don't move anything: targets they would occupy and sources they would
    // free are tracked so suffixes match what a real pass picks.
    planned: HashSet<PathBuf>,
    vacated: HashSet<PathBuf>,
}

impl<'a, S: NameStore + ?Sized> Renamer<'a, S> {
    pub fn new(config: &'a Config, store: &'a S) -> Self {
        Self {
            config,
            resolver: NameResolver::new(store, config.max_length),
            planned: HashSet::new(),
            vacated: HashSet::new(),
        }
    }

    /// Run a pass over the configured root.
    pub fn run(&mut self) -> Result<RenameSummary> {
        let root = self.config.root.clone();
        info!(root = %root.display(), dry_run = self.config.dry_run, "Starting rename pass");
        let summary = self.rename_tree(&root)?;
        info!(
            scanned = summary.scanned,
            files = summary.files_renamed,
            directories = summary.dirs_renamed,
            unchanged = summary.unchanged,
            invalid = summary.invalid,
            skipped = summary.skipped,
            "Rename pass finished"
        );
        Ok(summary)
    }

    /// Rename everything below `root` (the root itself keeps its name).
    pub fn rename_tree(&mut self, root: &Path) -> Result<RenameSummary> {
        let mut summary = RenameSummary::default();
        let mut pending = vec![root.to_path_buf()];

        while let Some(dir) = pending.pop() {
            let mut subdirs = Vec::new();

            for path in list_entries(&dir)? {
                if shutdown::is_requested() {
                    return Err(RenamerError::Interrupted.into());
                }
                summary.scanned += 1;

                let Some(entry) = classify(&path)? else {
                    warn!(path = %path.display(), "Invalid path: {}", path.display());
                    summary.invalid += 1;
                    continue;
                };

                let outcome = self.process_entry(&dir, &entry)?;
                let current = match &outcome {
                    EntryOutcome::Renamed(dest) => {
                        match entry.kind {
                            EntryKind::File => summary.files_renamed += 1,
                            EntryKind::Directory => summary.dirs_renamed += 1,
                        }
                        if self.config.dry_run {
                            entry.path.clone()
                        } else {
                            dest.clone()
                        }
                    }
                    EntryOutcome::Unchanged => {
                        summary.unchanged += 1;
                        entry.path.clone()
                    }
                    EntryOutcome::Skipped => {
                        summary.skipped += 1;
                        entry.path.clone()
                    }
                };

                if entry.kind == EntryKind::Directory {
                    if entry.is_symlink {
                        debug!(path = %current.display(), "Not descending into symlinked directory");
                    } else {
                        subdirs.push(current);
                    }
                }
            }

            // Reverse so the first subdirectory is popped first.
            pending.extend(subdirs.into_iter().rev());
        }

        Ok(summary)
    }

    /// Resolve, pick a free target and rename a single entry inside `dir`.
    pub fn process_entry(&mut self, dir: &Path, entry: &FsEntry) -> Result<EntryOutcome> {
        let Some(name) = entry.path.file_name().and_then(|n| n.to_str()) else {
            debug!(path = %entry.path.display(), "Name is not valid UTF-8; skipping");
            return Ok(EntryOutcome::Skipped);
        };

        let Some(resolved) = self.resolver.resolve(name, entry.kind)? else {
            debug!(path = %entry.path.display(), "Nothing usable resolved; leaving as is");
            return Ok(EntryOutcome::Unchanged);
        };

        let dry_run = self.config.dry_run;
        let (planned, vacated) = (&self.planned, &self.vacated);
        let target = choose_target(dir, &entry.path, &resolved, |p| {
            if dry_run {
                planned.contains(p) || (path_is_taken(p) && !vacated.contains(p))
            } else {
                path_is_taken(p)
            }
        })?;

        match target {
            Target::Unchanged => {
                debug!(path = %entry.path.display(), "Name unchanged");
                Ok(EntryOutcome::Unchanged)
            }
            Target::Free(dest) => {
                apply_rename(entry, &dest, dry_run)?;
                if dry_run {
                    self.vacated.remove(&dest);
                    self.vacated.insert(entry.path.clone());
                    self.planned.insert(dest.clone());
                }
                Ok(EntryOutcome::Renamed(dest))
            }
        }
    }
}
