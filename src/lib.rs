//! Core library for `file_renamer`.
//!
//! Walks a directory tree depth-first and renames every file and folder whose name is a
//! numeric node id to the name stored for that id, after stripping characters that are
//! not allowed in file names, limiting the length, and adding `~n` on collisions.
//!
//! Layout:
//! - `config`: XML config discovery, loading and validation
//! - `store`: the `NameStore` capability and its SQLite / in-memory implementations
//! - `rename`: walker, name resolver, collision handling, rename executor
//! - `platform`, `output`, `shutdown`: OS helpers, user-facing printing, Ctrl-C flag

pub mod cli;
pub mod config;
pub mod errors;
pub mod output;
pub mod platform;
pub mod rename;
pub mod shutdown;
pub mod store;

pub use config::{
    Config, ConfigLocation, ConfigSource, LoadResult, LogLevel, default_config_path,
    default_log_dir, load_config_from_xml_path, load_or_init, locate_config,
    path_has_symlink_ancestor, validate_and_normalize,
};
pub use errors::RenamerError;
pub use rename::{
    EntryKind, EntryOutcome, FsEntry, NameResolver, RenameSummary, Renamer, ResolvedName,
    sanitize_name, truncate_name,
};
pub use store::{MemoryStore, NameStore, SqliteStore};

use anyhow::Result;

/// Run one rename pass over `config.root` with the given store.
pub fn rename_all<S: NameStore + ?Sized>(config: &Config, store: &S) -> Result<RenameSummary> {
    Renamer::new(config, store).run()
}
