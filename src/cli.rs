//! CLI definition and parsing.
//! Running without arguments performs a rename pass using the discovered config file;
//! every flag is an optional override.
//!
//! Notes:
//! - --debug is a shorthand for --log-level debug and wins over it.

use clap::{Parser, ValueHint};
use std::path::PathBuf;

use crate::config::types::{Config, LogLevel};

/// Rename files and folders named by node id to their stored names.
/// CLI flags override config values (which are loaded from XML).
#[derive(Parser, Debug, Clone)]
#[command(
    author,
    version,
    about = "Rename files and folders using names from a naming database"
)]
pub struct Args {
    /// Config file to use instead of the discovered one.
    #[arg(long, short = 'c', value_name = "FILE", value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Override the root directory (normally configured via XML).
    #[arg(long, value_hint = ValueHint::DirPath, help = "Override the root directory to process")]
    pub root: Option<PathBuf>,

    /// Override the maximum name length.
    #[arg(long, value_name = "CHARS", help = "Override the maximum name length (characters)")]
    pub max_length: Option<usize>,

    /// Override the directory receiving LogFile.txt.
    #[arg(long, value_hint = ValueHint::DirPath, help = "Override the log directory")]
    pub log_location: Option<PathBuf>,

    /// Enable debug logging (equivalent to `--log-level debug`).
    #[arg(
        short = 'd',
        long,
        help = "Enable debug logging (shorthand for --log-level debug)"
    )]
    pub debug: bool,

    /// Set log level. One of: quiet, normal, info, debug.
    #[arg(long, help = "Set log level: quiet, normal, info, debug")]
    pub log_level: Option<String>,

    /// Print which config file would be used, then exit.
    #[arg(long, help = "Print the config file location and exit")]
    pub print_config: bool,

    /// Dry-run: log renames but do not modify the filesystem.
    #[arg(long, help = "Show what would be renamed without renaming anything")]
    pub dry_run: bool,

    /// Emit logs in structured JSON.
    #[arg(long, help = "Emit logs in structured JSON")]
    pub json: bool,
}

impl Args {
    /// Effective log level derived from flags.
    /// Precedence: --debug > --log-level value > None (use config value).
    pub fn effective_log_level(&self) -> Option<LogLevel> {
        if self.debug {
            return Some(LogLevel::Debug);
        }
        self.log_level.as_deref().and_then(LogLevel::parse)
    }

    /// Apply CLI overrides to a loaded Config (in-place). No-ops for unset flags.
    pub fn apply_overrides(&self, cfg: &mut Config) {
        if let Some(root) = &self.root {
            cfg.root = root.clone();
        }
        if let Some(max) = self.max_length {
            cfg.max_length = max;
        }
        if let Some(dir) = &self.log_location {
            cfg.log_location = Some(dir.clone());
        }
        if let Some(level) = self.effective_log_level() {
            cfg.log_level = level;
        }
        if self.dry_run {
            cfg.dry_run = true;
        }
    }
}

pub fn parse() -> Args {
    Args::parse()
}
