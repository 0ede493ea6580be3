//! Core configuration types.
//! - Config holds the settings of one rename pass; it is loaded once and passed by reference.
//! - LogLevel represents verbosity with simple parsing helpers.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use super::paths::default_log_dir;
use super::{DEFAULT_LOOKUP_QUERY, DEFAULT_MAX_LENGTH, LOG_FILE_NAME};

/// Program-defined verbosity levels exposed to users/config.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LogLevel {
    /// Only errors
    Quiet,
    /// Rename events and the run summary (default)
    #[default]
    Normal,
    /// Also per-entry decisions
    Info,
    /// Debug/trace
    Debug,
}

impl LogLevel {
    /// Parse common string names into our LogLevel (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "quiet" | "error" | "none" => Some(LogLevel::Quiet),
            "normal" => Some(LogLevel::Normal),
            "info" | "verbose" | "detailed" => Some(LogLevel::Info),
            "debug" | "trace" => Some(LogLevel::Debug),
            _ => None,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LogLevel::Quiet => "quiet",
            LogLevel::Normal => "normal",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
        };
        f.write_str(s)
    }
}

impl FromStr for LogLevel {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("invalid log level: '{s}'"))
    }
}

/// Runtime configuration for a rename pass.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory whose contents are renamed
    pub root: PathBuf,
    /// Naming store location (SQLite path, `file:` URI or `Data Source=...`)
    pub connection_string: String,
    /// Query taking one integer parameter and returning one name column
    pub lookup_query: String,
    /// Maximum length of a resolved name in characters (extension excluded)
    pub max_length: usize,
    /// Directory receiving the log file; platform data dir when unset
    pub log_location: Option<PathBuf>,
    /// Console and file verbosity
    pub log_level: LogLevel,
    /// If true, log the renames but do not modify the filesystem
    pub dry_run: bool,
}

impl Config {
    /// Construct a Config with the two required settings; other fields use defaults.
    pub fn new(root: impl Into<PathBuf>, connection_string: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            connection_string: connection_string.into(),
            lookup_query: DEFAULT_LOOKUP_QUERY.to_string(),
            max_length: DEFAULT_MAX_LENGTH,
            log_location: None,
            log_level: LogLevel::Normal,
            dry_run: false,
        }
    }

    /// Full path of the log file: `<log_location>/LogFile.txt`.
    pub fn log_file_path(&self) -> Option<PathBuf> {
        self.log_location
            .clone()
            .or_else(default_log_dir)
            .map(|dir| dir.join(LOG_FILE_NAME))
    }
}
