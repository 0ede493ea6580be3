//! Config module.
//! Provides configuration types, config file discovery, XML loading, and validation.

pub mod paths;
pub mod types;
mod validate;
pub mod xml;

pub use paths::{
    ConfigLocation, ConfigSource, default_config_path, default_log_dir, locate_config,
    path_has_symlink_ancestor,
};
pub use types::{Config, LogLevel};
pub use validate::validate_and_normalize;
pub use xml::{LoadResult, create_template_config, load_config_from_xml_path, load_or_init};

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "FILE_RENAMER_CONFIG";
pub const CONFIG_FILE_NAME: &str = "config.xml";
/// Name of the append-only log file inside `log_location`.
pub const LOG_FILE_NAME: &str = "LogFile.txt";
pub const DEFAULT_LOOKUP_QUERY: &str = "SELECT Name FROM Container WHERE NodeId = ?1";
/// Typical POSIX filename limit.
pub const DEFAULT_MAX_LENGTH: usize = 255;
