//! XML configuration support.
//! - Loads settings from config.xml (quick_xml + serde).
//! - Creates a secure template at the platform default location when none exists.
//!
//! Notes:
//! - This module only reads/writes the config file; path validation happens in `validate`.
//! - Unknown XML elements are rejected so typos surface before any rename happens.

use anyhow::{Context, Result};
use quick_xml::de::from_str as from_xml_str;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use super::paths::{ConfigLocation, ConfigSource, default_log_dir, path_has_symlink_ancestor};
use super::types::{Config, LogLevel};
use super::{DEFAULT_LOOKUP_QUERY, DEFAULT_MAX_LENGTH};
use crate::errors::RenamerError;
use crate::platform::{set_dir_mode_0700, write_config_secure_new_0600};

/// Struct mirroring the XML config for deserialization.
/// Everything is read as text and converted in `xml_to_config` so values can be trimmed
/// and reported with the element name when they don't parse.
#[derive(Debug, Deserialize)]
#[serde(rename = "config")]
#[serde(deny_unknown_fields)]
struct XmlConfig {
    path: Option<String>,
    connection_string: Option<String>,
    lookup_query: Option<String>,
    max_length: Option<String>,
    log_location: Option<String>,
    log_level: Option<String>,
    dry_run: Option<String>,
}

/// Outcome of loading the config at a located path.
#[derive(Debug)]
pub enum LoadResult {
    Loaded(Box<Config>),
    /// No config existed at the platform default; a template was written there.
    CreatedTemplate(PathBuf),
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}

fn required<'a>(value: Option<&'a str>, tag: &str) -> Result<&'a str> {
    non_empty(value).ok_or_else(|| {
        RenamerError::InvalidConfig(format!("<{tag}> is missing or empty")).into()
    })
}

fn parse_bool(value: &str, tag: &str) -> Result<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "yes" | "1" => Ok(true),
        "false" | "no" | "0" => Ok(false),
        other => Err(RenamerError::InvalidConfig(format!(
            "<{tag}> must be true or false, got '{other}'"
        ))
        .into()),
    }
}

// Map XmlConfig -> Config
fn xml_to_config(parsed: XmlConfig) -> Result<Config> {
    let root = required(parsed.path.as_deref(), "path")?;
    let connection_string = required(parsed.connection_string.as_deref(), "connection_string")?;
    let mut cfg = Config::new(PathBuf::from(root), connection_string);

    cfg.lookup_query = non_empty(parsed.lookup_query.as_deref())
        .unwrap_or(DEFAULT_LOOKUP_QUERY)
        .to_string();

    if let Some(raw) = non_empty(parsed.max_length.as_deref()) {
        cfg.max_length = raw.parse::<usize>().map_err(|_| {
            RenamerError::InvalidConfig(format!(
                "<max_length> must be a positive integer, got '{raw}'"
            ))
        })?;
    }

    cfg.log_location = non_empty(parsed.log_location.as_deref()).map(PathBuf::from);

    if let Some(raw) = non_empty(parsed.log_level.as_deref()) {
        cfg.log_level = raw
            .parse::<LogLevel>()
            .map_err(RenamerError::InvalidConfig)?;
    }

    if let Some(raw) = non_empty(parsed.dry_run.as_deref()) {
        cfg.dry_run = parse_bool(raw, "dry_run")?;
    }

    Ok(cfg)
}

/// Load a Config from a specific XML file path.
pub fn load_config_from_xml_path(path: &Path) -> Result<Config> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("read config xml '{}'", path.display()))?;
    let parsed: XmlConfig = from_xml_str(&contents)
        .with_context(|| format!("parse config xml '{}'", path.display()))?;
    xml_to_config(parsed).with_context(|| format!("invalid config xml '{}'", path.display()))
}

/// Load the located config, or write a template when the platform default is missing.
///
/// A missing file named explicitly (flag or env var) is an error: the user asked for it.
pub fn load_or_init(location: &ConfigLocation) -> Result<LoadResult> {
    if location.path.exists() {
        let cfg = load_config_from_xml_path(&location.path)?;
        return Ok(LoadResult::Loaded(Box::new(cfg)));
    }

    if location.source == ConfigSource::PlatformDefault {
        create_template_config(&location.path)?;
        return Ok(LoadResult::CreatedTemplate(location.path.clone()));
    }

    Err(RenamerError::InvalidConfig(format!(
        "config file from {} does not exist: {}",
        location.source,
        location.path.display()
    ))
    .into())
}

/// Create a commented template config file and its parent directory.
/// Uses secure creation to avoid following attacker-controlled symlinks on Unix.
pub fn create_template_config(path: &Path) -> Result<()> {
    if path_has_symlink_ancestor(path)? {
        return Err(anyhow::anyhow!(
            "Refusing to create config: ancestor of {} is a symlink",
            path.display()
        ));
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
        let _ = set_dir_mode_0700(parent);
    }

    let suggested_log_dir = default_log_dir()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "/path/to/logs".into());

    let content = format!(
        "<!--\n  file_renamer configuration (XML)\n\n    path               -> root directory whose files and folders are renamed (required)\n    connection_string  -> naming database: SQLite file path, file: URI or Data Source=... (required)\n    lookup_query       -> query taking the numeric id as ?1 and returning the new name\n    max_length         -> maximum name length in characters, extension excluded\n    log_location       -> directory that receives LogFile.txt\n    log_level          -> quiet | normal | info | debug\n    dry_run            -> true to only log what would be renamed\n\n  CLI flags override XML values.\n-->\n<config>\n  <path>/path/to/root</path>\n  <connection_string>/path/to/naming.sqlite</connection_string>\n  <lookup_query>{}</lookup_query>\n  <max_length>{}</max_length>\n  <log_location>{}</log_location>\n  <log_level>normal</log_level>\n  <dry_run>true</dry_run>\n</config>\n",
        DEFAULT_LOOKUP_QUERY, DEFAULT_MAX_LENGTH, suggested_log_dir
    );

    write_config_secure_new_0600(path, content.as_bytes())?;

    info!("Created template config at {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn template_parses_back_into_a_config() {
        let td = tempdir().unwrap();
        // Canonical base so platforms with a symlinked temp dir don't trip the ancestor check.
        let base = fs::canonicalize(td.path()).unwrap();
        let path = base.join("nested").join("config.xml");
        create_template_config(&path).unwrap();

        let cfg = load_config_from_xml_path(&path).unwrap();
        assert_eq!(cfg.root, PathBuf::from("/path/to/root"));
        assert_eq!(cfg.lookup_query, DEFAULT_LOOKUP_QUERY);
        assert_eq!(cfg.max_length, DEFAULT_MAX_LENGTH);
        assert!(cfg.dry_run, "template should default to a dry run");
    }

    #[test]
    fn parse_bool_accepts_common_spellings() {
        assert!(parse_bool("TRUE", "dry_run").unwrap());
        assert!(!parse_bool("no", "dry_run").unwrap());
        assert!(parse_bool("maybe", "dry_run").is_err());
    }
}
