//! Config file discovery and default path helpers.
//! Determines where the config is read from, OS-appropriate default locations,
//! and detects symlinked ancestors for safety.

use anyhow::{Result, bail};
use dirs::{config_dir, data_dir};
use std::env;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::{CONFIG_ENV, CONFIG_FILE_NAME};

/// Where a config path came from; decides whether a missing file may be templated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSource {
    /// `--config` flag
    Flag,
    /// `FILE_RENAMER_CONFIG` environment variable
    Env,
    /// `config.xml` in the current working directory
    WorkingDir,
    /// Platform config directory
    PlatformDefault,
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ConfigSource::Flag => "--config flag",
            ConfigSource::Env => CONFIG_ENV,
            ConfigSource::WorkingDir => "working directory",
            ConfigSource::PlatformDefault => "platform default",
        };
        f.write_str(s)
    }
}

/// A resolved config file path and its origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigLocation {
    pub path: PathBuf,
    pub source: ConfigSource,
}

/// OS-appropriate default config path (`<config_dir>/file_renamer/config.xml`).
pub fn default_config_path() -> Option<PathBuf> {
    if let Some(mut base) = config_dir() {
        base.push("file_renamer");
        base.push(CONFIG_FILE_NAME);
        Some(base)
    } else {
        env::var("HOME").ok().map(|h| {
            PathBuf::from(h)
                .join(".config")
                .join("file_renamer")
                .join(CONFIG_FILE_NAME)
        })
    }
}

/// OS-appropriate default log directory (data dir).
pub fn default_log_dir() -> Option<PathBuf> {
    if let Some(mut base) = data_dir() {
        base.push("file_renamer");
        Some(base)
    } else {
        env::var("HOME").ok().map(|h| {
            PathBuf::from(h)
                .join(".local")
                .join("share")
                .join("file_renamer")
        })
    }
}

/// Pick the config file to use.
///
/// Order: explicit flag, `FILE_RENAMER_CONFIG`, `./config.xml`, platform default.
/// The returned path may not exist; the caller decides what that means for its source.
pub fn locate_config(explicit: Option<&Path>) -> Result<ConfigLocation> {
    if let Some(p) = explicit {
        return Ok(ConfigLocation {
            path: p.to_path_buf(),
            source: ConfigSource::Flag,
        });
    }

    if let Some(raw) = env::var_os(CONFIG_ENV)
        && !raw.is_empty()
    {
        return Ok(ConfigLocation {
            path: PathBuf::from(raw),
            source: ConfigSource::Env,
        });
    }

    if let Ok(cwd) = env::current_dir() {
        let local = cwd.join(CONFIG_FILE_NAME);
        if local.is_file() {
            return Ok(ConfigLocation {
                path: local,
                source: ConfigSource::WorkingDir,
            });
        }
    }

    match default_config_path() {
        Some(path) => Ok(ConfigLocation {
            path,
            source: ConfigSource::PlatformDefault,
        }),
        None => bail!(
            "Could not determine a config location; set {CONFIG_ENV} or pass --config"
        ),
    }
}

/// Return true if any existing ancestor of `path` is a symlink.
pub fn path_has_symlink_ancestor(path: &Path) -> io::Result<bool> {
    let mut p = path.parent();
    while let Some(anc) = p {
        if anc.exists() {
            let meta = fs::symlink_metadata(anc)?;
            if meta.file_type().is_symlink() {
                return Ok(true);
            }
        }
        p = anc.parent();
    }
    Ok(false)
}
