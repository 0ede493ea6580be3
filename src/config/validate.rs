//! Config validation logic.
//! Runs before the naming store is opened and before any entry is touched, so a bad
//! config never leaves a half-renamed tree behind.

use anyhow::{Context, Result, bail};
use std::fs;
use std::path::Path;
use tracing::{debug, error, info};

use super::types::Config;
use crate::errors::RenamerError;

/// Validate settings and normalize paths in place.
///
/// - root must exist, be a directory and be readable; it is canonicalized.
/// - connection_string and lookup_query must be non-empty.
/// - max_length must be at least 1.
/// - log_location, when set, is created if missing and must be writable.
pub fn validate_and_normalize(cfg: &mut Config) -> Result<()> {
    if cfg.connection_string.trim().is_empty() {
        bail!(RenamerError::InvalidConfig(
            "connection_string must not be empty".into()
        ));
    }
    if cfg.lookup_query.trim().is_empty() {
        bail!(RenamerError::InvalidConfig(
            "lookup_query must not be empty".into()
        ));
    }
    if cfg.max_length == 0 {
        bail!(RenamerError::InvalidConfig(
            "max_length must be at least 1".into()
        ));
    }

    ensure_root(&cfg.root)?;
    cfg.root = dunce::canonicalize(&cfg.root)
        .with_context(|| format!("canonicalize root '{}'", cfg.root.display()))?;

    if let Some(dir) = cfg.log_location.clone() {
        ensure_dir_is_or_create(&dir, "log_location")?;
        ensure_writable(&dir, "log_location")?;
        cfg.log_location = Some(dunce::canonicalize(&dir).unwrap_or(dir));
    }

    info!(
        root = %cfg.root.display(),
        max_length = cfg.max_length,
        dry_run = cfg.dry_run,
        log_file = %cfg
            .log_file_path()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "<none>".into()),
        "Config validated"
    );
    Ok(())
}

/// Root must exist, be a directory, and be listable.
fn ensure_root(path: &Path) -> Result<()> {
    if !path.is_dir() {
        error!("root is missing or not a directory: {}", path.display());
        bail!(RenamerError::RootInvalid(path.to_path_buf()));
    }
    fs::read_dir(path).with_context(|| {
        format!("Cannot read root directory '{}'; check permissions", path.display())
    })?;
    debug!("root readable: {}", path.display());
    Ok(())
}

/// Ensure directory exists (create if missing). If exists, it must be a directory.
fn ensure_dir_is_or_create(path: &Path, name: &str) -> Result<()> {
    if path.exists() {
        if !path.is_dir() {
            error!("{name} exists but isn't a directory: {}", path.display());
            bail!(RenamerError::InvalidConfig(format!(
                "{name} exists but isn't a directory: {}",
                path.display()
            )));
        }
    } else {
        fs::create_dir_all(path)
            .with_context(|| format!("Failed to create {name} directory '{}'", path.display()))?;
        info!("Created {name} directory: {}", path.display());
    }
    Ok(())
}

/// Ensure directory is writable using a throwaway probe file.
fn ensure_writable(path: &Path, name: &str) -> Result<()> {
    let probe = path.join(format!(".file_renamer.probe.{}", std::process::id()));
    fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&probe)
        .with_context(|| format!("Cannot write to {name} '{}'; check permissions", path.display()))?;
    let _ = fs::remove_file(&probe);
    debug!("{name} writable: {}", path.display());
    Ok(())
}
