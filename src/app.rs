//! Application orchestrator.
//! Locates and loads the config, applies CLI overrides, initializes logging, installs the
//! Ctrl-C handler, validates, opens the naming store and runs one rename pass.

use anyhow::{Context, Result};
use std::sync::{Arc, Mutex};
use tracing::{debug, error, info};

use file_renamer::cli::Args;
use file_renamer::output as out;
use file_renamer::{
    LoadResult, RenameSummary, Renamer, RenamerError, SqliteStore, load_or_init, locate_config,
    shutdown, validate_and_normalize,
};

use crate::logging::init_tracing;

/// Run the CLI application.
pub fn run(args: Args) -> Result<()> {
    let location = locate_config(args.config.as_deref())?;

    if args.print_config {
        out::print_info(&format!(
            "file_renamer config ({}):\n  {}",
            location.source,
            location.path.display()
        ));
        if location.path.exists() {
            out::print_info("A config file exists at that location.");
        } else {
            out::print_info("No config file exists there yet. Run without --print-config to create a template.");
        }
        return Ok(());
    }

    // Template creation happens before logging init; nothing to log to yet.
    let mut cfg = match load_or_init(&location)? {
        LoadResult::Loaded(cfg) => *cfg,
        LoadResult::CreatedTemplate(path) => {
            out::print_success(&format!("A template config was written to: {}", path.display()));
            out::print_info("Set <path> and <connection_string>, review <dry_run>, then re-run. To use another file pass --config or set FILE_RENAMER_CONFIG.");
            return Ok(());
        }
    };
    args.apply_overrides(&mut cfg);

    let log_path = cfg.log_file_path();
    let guard_opt = init_tracing(&cfg.log_level, log_path.as_deref(), args.json).map_err(|e| {
        out::print_error(&format!("Failed to initialize logging: {e}"));
        e
    })?;

    // The guard is dropped on Ctrl-C as well so buffered log lines reach the file.
    let guard_slot = Arc::new(Mutex::new(guard_opt));
    {
        let guard_slot = Arc::clone(&guard_slot);
        ctrlc::set_handler(move || {
            shutdown::request();
            out::print_warn("Received interrupt; stopping after the current entry...");
            if let Ok(mut g) = guard_slot.lock() {
                let _ = g.take();
            }
        })
        .context("install Ctrl-C handler")?;
    }

    debug!(
        config = %location.path.display(),
        source = %location.source,
        ?args,
        "Starting file_renamer"
    );

    let result = (|| -> Result<RenameSummary> {
        validate_and_normalize(&mut cfg)?;
        let store = SqliteStore::open(&cfg.connection_string, &cfg.lookup_query)?;
        Renamer::new(&cfg, &store).run()
    })();

    match &result {
        Ok(summary) => {
            if cfg.dry_run {
                out::print_info(&format!(
                    "Dry-run: {} entries would be renamed; nothing was changed.",
                    summary.renamed()
                ));
            }
            info!(renamed = summary.renamed(), "Done");
        }
        Err(e) => log_failure(e),
    }

    // Ensure logs are flushed before exit
    if let Ok(mut g) = guard_slot.lock() {
        let _ = g.take();
    }

    result.map(|_| ())
}

/// Structured error event for a failed pass.
fn log_failure(e: &anyhow::Error) {
    let Some(re) = e.downcast_ref::<RenamerError>() else {
        error!(error = ?e, "Rename pass failed");
        return;
    };
    let code = re.code();
    match re {
        RenamerError::RootInvalid(path) => {
            error!(code, kind = "root_invalid", path = %path.display(), "Rename pass failed")
        }
        RenamerError::InvalidConfig(msg) => {
            error!(code, kind = "invalid_config", %msg, "Rename pass failed")
        }
        RenamerError::Store(msg) => {
            error!(code, kind = "store", %msg, "Rename pass failed")
        }
        RenamerError::CollisionsExhausted { path, attempts } => {
            error!(code, kind = "collisions_exhausted", path = %path.display(), attempts = *attempts, "Rename pass failed")
        }
        RenamerError::Interrupted => {
            error!(code, kind = "interrupted", "Rename pass aborted by user")
        }
    }
}
