//! Tracing initialization.
//! Every event goes to stdout and, when a log file is configured and can be opened
//! safely, is also appended to `<log_location>/LogFile.txt`.
//!
//! Behavior:
//! - Verbosity is driven by LogLevel (no RUST_LOG override here). The file layer never
//!   drops below `info`, so `quiet` silences the console but keeps the rename record.
//! - Compact human format by default, JSON with `--json`; the file uses the same format.
//! - File logging is refused if any ancestor of the log path is a symlink; the pass
//!   still runs with console output only.

use anyhow::Result;
use chrono::Local;
use file_renamer::output as out;
use file_renamer::platform::open_log_file_secure_append;
use file_renamer::{LogLevel, path_has_symlink_ancestor};
use std::fmt as stdfmt;
use std::path::Path;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::fmt as tsfmt;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::Layer;

/// Human-friendly timestamp formatter (DD/MM/YY HH:MM:SS)
struct LocalHumanTime;
impl FormatTime for LocalHumanTime {
    fn format_time(&self, w: &mut tsfmt::format::Writer<'_>) -> stdfmt::Result {
        write!(w, "{}", Local::now().format("%d/%m/%y %H:%M:%S"))
    }
}

fn console_directive(lvl: &LogLevel) -> &'static str {
    match lvl {
        LogLevel::Quiet => "error",
        LogLevel::Normal => "info",
        LogLevel::Info => "debug",
        LogLevel::Debug => "trace",
    }
}

/// Rename events are info-level; the log file keeps them at every verbosity.
fn file_directive(lvl: &LogLevel) -> &'static str {
    match lvl {
        LogLevel::Quiet => "info",
        other => console_directive(other),
    }
}

/// Open a non-blocking append writer for the log file, or explain on stderr why not.
fn maybe_open_non_blocking_writer(path: &Path) -> Option<(NonBlocking, WorkerGuard)> {
    match path_has_symlink_ancestor(path) {
        Ok(true) => {
            out::print_warn(&format!(
                "Refusing file logging: an ancestor of {} is a symlink",
                path.display()
            ));
            return None;
        }
        Err(e) => {
            out::print_warn(&format!(
                "Could not check log path {} for symlinks: {e}",
                path.display()
            ));
            return None;
        }
        Ok(false) => {}
    }

    match open_log_file_secure_append(path) {
        Ok(file) => Some(tracing_appender::non_blocking(file)),
        Err(e) => {
            out::print_warn(&format!("Failed to open log file {}: {e}", path.display()));
            None
        }
    }
}

/// Install the global subscriber. The returned guard must be held until exit so
/// buffered file output is flushed.
pub fn init_tracing(
    lvl: &LogLevel,
    log_file: Option<&Path>,
    json: bool,
) -> Result<Option<WorkerGuard>> {
    let (writer, guard) = match log_file.and_then(maybe_open_non_blocking_writer) {
        Some((w, g)) => (Some(w), Some(g)),
        None => (None, None),
    };
    if let Some(path) = log_file
        && writer.is_none()
    {
        out::print_warn(&format!(
            "Logging to '{}' is disabled for this run; events go to stdout only.",
            path.display()
        ));
    }

    if json {
        let stdout_layer = tsfmt::layer()
            .event_format(tsfmt::format().json())
            .with_timer(LocalHumanTime)
            .with_target(false)
            .with_filter(EnvFilter::new(console_directive(lvl)));
        let file_layer = writer.map(|w| {
            tsfmt::layer()
                .event_format(tsfmt::format().json())
                .with_timer(LocalHumanTime)
                .with_target(false)
                .with_ansi(false)
                .with_writer(w)
                .with_filter(EnvFilter::new(file_directive(lvl)))
        });
        registry()
            .with(stdout_layer)
            .with(file_layer)
            .try_init()?;
    } else {
        let stdout_layer = tsfmt::layer()
            .with_timer(LocalHumanTime)
            .with_target(false)
            .compact()
            .with_filter(EnvFilter::new(console_directive(lvl)));
        let file_layer = writer.map(|w| {
            tsfmt::layer()
                .with_timer(LocalHumanTime)
                .with_target(false)
                .with_ansi(false)
                .compact()
                .with_writer(w)
                .with_filter(EnvFilter::new(file_directive(lvl)))
        });
        registry()
            .with(stdout_layer)
            .with(file_layer)
            .try_init()?;
    }
    Ok(guard)
}
