//! Platform-specific helpers.
//! Hides Unix/other differences (file modes, directory fsync) behind a uniform API.

#[cfg(not(unix))]
mod other;
#[cfg(unix)]
mod unix;

#[cfg(not(unix))]
pub use other::{
    fsync_dir, open_log_file_secure_append, set_dir_mode_0700, write_config_secure_new_0600,
};
#[cfg(unix)]
pub use unix::{
    fsync_dir, open_log_file_secure_append, set_dir_mode_0700, write_config_secure_new_0600,
};

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

static TMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Unique hidden sibling name for atomic config writes.
/// Pattern: .file_renamer.config.tmp.<pid>.<nanos>.<seq>
fn tmp_config_sibling_name(target: &Path) -> PathBuf {
    let pid = std::process::id();
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(0);
    let seq = TMP_COUNTER.fetch_add(1, Ordering::Relaxed);
    let name = format!(".file_renamer.config.tmp.{pid}.{nanos}.{seq}");
    target.parent().unwrap_or_else(|| Path::new(".")).join(name)
}
