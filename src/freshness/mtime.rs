//! Mtime-based freshness detection for published files.
//!
//! Published files are compared against their sources by modification time
//! only; contents are never read. The same timestamps feed the directory
//! hash and the `?v=` query parameter, so they are exposed as unix seconds.

use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

/// Get the modification time of a file
///
/// Returns `None` if the file doesn't exist or mtime cannot be read
pub fn get_mtime(path: &Path) -> Option<SystemTime> {
    path.metadata().and_then(|m| m.modified()).ok()
}

/// Modification time as whole seconds since the unix epoch.
///
/// Times before the epoch collapse to `0`.
pub fn mtime_secs(path: &Path) -> Option<u64> {
    let time = get_mtime(path)?;
    Some(
        time.duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0),
    )
}

/// Check whether `output` must be (re)written from `source`.
///
/// Stale means the output is missing, unreadable, or strictly older than the
/// source. An output with the same mtime as its source is fresh.
pub fn is_stale(source: &Path, output: &Path) -> bool {
    let Some(output_time) = get_mtime(output) else {
        return true;
    };
    match get_mtime(source) {
        Some(source_time) => output_time < source_time,
        None => true,
    }
}
