//! Filesystem path helpers.
//!
//! - `normalize_path` - absolute form for configured directories
//! - `resolve_path` - config-relative paths with a fallback root
//! - `file_name` - base name as an owned string
//! - `is_writable` - effective write access for the running process

use std::path::{Path, PathBuf};

/// Normalize a file system path to absolute form.
///
/// Tries `canonicalize()` first (resolves symlinks, `.`, `..`).
/// Falls back to:
/// - Return as-is if already absolute
/// - Join with current directory if relative
#[inline]
pub fn normalize_path(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            std::env::current_dir().map_or_else(|_| path.to_path_buf(), |cwd| cwd.join(path))
        }
    })
}

/// Resolve a configured path against the directory holding the config file.
///
/// Absolute paths are kept, relative ones are joined onto `root`.
/// The result is normalized, so an existing directory comes back canonical.
#[inline]
pub fn resolve_path(path: &Path, root: &Path) -> PathBuf {
    if path.is_absolute() {
        return normalize_path(path);
    }
    normalize_path(&root.join(path))
}

/// Base name of a path, lossily converted.
///
/// Returns an empty string for paths without a final component (`/`, `..`).
#[inline]
pub fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Whether the running process may create entries under `path`.
///
/// Asks the kernel (`access(2)` with `W_OK`), so the effective uid and
/// capabilities decide rather than the mode bits alone.
#[cfg(unix)]
pub fn is_writable(path: &Path) -> bool {
    rustix::fs::access(path, rustix::fs::Access::WRITE_OK).is_ok()
}

#[cfg(not(unix))]
pub fn is_writable(path: &Path) -> bool {
    path.metadata().is_ok_and(|meta| !meta.permissions().readonly())
}
