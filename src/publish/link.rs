//! Symlink publishing.
//!
//! Creating a symlink is not idempotent, and several processes may publish
//! the same source at once. Every link is therefore created optimistically:
//! if creation fails but the destination exists afterwards, another
//! publisher won the race and the link is accepted as is.

use std::io;
use std::path::Path;

use crate::debug;

use super::copy::create_dir_all_with_mode;
use super::error::{PublishError, Result};

/// Link a single file into its published location.
pub fn link_file(src: &Path, dst: &Path) -> Result<()> {
    if dst.is_file() {
        return Ok(());
    }
    create_link(src, dst, false, Path::is_file)
}

/// Link a whole directory, creating the parent of `dst` first.
pub fn link_directory(src: &Path, dst: &Path, dir_mode: u32) -> Result<()> {
    if dst.is_dir() {
        return Ok(());
    }
    if let Some(parent) = dst.parent() {
        create_dir_all_with_mode(parent, dir_mode)?;
    }
    create_link(src, dst, true, Path::is_dir)
}

fn create_link(src: &Path, dst: &Path, is_dir: bool, present: fn(&Path) -> bool) -> Result<()> {
    match symlink(src, dst, is_dir) {
        Ok(()) => {
            debug!("link"; "{} -> {}", dst.display(), src.display());
            Ok(())
        }
        Err(_) if present(dst) => {
            debug!("link"; "already linked by a concurrent publisher: {}", dst.display());
            Ok(())
        }
        Err(source) => Err(PublishError::LinkFailed {
            src: src.to_path_buf(),
            dst: dst.to_path_buf(),
            source,
        }),
    }
}

#[cfg(unix)]
fn symlink(src: &Path, dst: &Path, _is_dir: bool) -> io::Result<()> {
    std::os::unix::fs::symlink(src, dst)
}

#[cfg(windows)]
fn symlink(src: &Path, dst: &Path, is_dir: bool) -> io::Result<()> {
    if is_dir {
        std::os::windows::fs::symlink_dir(src, dst)
    } else {
        std::os::windows::fs::symlink_file(src, dst)
    }
}
