//! Recursive directory copy with filtering and hooks.
//!
//! ```text
//! src/                       dst/ (= base_path/<hash>)
//! ├── app.css          →     ├── app.css
//! ├── .gitignore             │   (hidden: skipped by default)
//! ├── fonts/           →     ├── fonts/
//! │   └── a.woff2      →     │   └── a.woff2
//! └── empty/                 (no surviving files: not created)
//! ```

use std::fs;
use std::path::Path;

use crate::debug;
use crate::freshness::is_stale;

use super::error::{PublishError, Result};
use super::filter::PathFilter;
use super::options::{AfterFile, BeforeFile, CopyOptions};

/// Counters reported by a directory copy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CopyStats {
    /// Files written.
    pub copied: usize,
    /// Files left alone because the destination was up to date.
    pub fresh: usize,
}

/// Resolved state shared by the whole walk.
struct Walk<'a> {
    filter: PathFilter,
    before: Option<&'a BeforeFile>,
    after: Option<&'a AfterFile>,
    dir_mode: u32,
    file_mode: Option<u32>,
}

/// Copy `src` into `dst` recursively.
///
/// Skipped entirely when `dst` already exists and `force_overwrite` is not
/// set; an existing directory counts as published.
pub fn copy_directory(src: &Path, dst: &Path, options: &CopyOptions) -> Result<CopyStats> {
    if !options.force_overwrite.unwrap_or(false) && dst.is_dir() {
        debug!("copy"; "already published: {}", dst.display());
        return Ok(CopyStats::default());
    }

    let walk = Walk {
        filter: PathFilter::new(&options.only, &options.except, options.case_sensitive)?,
        before: options.before_file.as_ref(),
        after: options.after_file.as_ref(),
        dir_mode: options.dir_mode.unwrap_or(0o775),
        file_mode: options.file_mode,
    };

    let mut stats = CopyStats::default();
    copy_dir_recursive(src, dst, "", &walk, &mut stats)?;
    debug!("copy"; "{} -> {} ({} copied, {} fresh)",
        src.display(), dst.display(), stats.copied, stats.fresh);
    Ok(stats)
}

fn copy_dir_recursive(
    src_dir: &Path,
    dst_dir: &Path,
    rel_dir: &str,
    walk: &Walk<'_>,
    stats: &mut CopyStats,
) -> Result<()> {
    let mut entries = fs::read_dir(src_dir)
        .map_err(|e| PublishError::io(src_dir, e))?
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| PublishError::io(src_dir, e))?;
    entries.sort_by_key(|e| e.file_name());

    for entry in entries {
        let from = entry.path();
        let file_name = entry.file_name();
        let to = dst_dir.join(&file_name);
        let name = file_name.to_string_lossy();
        let rel = if rel_dir.is_empty() {
            name.to_string()
        } else {
            format!("{rel_dir}/{name}")
        };
        let is_dir = from.is_dir();

        if !walk.filter.accepts(&rel, is_dir) {
            continue;
        }
        let allowed = match walk.before {
            Some(hook) => hook(&from, &to),
            None => !is_hidden(&from),
        };
        if !allowed {
            continue;
        }

        if is_dir {
            copy_dir_recursive(&from, &to, &rel, walk, stats)?;
        } else {
            create_dir_all_with_mode(dst_dir, walk.dir_mode)?;
            if copy_file(&from, &to, walk.file_mode)? {
                stats.copied += 1;
                if let Some(hook) = walk.after {
                    hook(&from, &to);
                }
            } else {
                stats.fresh += 1;
            }
        }
    }

    Ok(())
}

/// Default entry filter: dot-files and dot-directories are never published.
fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .is_some_and(|n| n.to_string_lossy().starts_with('.'))
}

/// Copy a single file unless the destination is already up to date.
///
/// Returns whether the file was written. `file_mode` is applied on a
/// best-effort basis.
pub fn copy_file(src: &Path, dst: &Path, file_mode: Option<u32>) -> Result<bool> {
    if !is_stale(src, dst) {
        return Ok(false);
    }
    fs::copy(src, dst).map_err(|e| PublishError::io(dst, e))?;
    if let Some(mode) = file_mode {
        set_mode(dst, mode);
    }
    Ok(true)
}

/// Create `dir` and any missing parents, applying `mode` to each directory
/// this call creates.
///
/// A directory created concurrently by someone else is not an error.
pub fn create_dir_all_with_mode(dir: &Path, mode: u32) -> Result<()> {
    if dir.is_dir() {
        return Ok(());
    }
    if let Some(parent) = dir.parent()
        && !parent.as_os_str().is_empty()
    {
        create_dir_all_with_mode(parent, mode)?;
    }
    match fs::create_dir(dir) {
        Ok(()) => {
            set_mode(dir, mode);
            Ok(())
        }
        Err(_) if dir.is_dir() => Ok(()),
        Err(e) => Err(PublishError::io(dir, e)),
    }
}

/// Apply permission bits, ignoring failures.
#[cfg(unix)]
pub fn set_mode(path: &Path, mode: u32) {
    use std::os::unix::fs::PermissionsExt;

    if let Err(e) = fs::set_permissions(path, fs::Permissions::from_mode(mode)) {
        debug!("copy"; "chmod {:o} failed for {}: {}", mode, path.display(), e);
    }
}

#[cfg(not(unix))]
pub fn set_mode(_path: &Path, _mode: u32) {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tempfile::TempDir;

    fn fixture() -> TempDir {
        let dir = TempDir::new().unwrap();
        let src = dir.path().join("src");
        fs::create_dir_all(src.join("sub")).unwrap();
        fs::create_dir_all(src.join("empty")).unwrap();
        fs::create_dir_all(src.join(".git")).unwrap();
        fs::write(src.join("a.txt"), "a").unwrap();
        fs::write(src.join(".hidden"), "h").unwrap();
        fs::write(src.join("b.log"), "b").unwrap();
        fs::write(src.join("sub/c.txt"), "c").unwrap();
        fs::write(src.join(".git/HEAD"), "ref").unwrap();
        dir
    }

    #[test]
    fn test_default_skips_hidden_and_empty() {
        let dir = fixture();
        let dst = dir.path().join("dst");

        let stats = copy_directory(&dir.path().join("src"), &dst, &CopyOptions::new()).unwrap();

        assert_eq!(stats.copied, 3);
        assert!(dst.join("a.txt").is_file());
        assert!(dst.join("b.log").is_file());
        assert!(dst.join("sub/c.txt").is_file());
        assert!(!dst.join(".hidden").exists());
        assert!(!dst.join(".git").exists());
        assert!(!dst.join("empty").exists());
    }

    #[test]
    fn test_only_pattern() {
        let dir = fixture();
        let dst = dir.path().join("dst");
        let options = CopyOptions::new().only(["*.txt"]);

        copy_directory(&dir.path().join("src"), &dst, &options).unwrap();

        assert!(dst.join("a.txt").is_file());
        assert!(dst.join("sub/c.txt").is_file());
        assert!(!dst.join("b.log").exists());
    }

    #[test]
    fn test_except_pattern_prunes_directory() {
        let dir = fixture();
        let dst = dir.path().join("dst");
        let options = CopyOptions::new().except(["sub/", "*.log"]);

        copy_directory(&dir.path().join("src"), &dst, &options).unwrap();

        assert!(dst.join("a.txt").is_file());
        assert!(!dst.join("sub").exists());
        assert!(!dst.join("b.log").exists());
    }

    #[test]
    fn test_before_hook_overrides_hidden_filter() {
        let dir = fixture();
        let dst = dir.path().join("dst");
        let options = CopyOptions::new().before_file(|from, _| !from.ends_with("sub"));

        copy_directory(&dir.path().join("src"), &dst, &options).unwrap();

        // Custom hook replaces the dot-file default
        assert!(dst.join(".hidden").is_file());
        assert!(dst.join(".git/HEAD").is_file());
        assert!(!dst.join("sub").exists());
    }

    #[test]
    fn test_after_hook_counts_copies() {
        let dir = fixture();
        let dst = dir.path().join("dst");
        let count = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&count);
        let options = CopyOptions::new().after_file(move |_, to| {
            assert!(to.is_file());
            counter.fetch_add(1, Ordering::SeqCst);
        });

        copy_directory(&dir.path().join("src"), &dst, &options).unwrap();
        assert_eq!(count.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_existing_destination_skipped_unless_forced() {
        let dir = fixture();
        let src = dir.path().join("src");
        let dst = dir.path().join("dst");
        fs::create_dir(&dst).unwrap();

        let stats = copy_directory(&src, &dst, &CopyOptions::new()).unwrap();
        assert_eq!(stats, CopyStats::default());
        assert!(!dst.join("a.txt").exists());

        let stats = copy_directory(&src, &dst, &CopyOptions::new().force_overwrite(true)).unwrap();
        assert_eq!(stats.copied, 3);

        // Forced again: everything is fresh now
        let stats = copy_directory(&src, &dst, &CopyOptions::new().force_overwrite(true)).unwrap();
        assert_eq!(stats.copied, 0);
        assert_eq!(stats.fresh, 3);
    }

    #[test]
    fn test_copy_file_respects_mtime() {
        let dir = TempDir::new().unwrap();
        let src = dir.path().join("a.css");
        let dst = dir.path().join("b.css");
        fs::write(&src, "a").unwrap();

        assert!(copy_file(&src, &dst, None).unwrap());
        assert!(!copy_file(&src, &dst, None).unwrap());
    }

    #[cfg(unix)]
    #[test]
    fn test_modes_applied() {
        use std::os::unix::fs::PermissionsExt;

        let dir = fixture();
        let dst = dir.path().join("dst");
        let mut options = CopyOptions::new();
        options.dir_mode = Some(0o750);
        options.file_mode = Some(0o640);

        copy_directory(&dir.path().join("src"), &dst, &options).unwrap();

        let file_mode = fs::metadata(dst.join("a.txt")).unwrap().permissions().mode();
        let dir_mode = fs::metadata(dst.join("sub")).unwrap().permissions().mode();
        assert_eq!(file_mode & 0o777, 0o640);
        assert_eq!(dir_mode & 0o777, 0o750);
    }

    #[test]
    fn test_create_dir_all_with_mode_idempotent() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("a/b/c");
        create_dir_all_with_mode(&nested, 0o775).unwrap();
        create_dir_all_with_mode(&nested, 0o775).unwrap();
        assert!(nested.is_dir());
    }

    #[test]
    fn test_set_mode_failure_is_ignored() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("gone.txt");

        // chmod on a missing path fails; the caller never sees it
        set_mode(&missing, 0o644);
        assert!(!missing.exists());

        let src = dir.path().join("a.txt");
        fs::write(&src, "a").unwrap();
        let dst = dir.path().join("b.txt");
        assert!(copy_file(&src, &dst, Some(0o7777_7777)).unwrap());
        assert_eq!(fs::read_to_string(&dst).unwrap(), "a");
    }
}
