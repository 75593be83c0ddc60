//! Configuration utility functions.

use std::path::{Path, PathBuf};

use crate::utils::path::is_relative_url;

/// Find config file by searching upward from current directory
///
/// Starts from cwd and walks up parent directories until finding `config_name`
/// Returns the absolute path to the config file if found
///
/// # Example
/// ```text
/// /srv/site/assets/app/     ← cwd
/// /srv/site/assetman.toml   ← found!
/// ```
pub fn find_config_file(config_name: &Path) -> Option<PathBuf> {
    if config_name.is_absolute() {
        return config_name.exists().then(|| config_name.to_path_buf());
    }

    let cwd = std::env::current_dir().ok()?;
    find_upward(&cwd, config_name)
}

fn find_upward(start: &Path, config_name: &Path) -> Option<PathBuf> {
    let mut current = start;
    loop {
        let candidate = current.join(config_name);
        if candidate.exists() {
            return Some(candidate);
        }

        match current.parent() {
            Some(parent) => current = parent,
            None => return None,
        }
    }
}

/// Anchor a configured source location at `root`.
///
/// Aliases (`@vendor/...`), URLs and absolute paths are kept as written.
pub fn anchor_source(value: &str, root: &Path) -> String {
    if value.starts_with('@')
        || value.starts_with('~')
        || !is_relative_url(value)
        || Path::new(value).is_absolute()
    {
        return value.to_owned();
    }
    root.join(value).display().to_string()
}
