//! `[publish]` and `[web]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [publish]
//! base_path = "public/assets"   # Must exist and be writable
//! base_url = "/assets"          # URL prefix of base_path
//! link = false                  # Symlink instead of copying
//! force_copy = false            # Re-copy directories that already exist
//! dir_mode = 0o775              # Mode of created directories
//! file_mode = 0o644             # Mode of copied files (unset = umask)
//! append_timestamp = false      # Add ?v=<mtime> to resolved URLs
//!
//! [web]
//! root = "public"               # @webroot
//! base_url = ""                 # @web
//! ```

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Publishing settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PublishConfig {
    /// Directory receiving published assets (relative to the config file).
    pub base_path: PathBuf,

    /// URL under which `base_path` is served.
    pub base_url: String,

    /// Publish by symlinking instead of copying.
    /// Links always reflect the source and need no copy, but the web server
    /// must follow symlinks.
    pub link: bool,

    /// Copy directories even when their destination already exists.
    /// Useful during development, expensive in production.
    pub force_copy: bool,

    /// Permission bits for created directories.
    pub dir_mode: u32,

    /// Permission bits for copied files.
    pub file_mode: Option<u32>,

    /// Append `?v=<mtime>` to resolved asset URLs.
    pub append_timestamp: bool,

    /// Version string mixed into directory hashes (defaults to the tool version).
    /// Changing it moves every asset to a new directory.
    pub version: Option<String>,
}

impl Default for PublishConfig {
    fn default() -> Self {
        Self {
            base_path: PathBuf::from("public/assets"),
            base_url: "/assets".into(),
            link: false,
            force_copy: false,
            dir_mode: 0o775,
            file_mode: None,
            append_timestamp: false,
            version: None,
        }
    }
}

impl PublishConfig {
    /// Version mixed into hashes.
    pub fn version(&self) -> &str {
        self.version.as_deref().unwrap_or(env!("CARGO_PKG_VERSION"))
    }
}

/// The web root that `@webroot` / `@web` point to.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WebConfig {
    /// Document root directory.
    pub root: PathBuf,

    /// URL of the document root.
    pub base_url: String,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("public"),
            base_url: String::new(),
        }
    }
}
