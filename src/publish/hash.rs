//! Destination directory naming.
//!
//! Every published source lands under `base_path/<hash>/`. The default hash
//! mixes the source directory, the source mtime, the tool version and the
//! link mode, so an edited source publishes into a fresh directory and two
//! processes publishing the same unchanged source agree without talking to
//! each other.
//!
//! Files are hashed by their parent directory: sibling files published one by
//! one share a destination, keeping relative `url()` references between them
//! intact.

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use crate::freshness::mtime_secs;

use super::error::{BoxError, PublishError, Result};

/// User-supplied replacement for the default hash.
pub type HashCallback = Arc<dyn Fn(&Path) -> Result<String, BoxError> + Send + Sync>;

/// Computes destination directory names.
#[derive(Clone)]
pub struct PathHasher {
    version: String,
    link_assets: bool,
    callback: Option<HashCallback>,
}

impl PathHasher {
    pub fn new(version: impl Into<String>, link_assets: bool) -> Self {
        Self {
            version: version.into(),
            link_assets,
            callback: None,
        }
    }

    /// Delegate hashing to `callback`; its output is used verbatim.
    pub fn with_callback(mut self, callback: HashCallback) -> Self {
        self.callback = Some(callback);
        self
    }

    /// Hash a (canonical) source path.
    pub fn hash(&self, path: &Path) -> Result<String> {
        if let Some(callback) = &self.callback {
            return callback(path).map_err(PublishError::Hash);
        }

        let mtime = mtime_secs(path).ok_or_else(|| {
            PublishError::NotFound(path.display().to_string())
        })?;
        let base = if path.is_file() {
            path.parent().unwrap_or(path)
        } else {
            path
        };

        let seed = format!(
            "{}{}{}|{}",
            base.display(),
            mtime,
            self.version,
            if self.link_assets { "1" } else { "" }
        );
        Ok(digest(&seed))
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn link_assets(&self) -> bool {
        self.link_assets
    }
}

/// IEEE CRC32 of `seed` as lowercase hex, without zero padding.
fn digest(seed: &str) -> String {
    format!("{:x}", crc32fast::hash(seed.as_bytes()))
}

impl fmt::Debug for PathHasher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PathHasher")
            .field("version", &self.version)
            .field("link_assets", &self.link_assets)
            .field("callback", &self.callback.is_some())
            .finish()
    }
}
