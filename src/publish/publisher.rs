//! The publisher: hash, memoize, then copy or link.
//!
//! ```text
//! publish("@vendor/jquery")
//!   → resolve alias         /srv/vendor/jquery
//!   → cache hit?            return record
//!   → canonicalize + hash   9f3a1c2e
//!   → link or copy          base_path/9f3a1c2e
//!   → record                (base_path/9f3a1c2e, base_url/9f3a1c2e)
//! ```

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::alias::{AliasResolver, Aliases};
use crate::config::ConfigError;
use crate::utils::path::fs::{file_name, is_writable};
use crate::utils::path::join_url;
use crate::utils::plural_count;
use crate::{debug, log};

use super::cache::{PublishCache, PublishRecord};
use super::copy::{copy_directory, copy_file, create_dir_all_with_mode};
use super::error::{PublishError, Result};
use super::hash::{HashCallback, PathHasher};
use super::link::{link_directory, link_file};
use super::options::{AfterFile, BeforeFile, CopyOptions, PublishDefaults};

/// Copies or links sources into `base_path` at most once per process.
pub struct Publisher {
    base_path: PathBuf,
    base_url: String,
    link_assets: bool,
    defaults: PublishDefaults,
    hasher: PathHasher,
    aliases: Arc<dyn AliasResolver>,
    cache: PublishCache,
}

impl Publisher {
    pub fn builder(base_path: impl Into<PathBuf>, base_url: impl Into<String>) -> PublisherBuilder {
        PublisherBuilder::new(base_path, base_url)
    }

    /// Publish a file or directory, returning where it can be served from.
    ///
    /// Repeated calls with the same (alias-resolved) path return the cached
    /// record without touching the filesystem.
    pub fn publish(&self, path: &str, options: &CopyOptions) -> Result<PublishRecord> {
        let key = self.aliases.resolve_alias(path);
        if let Some(record) = self.cache.get(&key) {
            return Ok(record);
        }

        let lock = self.cache.key_lock(&key);
        let guard = lock.lock();
        // Another thread may have finished while we waited
        if let Some(record) = self.cache.get(&key) {
            return Ok(record);
        }

        match self.publish_source(&key, options) {
            Ok(record) => {
                debug!("publish"; "{} -> {}", key, record.url);
                self.cache.put(key, record.clone());
                Ok(record)
            }
            Err(e) => {
                drop(guard);
                self.cache.release_lock(&key);
                Err(e)
            }
        }
    }

    fn publish_source(&self, key: &str, options: &CopyOptions) -> Result<PublishRecord> {
        let src = Path::new(key)
            .canonicalize()
            .map_err(|_| PublishError::NotFound(key.to_owned()))?;

        if src.is_file() {
            self.publish_file(&src)
        } else {
            self.publish_directory(&src, options)
        }
    }

    fn publish_file(&self, src: &Path) -> Result<PublishRecord> {
        let hash = self.hasher.hash(src)?;
        let name = file_name(src);
        let dst_dir = self.base_path.join(&hash);
        let dst = dst_dir.join(&name);

        create_dir_all_with_mode(&dst_dir, self.defaults.dir_mode)?;

        if self.link_assets {
            link_file(src, &dst)?;
        } else if copy_file(src, &dst, self.defaults.file_mode)? {
            debug!("copy"; "{} -> {}", src.display(), dst.display());
        }

        let url = join_url(&self.base_url, &format!("{hash}/{name}"));
        Ok(PublishRecord::new(dst, url))
    }

    fn publish_directory(&self, src: &Path, options: &CopyOptions) -> Result<PublishRecord> {
        let hash = self.hasher.hash(src)?;
        let dst = self.base_path.join(&hash);

        if self.link_assets {
            link_directory(src, &dst, self.defaults.dir_mode)?;
        } else {
            let options = options.merged_over(&self.defaults);
            let stats = copy_directory(src, &dst, &options)?;
            if stats.copied > 0 {
                log!("publish"; "{} ({})", src.display(), plural_count(stats.copied, "file"));
            }
        }

        let url = join_url(&self.base_url, &hash);
        Ok(PublishRecord::new(dst, url))
    }

    /// Where `path` is (or would be) published, without publishing it.
    ///
    /// Returns `None` when the path does not exist.
    pub fn describe(&self, path: &str) -> Result<Option<PublishRecord>> {
        let key = self.aliases.resolve_alias(path);
        if let Some(record) = self.cache.get(&key) {
            return Ok(Some(record));
        }

        let Ok(src) = Path::new(&key).canonicalize() else {
            return Ok(None);
        };
        let hash = self.hasher.hash(&src)?;

        let record = if src.is_file() {
            let name = file_name(&src);
            PublishRecord::new(
                self.base_path.join(&hash).join(&name),
                join_url(&self.base_url, &format!("{hash}/{name}")),
            )
        } else {
            PublishRecord::new(self.base_path.join(&hash), join_url(&self.base_url, &hash))
        };
        Ok(Some(record))
    }

    /// Published filesystem path of `path`, see [`Publisher::describe`].
    pub fn describe_published_path(&self, path: &str) -> Result<Option<PathBuf>> {
        Ok(self.describe(path)?.map(|r| r.path))
    }

    /// Published URL of `path`, see [`Publisher::describe`].
    pub fn describe_published_url(&self, path: &str) -> Result<Option<String>> {
        Ok(self.describe(path)?.map(|r| r.url))
    }

    /// Destination directory name for a canonical source path.
    pub fn hash(&self, path: &Path) -> Result<String> {
        self.hasher.hash(path)
    }

    pub fn resolve_alias(&self, path: &str) -> String {
        self.aliases.resolve_alias(path)
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn link_assets(&self) -> bool {
        self.link_assets
    }

    pub fn defaults(&self) -> &PublishDefaults {
        &self.defaults
    }

    pub fn cache(&self) -> &PublishCache {
        &self.cache
    }
}

impl fmt::Debug for Publisher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Publisher")
            .field("base_path", &self.base_path)
            .field("base_url", &self.base_url)
            .field("link_assets", &self.link_assets)
            .field("defaults", &self.defaults)
            .field("hasher", &self.hasher)
            .field("published", &self.cache.len())
            .finish()
    }
}

// ============================================================================
// Builder
// ============================================================================

/// Configures a [`Publisher`]. Link mode is fixed once built.
pub struct PublisherBuilder {
    base_path: PathBuf,
    base_url: String,
    link_assets: bool,
    defaults: PublishDefaults,
    version: String,
    hash_callback: Option<HashCallback>,
    aliases: Arc<dyn AliasResolver>,
}

impl PublisherBuilder {
    pub fn new(base_path: impl Into<PathBuf>, base_url: impl Into<String>) -> Self {
        Self {
            base_path: base_path.into(),
            base_url: base_url.into(),
            link_assets: false,
            defaults: PublishDefaults::default(),
            version: env!("CARGO_PKG_VERSION").to_owned(),
            hash_callback: None,
            aliases: Arc::new(Aliases::new()),
        }
    }

    pub fn link_assets(mut self, yes: bool) -> Self {
        self.link_assets = yes;
        self
    }

    pub fn force_copy(mut self, yes: bool) -> Self {
        self.defaults.force_copy = yes;
        self
    }

    pub fn dir_mode(mut self, mode: u32) -> Self {
        self.defaults.dir_mode = mode;
        self
    }

    pub fn file_mode(mut self, mode: Option<u32>) -> Self {
        self.defaults.file_mode = mode;
        self
    }

    pub fn before_copy(mut self, hook: BeforeFile) -> Self {
        self.defaults.before_copy = Some(hook);
        self
    }

    pub fn after_copy(mut self, hook: AfterFile) -> Self {
        self.defaults.after_copy = Some(hook);
        self
    }

    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    pub fn hash_callback(mut self, callback: HashCallback) -> Self {
        self.hash_callback = Some(callback);
        self
    }

    pub fn aliases(mut self, aliases: Arc<dyn AliasResolver>) -> Self {
        self.aliases = aliases;
        self
    }

    /// Validate `base_path` and build the publisher.
    pub fn build(self) -> Result<Publisher, ConfigError> {
        let base_path = self.base_path;
        let meta = base_path
            .metadata()
            .map_err(|_| ConfigError::MissingBasePath(base_path.clone()))?;
        if !meta.is_dir() {
            return Err(ConfigError::MissingBasePath(base_path));
        }
        if !is_writable(&base_path) {
            return Err(ConfigError::ReadonlyBasePath(base_path));
        }
        let base_path = base_path
            .canonicalize()
            .map_err(|e| ConfigError::Io(base_path.clone(), e))?;

        let mut hasher = PathHasher::new(self.version, self.link_assets);
        if let Some(callback) = self.hash_callback {
            hasher = hasher.with_callback(callback);
        }

        Ok(Publisher {
            base_path,
            base_url: self.base_url.trim_end_matches('/').to_owned(),
            link_assets: self.link_assets,
            defaults: self.defaults,
            hasher,
            aliases: self.aliases,
            cache: PublishCache::new(),
        })
    }
}
