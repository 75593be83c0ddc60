//! Asset manager configuration (`assetman.toml`).
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section/       # Configuration section definitions
//! │   ├── publish    # [publish], [web]
//! │   └── bundle     # [assets], [asset_map], [bundles]
//! ├── error          # ConfigError
//! ├── util           # config file lookup, path anchoring
//! └── mod.rs         # ManagerConfig (this file)
//! ```
//!
//! # Sections
//!
//! | Section       | Purpose                                           |
//! |---------------|---------------------------------------------------|
//! | `[publish]`   | base path/url, link mode, modes, timestamps       |
//! | `[web]`       | web root for `@webroot` / `@web`                  |
//! | `[aliases]`   | `@name` → directory                               |
//! | `[asset_map]` | suffix pattern → replacement asset                |
//! | `[assets]`    | global bundle switch, extension conversions       |
//! | `[bundles]`   | bundle definitions and overrides                  |

mod error;
pub mod section;
mod util;

pub use error::ConfigError;
pub use section::{AssetsConfig, BundleConfig, BundleEntry, PublishConfig, WebConfig};
pub use util::find_config_file;

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::alias::Aliases;
use crate::log;
use crate::publish::PathFilter;
use crate::utils::path::resolve_path;
use util::anchor_source;

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing assetman.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ManagerConfig {
    /// Directory holding the config file (internal use only)
    #[serde(skip)]
    pub root: PathBuf,

    pub publish: PublishConfig,

    pub web: WebConfig,

    /// `@name` → directory, relative to the config file
    pub aliases: FxHashMap<String, String>,

    /// Asset suffix → replacement
    pub asset_map: FxHashMap<String, String>,

    pub assets: AssetsConfig,

    /// Ordered for stable listing
    pub bundles: BTreeMap<String, BundleEntry>,
}

impl ManagerConfig {
    /// Load and normalize configuration from a file.
    ///
    /// Unknown fields are reported but do not abort loading.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (mut config, ignored) = Self::parse_with_ignored(&content)?;
        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }

        let root = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        config.finalize(&root);
        config.validate()?;
        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>), ConfigError> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })?;
        Ok((config, ignored))
    }

    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        log!("warning"; "unknown fields in {}, ignoring:", display_path);
        for field in fields {
            eprintln!("- {field}");
        }
    }

    /// Anchor every relative path at `root`.
    pub fn finalize(&mut self, root: &Path) {
        let root = crate::utils::path::normalize_path(root);

        self.publish.base_path = resolve_path(&self.publish.base_path, &root);
        self.publish.base_url = self.publish.base_url.trim_end_matches('/').to_owned();
        self.web.root = resolve_path(&self.web.root, &root);
        self.web.base_url = self.web.base_url.trim_end_matches('/').to_owned();

        for target in self.aliases.values_mut() {
            *target = anchor_source(target, &root);
        }

        for entry in self.bundles.values_mut() {
            if let BundleEntry::Config(bundle) = entry {
                if let Some(source) = bundle.source_path.take() {
                    bundle.source_path = Some(anchor_source(&source, &root));
                }
                if let Some(base) = bundle.base_path.take() {
                    bundle.base_path = Some(resolve_path(&base, &root));
                }
            }
        }

        self.root = root;
    }

    /// Check values serde cannot check.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        if self.publish.dir_mode > 0o7777 {
            errors.push(format!("publish.dir_mode {:o} is not a permission mode", self.publish.dir_mode));
        }
        if let Some(mode) = self.publish.file_mode
            && mode > 0o7777
        {
            errors.push(format!("publish.file_mode {mode:o} is not a permission mode"));
        }

        for (name, entry) in &self.bundles {
            if let BundleEntry::Config(bundle) = entry
                && let Err(e) = PathFilter::new(
                    &bundle.only,
                    &bundle.except,
                    bundle.case_sensitive.unwrap_or(true),
                )
            {
                errors.push(format!("bundles.{name}: {e}"));
            }
        }

        if self.asset_map.contains_key("") {
            errors.push("asset_map: empty pattern matches every asset".into());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors.join("; ")))
        }
    }

    /// Alias table: configured aliases plus `@webroot` and `@web`.
    pub fn aliases(&self) -> Aliases {
        let mut aliases = Aliases::new();
        aliases.set("@webroot", self.web.root.display().to_string());
        aliases.set("@web", self.web.base_url.clone());
        for (name, target) in &self.aliases {
            aliases.set(name, target.clone());
        }
        aliases
    }

    /// Get the root directory path
    pub fn get_root(&self) -> &Path {
        &self.root
    }
}

// ============================================================================
// Test Helpers (available to all modules via `use crate::config::test_*`)
// ============================================================================

/// Parse config, panicking on unknown fields (to catch typos in tests).
#[cfg(test)]
pub fn test_parse_config(content: &str) -> ManagerConfig {
    let (parsed, ignored) = ManagerConfig::parse_with_ignored(content).unwrap();
    assert!(
        ignored.is_empty(),
        "test config has unknown fields: {:?}",
        ignored
    );
    parsed
}

// ============================================================================
// tests
// ============================================================================
