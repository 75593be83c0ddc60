//! Asset bundles and the registry of known bundles.
//!
//! A bundle is a group of js/css files living under one source directory.
//! Bundles are registered in code through [`BundleRegistry`] and may be
//! overridden, disabled or defined outright in `[bundles]`.

use std::path::PathBuf;

use rustc_hash::FxHashMap;

use crate::config::BundleConfig;
use crate::manager::AssetManager;
use crate::publish::{CopyOptions, PublishError, Result};
use crate::utils::path::is_relative_url;

/// A group of assets published together.
#[derive(Debug, Clone, Default)]
pub struct AssetBundle {
    pub name: String,
    /// Directory to publish (aliases allowed). `None` for bundles that are
    /// already web-accessible.
    pub source_path: Option<String>,
    /// Directory holding the assets. Set by [`AssetBundle::publish`] when
    /// `source_path` is used.
    pub base_path: Option<PathBuf>,
    pub base_url: Option<String>,
    pub js: Vec<String>,
    pub css: Vec<String>,
    /// Names of bundles that must be loaded before this one.
    pub depends: Vec<String>,
    pub publish_options: CopyOptions,
}

impl AssetBundle {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Empty bundle standing in for a disabled one.
    pub fn dummy(name: impl Into<String>) -> Self {
        Self::new(name)
    }

    pub fn source_path(mut self, path: impl Into<String>) -> Self {
        self.source_path = Some(path.into());
        self
    }

    pub fn js<I, S>(mut self, assets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.js = assets.into_iter().map(Into::into).collect();
        self
    }

    pub fn css<I, S>(mut self, assets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.css = assets.into_iter().map(Into::into).collect();
        self
    }

    pub fn depends<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.depends = names.into_iter().map(Into::into).collect();
        self
    }

    pub fn publish_options(mut self, options: CopyOptions) -> Self {
        self.publish_options = options;
        self
    }

    /// Build a bundle entirely from configuration.
    pub fn from_config(name: &str, config: &BundleConfig) -> Self {
        let mut bundle = Self::new(name);
        bundle.apply_config(config);
        bundle
    }

    /// Overlay the set fields of `config`.
    pub fn apply_config(&mut self, config: &BundleConfig) {
        if let Some(source) = &config.source_path {
            self.source_path = Some(source.clone());
        }
        if let Some(base_path) = &config.base_path {
            self.base_path = Some(base_path.clone());
        }
        if let Some(base_url) = &config.base_url {
            self.base_url = Some(base_url.trim_end_matches('/').to_owned());
        }
        if let Some(js) = &config.js {
            self.js = js.clone();
        }
        if let Some(css) = &config.css {
            self.css = css.clone();
        }
        if let Some(depends) = &config.depends {
            self.depends = depends.clone();
        }

        let options = &mut self.publish_options;
        if !config.only.is_empty() {
            options.only = config.only.clone();
        }
        if !config.except.is_empty() {
            options.except = config.except.clone();
        }
        if let Some(yes) = config.case_sensitive {
            options.case_sensitive = yes;
        }
        if let Some(yes) = config.force_copy {
            options.force_overwrite = Some(yes);
        }
    }

    /// Publish `source_path` and convert the listed assets.
    ///
    /// A bundle that already has both `base_path` and `base_url` is not
    /// published again. Conversion only touches relative assets.
    pub fn publish(&mut self, manager: &AssetManager) -> Result<()> {
        if let Some(source) = &self.source_path
            && (self.base_path.is_none() || self.base_url.is_none())
        {
            let record = manager.publish(source, &self.publish_options)?;
            self.base_path = Some(record.path);
            self.base_url = Some(record.url);
        }

        let (Some(base_path), Some(_)) = (&self.base_path, &self.base_url) else {
            return Ok(());
        };

        let converter = manager.converter();
        for asset in self.js.iter_mut().chain(self.css.iter_mut()) {
            if !is_local(asset) {
                continue;
            }
            *asset = converter
                .convert(asset, base_path)
                .map_err(|source| PublishError::Convert {
                    asset: asset.clone(),
                    source,
                })?;
        }
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.js.is_empty() && self.css.is_empty()
    }
}

fn is_local(asset: &str) -> bool {
    is_relative_url(asset) && !asset.starts_with('/')
}

// ============================================================================
// Registry
// ============================================================================

/// Constructor of a code-defined bundle.
pub type BundleFactory = fn() -> AssetBundle;

/// Stable bundle identifiers mapped to their constructors.
#[derive(Debug, Clone, Default)]
pub struct BundleRegistry {
    factories: FxHashMap<String, BundleFactory>,
}

impl BundleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) the factory for `name`.
    pub fn register(&mut self, name: impl Into<String>, factory: BundleFactory) -> &mut Self {
        self.factories.insert(name.into(), factory);
        self
    }

    pub fn get(&self, name: &str) -> Option<BundleFactory> {
        self.factories.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, BundleFactory)> {
        self.factories.iter().map(|(name, f)| (name.as_str(), *f))
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{BundleEntry, test_parse_config};

    fn jquery() -> AssetBundle {
        AssetBundle::new("jquery")
            .source_path("@vendor/jquery/dist")
            .js(["jquery.js"])
    }

    #[test]
    fn test_registry() {
        let mut registry = BundleRegistry::new();
        registry.register("jquery", jquery);

        assert!(registry.contains("jquery"));
        assert_eq!(registry.len(), 1);
        let bundle = registry.get("jquery").unwrap()();
        assert_eq!(bundle.js, ["jquery.js"]);
        assert!(registry.get("bootstrap").is_none());
    }

    #[test]
    fn test_apply_config_overrides_set_fields() {
        let config = test_parse_config(
            r#"
[bundles.jquery]
js = ["jquery.min.js"]
base_url = "/cdn/"
except = ["*.map"]
force_copy = true
"#,
        );
        let Some(BundleEntry::Config(entry)) = config.bundles.get("jquery") else {
            panic!("entry not parsed");
        };

        let mut bundle = jquery();
        bundle.apply_config(entry);

        assert_eq!(bundle.source_path.as_deref(), Some("@vendor/jquery/dist"));
        assert_eq!(bundle.js, ["jquery.min.js"]);
        assert_eq!(bundle.base_url.as_deref(), Some("/cdn"));
        assert_eq!(bundle.publish_options.except, ["*.map"]);
        assert_eq!(bundle.publish_options.force_overwrite, Some(true));
        assert!(bundle.css.is_empty());
    }

    #[test]
    fn test_dummy_is_empty() {
        let bundle = AssetBundle::dummy("legacy");
        assert_eq!(bundle.name, "legacy");
        assert!(bundle.is_empty());
        assert!(bundle.source_path.is_none());
        assert!(bundle.depends.is_empty());
    }

    #[test]
    fn test_is_local() {
        assert!(is_local("js/app.js"));
        assert!(!is_local("/js/app.js"));
        assert!(!is_local("https://cdn.example.com/app.js"));
    }
}
