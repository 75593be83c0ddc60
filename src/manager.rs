//! The asset manager: publisher, resolver and bundles behind one handle.
//!
//! ```text
//! ManagerConfig + BundleRegistry
//!   → AssetManager::new     validate base_path, resolve [bundles]
//!   → bundle("app", true)   clone template, publish, convert, cache
//!   → resolve_asset_url     /assets/9f3a1c2e/app.css
//! ```

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use parking_lot::Mutex;
use rustc_hash::FxHashMap;

use crate::asset::{
    AssetBundle, AssetConverter, AssetResolver, BundleRegistry, ExtensionConverter,
    PassthroughConverter,
};
use crate::config::{BundleEntry, ConfigError, ManagerConfig};
use crate::debug;
use crate::publish::{CopyOptions, PublishError, PublishRecord, Publisher, Result};

/// How a bundle name resolves, decided when the manager is built.
#[derive(Debug, Clone)]
enum BundleDefinition {
    Disabled,
    Template(AssetBundle),
}

/// Publishes sources and bundles and resolves their assets.
pub struct AssetManager {
    publisher: Publisher,
    resolver: AssetResolver,
    definitions: FxHashMap<String, BundleDefinition>,
    bundles_enabled: bool,
    converter: Box<dyn AssetConverter>,
    loaded: Mutex<FxHashMap<String, Arc<AssetBundle>>>,
    dummies: Mutex<FxHashMap<String, Arc<AssetBundle>>>,
}

impl AssetManager {
    /// Build a manager from loaded configuration.
    ///
    /// Fails if `base_path` is missing or read-only, or if `[bundles]` names a
    /// bundle that is neither registered nor defined in place.
    pub fn new(config: &ManagerConfig, registry: BundleRegistry) -> Result<Self, ConfigError> {
        let aliases = Arc::new(config.aliases());
        let publish = &config.publish;

        let publisher = Publisher::builder(&publish.base_path, &publish.base_url)
            .link_assets(publish.link)
            .force_copy(publish.force_copy)
            .dir_mode(publish.dir_mode)
            .file_mode(publish.file_mode)
            .version(publish.version())
            .aliases(aliases.clone())
            .build()?;

        let mut overrides: Vec<_> = config.asset_map.iter().collect();
        overrides.sort();
        let resolver = AssetResolver::new(publisher.base_path(), publisher.base_url())
            .web(&config.web.root, &config.web.base_url)
            .overrides(overrides)
            .append_timestamp(publish.append_timestamp)
            .aliases(aliases);

        let converter: Box<dyn AssetConverter> = if config.assets.convert.is_empty() {
            Box::new(PassthroughConverter)
        } else {
            Box::new(ExtensionConverter::new(config.assets.convert.clone()))
        };

        Ok(Self {
            publisher,
            resolver,
            definitions: Self::definitions(config, &registry)?,
            bundles_enabled: config.assets.enabled,
            converter,
            loaded: Mutex::new(FxHashMap::default()),
            dummies: Mutex::new(FxHashMap::default()),
        })
    }

    fn definitions(
        config: &ManagerConfig,
        registry: &BundleRegistry,
    ) -> Result<FxHashMap<String, BundleDefinition>, ConfigError> {
        let mut definitions: FxHashMap<String, BundleDefinition> = registry
            .iter()
            .map(|(name, factory)| {
                let mut bundle = factory();
                bundle.name = name.to_owned();
                (name.to_owned(), BundleDefinition::Template(bundle))
            })
            .collect();

        for (name, entry) in &config.bundles {
            match entry {
                BundleEntry::Enabled(false) => {
                    definitions.insert(name.clone(), BundleDefinition::Disabled);
                }
                BundleEntry::Enabled(true) if registry.contains(name) => {}
                BundleEntry::Config(bundle) => match definitions.get_mut(name) {
                    Some(BundleDefinition::Template(template)) => template.apply_config(bundle),
                    _ if bundle.defines_bundle() => {
                        definitions.insert(
                            name.clone(),
                            BundleDefinition::Template(AssetBundle::from_config(name, bundle)),
                        );
                    }
                    _ => return Err(ConfigError::UnknownBundle(name.clone())),
                },
                BundleEntry::Enabled(true) => return Err(ConfigError::UnknownBundle(name.clone())),
            }
        }

        Ok(definitions)
    }

    /// Publish a file or directory, see [`Publisher::publish`].
    pub fn publish(&self, path: &str, options: &CopyOptions) -> Result<PublishRecord> {
        self.publisher.publish(path, options)
    }

    pub fn describe_published_path(&self, path: &str) -> Result<Option<PathBuf>> {
        self.publisher.describe_published_path(path)
    }

    pub fn describe_published_url(&self, path: &str) -> Result<Option<String>> {
        self.publisher.describe_published_url(path)
    }

    /// Load a bundle by name, publishing it on first load when `publish` is set.
    ///
    /// Loaded bundles are cached for the life of the manager. Disabled bundles
    /// (and every bundle when `[assets] enabled = false`) load as empty ones.
    pub fn bundle(&self, name: &str, publish: bool) -> Result<Arc<AssetBundle>> {
        if !self.bundles_enabled {
            return Ok(self.dummy(name));
        }

        let template = match self.definitions.get(name) {
            None => return Err(PublishError::UnknownBundle(name.to_owned())),
            Some(BundleDefinition::Disabled) => return Ok(self.dummy(name)),
            Some(BundleDefinition::Template(template)) => template,
        };

        let mut loaded = self.loaded.lock();
        if let Some(bundle) = loaded.get(name) {
            return Ok(Arc::clone(bundle));
        }

        let mut bundle = template.clone();
        if publish {
            bundle.publish(self)?;
        }
        debug!("bundle"; "loaded {}", name);

        let bundle = Arc::new(bundle);
        loaded.insert(name.to_owned(), Arc::clone(&bundle));
        Ok(bundle)
    }

    fn dummy(&self, name: &str) -> Arc<AssetBundle> {
        let mut dummies = self.dummies.lock();
        let bundle = dummies
            .entry(name.to_owned())
            .or_insert_with(|| Arc::new(AssetBundle::dummy(name)));
        Arc::clone(bundle)
    }

    /// Names of all bundles that can be loaded, sorted.
    pub fn bundle_names(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.definitions.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn resolve_asset_url(&self, bundle: &AssetBundle, asset: &str) -> String {
        self.resolver.resolve_asset_url(bundle, asset)
    }

    pub fn resolve_asset_path(&self, bundle: &AssetBundle, asset: &str) -> Option<PathBuf> {
        self.resolver.resolve_asset_path(bundle, asset)
    }

    pub fn set_converter(&mut self, converter: impl AssetConverter + 'static) {
        self.converter = Box::new(converter);
    }

    pub fn converter(&self) -> &dyn AssetConverter {
        self.converter.as_ref()
    }

    pub fn publisher(&self) -> &Publisher {
        &self.publisher
    }

    pub fn resolver(&self) -> &AssetResolver {
        &self.resolver
    }
}

impl fmt::Debug for AssetManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AssetManager")
            .field("publisher", &self.publisher)
            .field("resolver", &self.resolver)
            .field("bundles", &self.bundle_names())
            .field("bundles_enabled", &self.bundles_enabled)
            .finish()
    }
}
