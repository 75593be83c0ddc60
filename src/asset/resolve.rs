//! Bundle-relative asset references → URLs and file paths.
//!
//! ```text
//! resolve("jquery", "jquery.js")
//!   → candidate                 /srv/vendor/jquery/dist/jquery.js
//!   → longest override suffix   "dist/jquery.js" = "@web/js/jquery.js"
//!   → base                      (@webroot, @web)
//!   → url                       /js/jquery.js?v=1700000000
//! ```
//!
//! Without a matching override the bundle's own `base_path` / `base_url`
//! apply. External references (`https://…`, `//…`, `/…`) are returned as is.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::alias::{AliasResolver, Aliases};
use crate::utils::path::{is_relative_url, join_url};

use super::bundle::AssetBundle;
use super::version::timestamped_url;

const WEB_ALIAS: &str = "@web/";

/// Where a reference ended up: the asset plus the base it is relative to.
struct Target {
    asset: String,
    base_path: Option<PathBuf>,
    base_url: String,
}

impl Target {
    fn is_external(&self) -> bool {
        !is_relative_url(&self.asset) || self.asset.starts_with('/')
    }
}

/// Rewrites bundle assets through the `[asset_map]` override table.
pub struct AssetResolver {
    /// Declaration order is kept for tie-breaking.
    overrides: Vec<(String, String)>,
    base_path: PathBuf,
    base_url: String,
    web_root: PathBuf,
    web_base_url: String,
    append_timestamp: bool,
    aliases: Arc<dyn AliasResolver>,
}

impl AssetResolver {
    /// `base_path` / `base_url` are the manager's publish target, used for
    /// overrides that do not point into the web root.
    pub fn new(base_path: impl Into<PathBuf>, base_url: impl Into<String>) -> Self {
        Self {
            overrides: Vec::new(),
            base_path: base_path.into(),
            base_url: base_url.into(),
            web_root: PathBuf::new(),
            web_base_url: String::new(),
            append_timestamp: false,
            aliases: Arc::new(Aliases::new()),
        }
    }

    pub fn web(mut self, root: impl Into<PathBuf>, base_url: impl Into<String>) -> Self {
        self.web_root = root.into();
        self.web_base_url = base_url.into();
        self
    }

    /// Add overrides. Empty patterns are ignored.
    pub fn overrides<I, K, V>(mut self, entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.overrides.extend(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .filter(|(k, _)| !k.is_empty()),
        );
        self
    }

    pub fn append_timestamp(mut self, yes: bool) -> Self {
        self.append_timestamp = yes;
        self
    }

    pub fn aliases(mut self, aliases: Arc<dyn AliasResolver>) -> Self {
        self.aliases = aliases;
        self
    }

    /// Replacement for `asset` of `bundle`, if any override applies.
    ///
    /// An override keyed by the asset exactly as listed wins. Otherwise the
    /// asset is prefixed with the bundle's source directory and the longest
    /// pattern (in characters) that is a suffix of it is chosen.
    pub fn find_override(&self, bundle: &AssetBundle, asset: &str) -> Option<&str> {
        if let Some((_, to)) = self.overrides.iter().find(|(from, _)| from == asset) {
            return Some(to.as_str());
        }

        let candidate = match &bundle.source_path {
            Some(source) if is_relative_url(asset) && !asset.starts_with('/') => {
                let source = self.aliases.resolve_alias(source);
                format!("{}/{}", source.trim_end_matches('/'), asset)
            }
            _ => asset.to_owned(),
        };

        let mut best: Option<(usize, &str)> = None;
        for (from, to) in &self.overrides {
            if !candidate.ends_with(from.as_str()) {
                continue;
            }
            let len = from.chars().count();
            // strictly longer only, so the first declared wins a tie
            if best.is_none_or(|(best_len, _)| len > best_len) {
                best = Some((len, to.as_str()));
            }
        }
        best.map(|(_, to)| to)
    }

    fn target(&self, bundle: &AssetBundle, asset: &str) -> Target {
        match self.find_override(bundle, asset) {
            Some(actual) => match actual.strip_prefix(WEB_ALIAS) {
                Some(rest) => Target {
                    asset: rest.to_owned(),
                    base_path: Some(self.web_root.clone()),
                    base_url: self.web_base_url.clone(),
                },
                None => Target {
                    asset: self.aliases.resolve_alias(actual),
                    base_path: Some(self.base_path.clone()),
                    base_url: self.base_url.clone(),
                },
            },
            None => Target {
                asset: asset.to_owned(),
                base_path: bundle.base_path.clone(),
                base_url: bundle.base_url.clone().unwrap_or_default(),
            },
        }
    }

    /// URL `asset` of `bundle` is served from.
    ///
    /// External references come back unchanged and never get a timestamp.
    pub fn resolve_asset_url(&self, bundle: &AssetBundle, asset: &str) -> String {
        let target = self.target(bundle, asset);
        if target.is_external() {
            return target.asset;
        }

        let url = join_url(&target.base_url, &target.asset);
        match &target.base_path {
            Some(base) if self.append_timestamp => timestamped_url(&url, &base.join(&target.asset)),
            _ => url,
        }
    }

    /// Local file behind `asset` of `bundle`.
    ///
    /// `None` for external references and for bundles without a base path.
    pub fn resolve_asset_path(&self, bundle: &AssetBundle, asset: &str) -> Option<PathBuf> {
        let target = self.target(bundle, asset);
        if target.is_external() {
            return None;
        }
        target.base_path.map(|base| base.join(&target.asset))
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl std::fmt::Debug for AssetResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AssetResolver")
            .field("overrides", &self.overrides)
            .field("base_path", &self.base_path)
            .field("base_url", &self.base_url)
            .field("web_root", &self.web_root)
            .field("web_base_url", &self.web_base_url)
            .field("append_timestamp", &self.append_timestamp)
            .finish()
    }
}
