//! `[assets]`, `[asset_map]` and `[bundles]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [assets]
//! enabled = true                   # false: every bundle loads empty
//! convert = { scss = "css" }       # use app.css when app.scss is listed
//!
//! [asset_map]
//! "jquery.min.js" = "@web/js/jquery.js"
//! "dist/jquery.js" = "vendor/jquery/jquery.js"
//!
//! [bundles]
//! legacy = false                   # disabled: loads as an empty bundle
//!
//! [bundles.app]
//! source_path = "assets/app"
//! css = ["app.css"]
//! js = ["app.js"]
//! depends = ["jquery"]
//! except = ["*.map"]
//! ```

use std::path::PathBuf;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Global bundle switches.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetsConfig {
    /// When false, every bundle lookup returns an empty bundle.
    pub enabled: bool,

    /// Source extension → converted extension.
    pub convert: FxHashMap<String, String>,
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            convert: FxHashMap::default(),
        }
    }
}

/// One `[bundles]` entry: a switch or a full definition.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BundleEntry {
    Enabled(bool),
    Config(BundleConfig),
}

/// Bundle definition or override of a registered bundle.
///
/// Unset fields keep the registered bundle's values.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BundleConfig {
    /// Directory published on activation (aliases allowed).
    pub source_path: Option<String>,
    /// Already web-accessible directory, for bundles without `source_path`.
    pub base_path: Option<PathBuf>,
    pub base_url: Option<String>,
    pub js: Option<Vec<String>>,
    pub css: Option<Vec<String>>,
    pub depends: Option<Vec<String>>,

    // Publish options for `source_path`
    pub only: Vec<String>,
    pub except: Vec<String>,
    pub case_sensitive: Option<bool>,
    pub force_copy: Option<bool>,
}

impl BundleConfig {
    /// Whether this entry carries enough to define a bundle on its own.
    pub fn defines_bundle(&self) -> bool {
        self.source_path.is_some()
            || self.base_url.is_some()
            || self.js.is_some()
            || self.css.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;

    #[test]
    fn test_bundle_entries() {
        let config = test_parse_config(
            r#"
[bundles]
legacy = false

[bundles.app]
source_path = "assets/app"
css = ["app.css"]
except = ["*.map"]
"#,
        );

        assert!(matches!(
            config.bundles.get("legacy"),
            Some(BundleEntry::Enabled(false))
        ));
        let Some(BundleEntry::Config(app)) = config.bundles.get("app") else {
            panic!("app bundle not parsed");
        };
        assert_eq!(app.source_path.as_deref(), Some("assets/app"));
        assert_eq!(app.css.as_deref(), Some(&["app.css".to_string()][..]));
        assert_eq!(app.js, None);
        assert_eq!(app.except, ["*.map"]);
        assert!(app.defines_bundle());
    }

    #[test]
    fn test_asset_map_and_switches() {
        let config = test_parse_config(
            r#"
[assets]
enabled = false
convert = { scss = "css" }

[asset_map]
"jquery.js" = "@web/js/jquery.js"
"#,
        );

        assert!(!config.assets.enabled);
        assert_eq!(config.assets.convert.get("scss").map(String::as_str), Some("css"));
        assert_eq!(
            config.asset_map.get("jquery.js").map(String::as_str),
            Some("@web/js/jquery.js")
        );
    }

    #[test]
    fn test_override_only_entry_does_not_define() {
        let entry = BundleConfig {
            depends: Some(vec![]),
            ..BundleConfig::default()
        };
        assert!(!entry.defines_bundle());
    }
}
