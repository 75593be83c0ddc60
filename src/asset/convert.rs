//! Asset conversion hooks run when a bundle is published.
//!
//! A converter maps a listed asset (`app.scss`) to the asset that should
//! actually be served (`app.css`). It only renames; producing the converted
//! file is the job of an external build step.

use std::fmt;
use std::path::{Path, PathBuf};

use rustc_hash::FxHashMap;

use crate::freshness::is_stale;
use crate::log;
use crate::publish::BoxError;

/// Maps a bundle-relative asset to the asset that should be served.
pub trait AssetConverter: Send + Sync {
    /// `base_path` is the directory the bundle was published to.
    fn convert(&self, asset: &str, base_path: &Path) -> Result<String, BoxError>;
}

/// Serves every asset as listed.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassthroughConverter;

impl AssetConverter for PassthroughConverter {
    fn convert(&self, asset: &str, _base_path: &Path) -> Result<String, BoxError> {
        Ok(asset.to_owned())
    }
}

/// Serves a pre-built sibling with a different extension (`scss` → `css`).
///
/// The sibling is used only when it exists and is at least as new as the
/// listed file. Otherwise the listed asset is served unchanged.
#[derive(Clone, Default)]
pub struct ExtensionConverter {
    map: FxHashMap<String, String>,
}

impl ExtensionConverter {
    pub fn new(map: FxHashMap<String, String>) -> Self {
        let map = map
            .into_iter()
            .map(|(from, to)| {
                (
                    from.trim_start_matches('.').to_owned(),
                    to.trim_start_matches('.').to_owned(),
                )
            })
            .collect();
        Self { map }
    }

    fn target(&self, asset: &str) -> Option<String> {
        let ext = Path::new(asset).extension()?.to_str()?;
        let to = self.map.get(ext)?;
        // `extension` ignores trailing separators, so the string may not end with it
        let stem = asset.strip_suffix(ext)?;
        Some(format!("{stem}{to}"))
    }
}

impl AssetConverter for ExtensionConverter {
    fn convert(&self, asset: &str, base_path: &Path) -> Result<String, BoxError> {
        let Some(target) = self.target(asset) else {
            return Ok(asset.to_owned());
        };

        let source: PathBuf = base_path.join(asset);
        let output = base_path.join(&target);
        if !output.exists() {
            return Ok(asset.to_owned());
        }
        if source.exists() && is_stale(&source, &output) {
            log!("warning"; "{} is older than {}, serving the source", target, asset);
            return Ok(asset.to_owned());
        }
        Ok(target)
    }
}

impl fmt::Debug for ExtensionConverter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtensionConverter")
            .field("extensions", &self.map.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::time::{Duration, UNIX_EPOCH};
    use tempfile::TempDir;

    fn set_mtime(path: &Path, secs: u64) {
        fs::File::options()
            .write(true)
            .open(path)
            .unwrap()
            .set_modified(UNIX_EPOCH + Duration::from_secs(secs))
            .unwrap();
    }

    fn scss() -> ExtensionConverter {
        let mut map = FxHashMap::default();
        map.insert(".scss".to_owned(), "css".to_owned());
        ExtensionConverter::new(map)
    }

    #[test]
    fn test_passthrough() {
        let out = PassthroughConverter.convert("app.scss", Path::new("/tmp")).unwrap();
        assert_eq!(out, "app.scss");
    }

    #[test]
    fn test_fresh_sibling_is_served() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("css")).unwrap();
        let src = dir.path().join("css/app.scss");
        let out = dir.path().join("css/app.css");
        fs::write(&src, "$c: red;").unwrap();
        fs::write(&out, "body {}").unwrap();
        set_mtime(&src, 1_000);
        set_mtime(&out, 2_000);

        assert_eq!(scss().convert("css/app.scss", dir.path()).unwrap(), "css/app.css");
    }

    #[test]
    fn test_stale_or_missing_sibling_keeps_source() {
        let dir = TempDir::new().unwrap();
        let src = dir.path().join("app.scss");
        fs::write(&src, "$c: red;").unwrap();

        assert_eq!(scss().convert("app.scss", dir.path()).unwrap(), "app.scss");

        let out = dir.path().join("app.css");
        fs::write(&out, "body {}").unwrap();
        set_mtime(&out, 1_000);
        set_mtime(&src, 2_000);
        assert_eq!(scss().convert("app.scss", dir.path()).unwrap(), "app.scss");
    }

    #[test]
    fn test_unmapped_extension() {
        let dir = TempDir::new().unwrap();
        assert_eq!(scss().convert("app.js", dir.path()).unwrap(), "app.js");
        assert_eq!(scss().convert("LICENSE", dir.path()).unwrap(), "LICENSE");
    }

    #[test]
    fn test_target_requires_literal_suffix() {
        let converter = scss();
        assert_eq!(converter.target("css/app.scss").as_deref(), Some("css/app.css"));
        assert_eq!(converter.target("thème/é.scss").as_deref(), Some("thème/é.css"));
        assert_eq!(converter.target("vendor.scss/"), None);
        assert_eq!(converter.target("é.scss//"), None);
    }
}
