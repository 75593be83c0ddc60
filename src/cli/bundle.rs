//! Bundle command implementation.

use std::path::PathBuf;

use anyhow::Result;
use serde::Serialize;

use assetman::asset::AssetBundle;
use assetman::log;
use assetman::manager::AssetManager;
use assetman::utils::plural_count;

/// A published bundle with resolved asset URLs.
#[derive(Debug, Serialize)]
struct BundleReport {
    name: String,
    base_path: Option<PathBuf>,
    base_url: Option<String>,
    depends: Vec<String>,
    js: Vec<String>,
    css: Vec<String>,
}

impl BundleReport {
    fn new(manager: &AssetManager, bundle: &AssetBundle) -> Self {
        let urls = |assets: &[String]| -> Vec<String> {
            assets
                .iter()
                .map(|asset| manager.resolve_asset_url(bundle, asset))
                .collect()
        };
        Self {
            name: bundle.name.clone(),
            base_path: bundle.base_path.clone(),
            base_url: bundle.base_url.clone(),
            depends: bundle.depends.clone(),
            js: urls(&bundle.js),
            css: urls(&bundle.css),
        }
    }
}

pub fn run_bundle(manager: &AssetManager, name: Option<&str>, json: bool) -> Result<()> {
    let Some(name) = name else {
        return list_bundles(manager, json);
    };

    let bundle = manager.bundle(name, true)?;
    let report = BundleReport::new(manager, &bundle);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    if let Some(base_path) = &report.base_path {
        log!("bundle"; "{} published to {}", report.name, base_path.display());
    }
    if !report.depends.is_empty() {
        log!("bundle"; "depends on {}", report.depends.join(", "));
    }
    for url in report.css.iter().chain(&report.js) {
        println!("{url}");
    }
    Ok(())
}

fn list_bundles(manager: &AssetManager, json: bool) -> Result<()> {
    let names = manager.bundle_names();
    if json {
        println!("{}", serde_json::to_string_pretty(&names)?);
        return Ok(());
    }

    log!("bundle"; "{}", plural_count(names.len(), "bundle"));
    for name in names {
        println!("{name}");
    }
    Ok(())
}
