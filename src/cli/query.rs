//! Read-only lookups: `path`, `url` and `resolve`.

use anyhow::{Result, bail};

use assetman::manager::AssetManager;

pub fn print_path(manager: &AssetManager, path: &str) -> Result<()> {
    match manager.describe_published_path(path)? {
        Some(published) => println!("{}", published.display()),
        None => bail!("the file or directory does not exist: {path}"),
    }
    Ok(())
}

pub fn print_url(manager: &AssetManager, path: &str) -> Result<()> {
    match manager.describe_published_url(path)? {
        Some(url) => println!("{url}"),
        None => bail!("the file or directory does not exist: {path}"),
    }
    Ok(())
}

/// Load (and publish) `bundle`, then print where `asset` is served from.
pub fn resolve(manager: &AssetManager, bundle: &str, asset: &str, as_path: bool) -> Result<()> {
    let bundle = manager.bundle(bundle, true)?;
    if !as_path {
        println!("{}", manager.resolve_asset_url(&bundle, asset));
        return Ok(());
    }

    match manager.resolve_asset_path(&bundle, asset) {
        Some(path) => println!("{}", path.display()),
        None => bail!("`{asset}` is not a local file"),
    }
    Ok(())
}
