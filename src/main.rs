//! assetman - publish web assets into a hashed public directory.

mod cli;

use anyhow::{Context, Result, anyhow};
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};

use assetman::asset::BundleRegistry;
use assetman::config::{ManagerConfig, find_config_file};
use assetman::debug;
use assetman::manager::AssetManager;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }
    assetman::logger::set_verbose(cli.verbose);

    let manager = load_manager(&cli)?;

    match &cli.command {
        Commands::Publish { args } => cli::publish::run_publish(args, &manager),
        Commands::Path { path } => cli::query::print_path(&manager, path),
        Commands::Url { path } => cli::query::print_url(&manager, path),
        Commands::Resolve {
            bundle,
            asset,
            path,
        } => cli::query::resolve(&manager, bundle, asset, *path),
        Commands::Bundle { name, json } => cli::bundle::run_bundle(&manager, name.as_deref(), *json),
    }
}

/// Locate and load the config file, then build the manager.
///
/// Bundles come from `[bundles]` only; the binary registers none in code.
fn load_manager(cli: &Cli) -> Result<AssetManager> {
    let path = find_config_file(&cli.config)
        .ok_or_else(|| anyhow!("config file `{}` not found", cli.config.display()))?;
    debug!("config"; "using {}", path.display());

    let config = ManagerConfig::load(&path)
        .with_context(|| format!("failed to load {}", path.display()))?;
    let manager = AssetManager::new(&config, BundleRegistry::new())
        .with_context(|| format!("invalid configuration in {}", path.display()))?;
    Ok(manager)
}
