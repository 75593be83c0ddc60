//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

/// Publish web assets into a hashed public directory
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path (default: assetman.toml, searched upward)
    #[arg(short = 'C', long, default_value = "assetman.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Publish files or directories (aliases allowed)
    #[command(visible_alias = "p")]
    Publish {
        #[command(flatten)]
        args: PublishArgs,
    },

    /// Print where a source is (or would be) published, without publishing
    Path {
        #[arg(value_name = "PATH")]
        path: String,
    },

    /// Print the URL a source is (or would be) published under
    Url {
        #[arg(value_name = "PATH")]
        path: String,
    },

    /// Resolve an asset of a bundle to its URL
    #[command(visible_alias = "r")]
    Resolve {
        /// Bundle name
        bundle: String,

        /// Asset as listed in the bundle (e.g. css/site.css)
        asset: String,

        /// Print the local file path instead of the URL
        #[arg(long)]
        path: bool,
    },

    /// Publish a bundle and list its asset URLs. Lists bundles without a name.
    #[command(visible_alias = "b")]
    Bundle {
        name: Option<String>,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Publish command arguments.
#[derive(clap::Args, Debug, Clone)]
pub struct PublishArgs {
    /// Sources to publish
    #[arg(value_name = "PATH", required = true)]
    pub paths: Vec<String>,

    /// Only copy files matching these globs (repeatable)
    #[arg(long, value_name = "GLOB")]
    pub only: Vec<String>,

    /// Skip files and directories matching these globs (repeatable)
    #[arg(long, value_name = "GLOB")]
    pub except: Vec<String>,

    /// Match --only / --except case-insensitively
    #[arg(short, long)]
    pub ignore_case: bool,

    /// Copy directories even if already published
    #[arg(short, long)]
    pub force: bool,

    /// Print records as JSON
    #[arg(long)]
    pub json: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_publish() {
        let cli = Cli::try_parse_from([
            "assetman", "-v", "publish", "@vendor/jquery", "app", "--except", "*.map", "--except",
            "tests/", "-f",
        ])
        .unwrap();

        assert!(cli.verbose);
        let Commands::Publish { args } = cli.command else {
            panic!("expected publish");
        };
        assert_eq!(args.paths, ["@vendor/jquery", "app"]);
        assert_eq!(args.except, ["*.map", "tests/"]);
        assert!(args.force);
        assert!(!args.ignore_case);
    }

    #[test]
    fn test_parse_resolve() {
        let cli = Cli::try_parse_from(["assetman", "-C", "site.toml", "resolve", "app", "app.css", "--path"])
            .unwrap();
        assert_eq!(cli.config, PathBuf::from("site.toml"));
        assert!(matches!(
            cli.command,
            Commands::Resolve { ref bundle, path: true, .. } if bundle == "app"
        ));
    }

    #[test]
    fn test_publish_requires_path() {
        assert!(Cli::try_parse_from(["assetman", "publish"]).is_err());
    }
}
