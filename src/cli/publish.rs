//! Publish command implementation.
//!
//! Sources are published in parallel. One failing source does not stop the
//! others; the command fails afterwards if any did.

use anyhow::{Result, bail};
use rayon::prelude::*;
use serde::Serialize;

use assetman::log;
use assetman::manager::AssetManager;
use assetman::publish::{CopyOptions, PublishRecord};
use assetman::utils::plural_count;

use super::args::PublishArgs;

#[derive(Debug, Serialize)]
struct Published<'a> {
    source: &'a str,
    #[serde(flatten)]
    record: PublishRecord,
}

/// Per-invocation copy options from the command line.
fn copy_options(args: &PublishArgs) -> CopyOptions {
    let options = CopyOptions::new()
        .only(&args.only)
        .except(&args.except)
        .case_sensitive(!args.ignore_case);
    if args.force {
        options.force_overwrite(true)
    } else {
        options
    }
}

pub fn run_publish(args: &PublishArgs, manager: &AssetManager) -> Result<()> {
    let options = copy_options(args);

    let results: Vec<_> = args
        .paths
        .par_iter()
        .map(|path| (path.as_str(), manager.publish(path, &options)))
        .collect();

    let mut published = Vec::with_capacity(results.len());
    let mut failed = 0;
    for (source, result) in results {
        match result {
            Ok(record) => published.push(Published { source, record }),
            Err(e) => {
                log!("error"; "{}: {}", source, e);
                failed += 1;
            }
        }
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&published)?);
    } else {
        for item in &published {
            println!("{} -> {}", item.record.path.display(), item.record.url);
        }
    }

    if failed > 0 {
        bail!("failed to publish {}", plural_count(failed, "source"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_copy_options() {
        let args = PublishArgs {
            paths: vec!["app".into()],
            only: vec!["*.css".into()],
            except: vec![],
            ignore_case: true,
            force: true,
            json: false,
        };
        let options = copy_options(&args);
        assert_eq!(options.only, ["*.css"]);
        assert!(!options.case_sensitive);
        assert_eq!(options.force_overwrite, Some(true));

        let args = PublishArgs { force: false, ..args };
        assert_eq!(copy_options(&args).force_overwrite, None);
    }
}
