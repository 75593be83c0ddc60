//! Configuration section definitions.
//!
//! Each module corresponds to sections in `assetman.toml`:
//!
//! | Module    | TOML Section                          | Purpose                    |
//! |-----------|---------------------------------------|----------------------------|
//! | `publish` | `[publish]`, `[web]`                  | Where and how to publish   |
//! | `bundle`  | `[assets]`, `[asset_map]`, `[bundles]`| Bundles and asset rewrites |

mod bundle;
mod publish;

pub use bundle::{AssetsConfig, BundleConfig, BundleEntry};
pub use publish::{PublishConfig, WebConfig};
