//! assetman - asset publishing and resolution.
//!
//! Sources (files or directories) are published into a public base directory
//! under a hash-derived name, by copying or symlinking, at most once per
//! process. Bundle assets are then resolved to URLs, optionally through an
//! override table.
//!
//! | Module      | Purpose                                        |
//! |-------------|------------------------------------------------|
//! | `publish`   | hashing, copying, linking, publish cache       |
//! | `asset`     | bundles, converters, URL/path resolution       |
//! | `manager`   | `AssetManager` facade                          |
//! | `config`    | `assetman.toml`                                |
//! | `alias`     | `@name` path aliases                           |
//! | `freshness` | mtime comparisons                              |

pub mod alias;
pub mod asset;
pub mod config;
pub mod freshness;
pub mod logger;
pub mod manager;
pub mod publish;
pub mod utils;
