//! Freshness detection: mtime comparison between sources and published files.

pub mod mtime;

pub use mtime::{get_mtime, is_stale, mtime_secs};
