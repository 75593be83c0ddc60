//! Path and URL utilities.
//!
//! - [`fs`]: Filesystem path normalization (`normalize_path`, `resolve_path`)
//! - [`route`]: URL utilities (`is_relative_url`, `join_url`)

pub mod fs;
pub mod route;

pub use fs::{normalize_path, resolve_path};
pub use route::{is_relative_url, join_url};
