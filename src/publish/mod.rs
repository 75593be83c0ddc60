//! Publishing sources into the public asset directory.
//!
//! | Module      | Purpose                                          |
//! |-------------|--------------------------------------------------|
//! | `hash`      | destination directory names                      |
//! | `filter`    | `only` / `except` glob matching                  |
//! | `copy`      | recursive copy, mtime freshness, permissions     |
//! | `link`      | race-tolerant symlinks                           |
//! | `cache`     | process-lifetime publish records                 |
//! | `publisher` | orchestration                                    |

mod cache;
mod copy;
mod error;
mod filter;
mod hash;
mod link;
mod options;
mod publisher;

pub use cache::{PublishCache, PublishRecord};
pub use copy::{CopyStats, copy_directory, copy_file};
pub use error::{BoxError, PublishError, Result};
pub use filter::PathFilter;
pub use hash::{HashCallback, PathHasher};
pub use link::{link_directory, link_file};
pub use options::{AfterFile, BeforeFile, CopyOptions, PublishDefaults};
pub use publisher::{Publisher, PublisherBuilder};
