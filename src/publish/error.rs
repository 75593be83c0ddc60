//! Publish error types.

use std::path::PathBuf;
use thiserror::Error;

/// Boxed error returned by user-supplied callbacks (hash, converter).
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors raised while publishing or resolving assets.
#[derive(Debug, Error)]
pub enum PublishError {
    #[error("the file or directory to be published does not exist: {0}")]
    NotFound(String),

    #[error("failed to link `{}` -> `{}`", .dst.display(), .src.display())]
    LinkFailed {
        src: PathBuf,
        dst: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error at `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    // Custom hash callbacks own their error reporting
    #[error(transparent)]
    Hash(BoxError),

    #[error("invalid pattern `{pattern}`")]
    Pattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error("unknown asset bundle: {0}")]
    UnknownBundle(String),

    #[error("failed to convert asset `{asset}`")]
    Convert {
        asset: String,
        #[source]
        source: BoxError,
    },
}

impl PublishError {
    /// Wrap an IO error with the path it happened at.
    pub fn io(path: impl Into<PathBuf>, err: std::io::Error) -> Self {
        Self::Io(path.into(), err)
    }
}

pub type Result<T, E = PublishError> = std::result::Result<T, E>;
