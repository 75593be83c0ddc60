//! Configuration error types.

use std::path::PathBuf;
use thiserror::Error;

/// Configuration-related errors. All of them are fatal at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error when reading `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("Config file parsing error")]
    Toml(#[from] toml::de::Error),

    #[error("Config validation error: {0}")]
    Validation(String),

    #[error("the directory does not exist: {}", .0.display())]
    MissingBasePath(PathBuf),

    #[error("the directory is not writable: {}", .0.display())]
    ReadonlyBasePath(PathBuf),

    #[error("unknown asset bundle `{0}`: no registered factory and no definition")]
    UnknownBundle(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Error, ErrorKind};

    #[test]
    fn test_config_error_display() {
        let io_err = ConfigError::Io(
            PathBuf::from("assetman.toml"),
            Error::new(ErrorKind::NotFound, "file not found"),
        );
        let display = format!("{io_err}");
        assert!(display.contains("IO error"));
        assert!(display.contains("assetman.toml"));

        let missing = ConfigError::MissingBasePath(PathBuf::from("/srv/public/assets"));
        assert!(missing.to_string().contains("/srv/public/assets"));

        let validation_err = ConfigError::Validation("Test validation error".to_string());
        assert!(validation_err.to_string().contains("Test validation error"));
    }
}
