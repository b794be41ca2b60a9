//! Shared error types for costlens.
//!
//! The declaration indexer and the significance analyzer never fail: every
//! input is best-effort text. Errors only arise at the edges, when reading or
//! writing files, decoding cost reports and configuration, or when a caller
//! supplies a whitelist entry that is not a method identifier.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for costlens operations
#[derive(Debug, Error)]
pub enum Error {
    /// File system related errors
    #[error("File system error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON errors (cost reports, diff blocks, persisted state)
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// Configuration file could not be decoded
    #[error(transparent)]
    TomlDe(#[from] toml::de::Error),

    /// Configuration could not be encoded
    #[error(transparent)]
    TomlSer(#[from] toml::ser::Error),

    /// Configuration values that fail validation
    #[error("Configuration error: {0}")]
    Config(String),

    /// Rejected whitelist candidate
    #[error("Not a valid method name: {0:?}")]
    InvalidMethodName(String),
}

impl Error {
    /// Create an I/O error with path context
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a configuration validation error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Whether the user can fix the error by editing input or settings.
    pub fn is_user_fixable(&self) -> bool {
        matches!(
            self,
            Self::Config(_) | Self::InvalidMethodName(_) | Self::TomlDe(_) | Self::Json(_)
        )
    }
}

/// Result type alias using our error type
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_mentions_path() {
        let err = Error::io(
            "/tmp/missing.java",
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        );
        let message = err.to_string();
        assert!(message.contains("/tmp/missing.java"));
        assert!(message.contains("gone"));
        assert!(!err.is_user_fixable());
    }

    #[test]
    fn test_invalid_method_name_is_user_fixable() {
        let err = Error::InvalidMethodName("1abc".into());
        assert!(err.is_user_fixable());
        assert_eq!(err.to_string(), "Not a valid method name: \"1abc\"");
    }

    #[test]
    fn test_config_error_display() {
        assert_eq!(
            Error::config("bad build command").to_string(),
            "Configuration error: bad build command"
        );
    }
}
