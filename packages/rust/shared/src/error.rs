//! Error types for Bulletin.
//!
//! Library crates use [`BulletinError`] via `thiserror`.
//! The CLI wraps this with `color-eyre` for rich diagnostics.
//!
//! Remote-fetch failures deliberately never reach content consumers as
//! errors: the content layer degrades to fixture data instead (see
//! `bulletin-content`). These variants cover the paths where an error is
//! the right answer: configuration, endpoint construction, and the
//! internal fetch plumbing that the fallback logic inspects.

use std::path::PathBuf;

/// Top-level error type for all Bulletin operations.
#[derive(Debug, thiserror::Error)]
pub enum BulletinError {
    /// Configuration loading or validation error.
    #[error("config error: {message}")]
    Config { message: String },

    /// Network/HTTP error while talking to the CMS.
    #[error("network error: {0}")]
    Network(String),

    /// Response payload could not be decoded.
    #[error("parse error: {message}")]
    Parse { message: String },

    /// Data validation error (bad endpoint, malformed record set, etc.).
    #[error("validation error: {message}")]
    Validation { message: String },

    /// Filesystem I/O error.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, BulletinError>;

impl BulletinError {
    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Create a parse error from any displayable message.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse {
            message: msg.into(),
        }
    }

    /// Create a validation error from any displayable message.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
        }
    }

    /// Wrap a `std::io::Error` with a path for context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_formatting() {
        let err = BulletinError::config("missing base_url");
        assert_eq!(err.to_string(), "config error: missing base_url");

        let err = BulletinError::Network("news: HTTP 500".into());
        assert_eq!(err.to_string(), "network error: news: HTTP 500");

        let err = BulletinError::validation("per_page must be positive");
        assert!(err.to_string().contains("per_page"));
    }
}
