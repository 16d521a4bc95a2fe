//! Error types shared by the loader, the config layer and the image fetcher.
//!
//! Sources are wrapped in `Arc` so the errors can travel inside cloneable
//! iced messages.

use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;

/// Failure to obtain the catalog document.
#[derive(Debug, Clone, Error)]
pub enum LoadError {
    /// The local data file could not be read
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: Arc<std::io::Error>,
    },

    /// The HTTP request itself failed (DNS, TLS, connection reset...)
    #[error("request failed: {0}")]
    Request(#[source] Arc<reqwest::Error>),

    /// The server answered with a non-success status
    #[error("server responded with status {0}")]
    Status(u16),

    /// The body was not valid JSON
    #[error("malformed catalog document: {0}")]
    Parse(#[source] Arc<serde_json::Error>),
}

impl From<reqwest::Error> for LoadError {
    fn from(err: reqwest::Error) -> Self {
        LoadError::Request(Arc::new(err))
    }
}

impl From<serde_json::Error> for LoadError {
    fn from(err: serde_json::Error) -> Self {
        LoadError::Parse(Arc::new(err))
    }
}

/// Failure to download a remote bitmap.
#[derive(Debug, Clone, Error)]
pub enum MediaError {
    #[error("image request failed: {0}")]
    Request(#[source] Arc<reqwest::Error>),

    #[error("image server responded with status {0}")]
    Status(u16),
}

impl From<reqwest::Error> for MediaError {
    fn from(err: reqwest::Error) -> Self {
        MediaError::Request(Arc::new(err))
    }
}

/// Failure to read the TOML config file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}
