//! Catalog loading
//!
//! A single best-effort read of the static data file, from disk or over
//! HTTP(S). No retry, no partial recovery: either the whole document parses
//! or the caller gets a [`LoadError`].

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use super::data::CatalogDocument;
use crate::error::LoadError;

/// Where the data file lives
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    File(PathBuf),
    Remote(String),
}

impl DataSource {
    /// `http://` and `https://` locations are fetched, anything else is a path
    pub fn parse(location: &str) -> Self {
        let trimmed = location.trim();
        if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            DataSource::Remote(trimmed.to_string())
        } else {
            DataSource::File(PathBuf::from(trimmed))
        }
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::File(path) => write!(f, "{}", path.display()),
            DataSource::Remote(url) => f.write_str(url),
        }
    }
}

/// Read and parse the catalog document
pub async fn load_catalog(source: DataSource) -> Result<CatalogDocument, LoadError> {
    tracing::info!(source = %source, "loading catalog");

    let bytes = match &source {
        DataSource::File(path) => tokio::fs::read(path).await.map_err(|err| LoadError::Io {
            path: path.clone(),
            source: Arc::new(err),
        })?,
        DataSource::Remote(url) => fetch_remote(url).await?,
    };

    let document = CatalogDocument::from_slice(&bytes)?;

    tracing::info!(
        places = document.places.len(),
        routes = document.routes.len(),
        "catalog loaded"
    );

    Ok(document)
}

/// Anonymous GET; any non-2xx status is a failure
async fn fetch_remote(url: &str) -> Result<Vec<u8>, LoadError> {
    let response = reqwest::get(url).await?;

    let status = response.status();
    if !status.is_success() {
        return Err(LoadError::Status(status.as_u16()));
    }

    Ok(response.bytes().await?.to_vec())
}
