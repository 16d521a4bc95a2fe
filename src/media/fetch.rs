//! Remote bitmap downloads and the in-memory image cache
//!
//! Bitmaps are kept for the session only. Each URL is requested at most once;
//! a failed download is remembered so the UI falls back to the caption
//! instead of retrying on every frame.

use std::collections::HashMap;

use iced::widget::image::Handle;

use crate::error::MediaError;

/// Download one image
pub async fn fetch_image(url: String) -> Result<Vec<u8>, MediaError> {
    let response = reqwest::get(&url).await?;

    let status = response.status();
    if !status.is_success() {
        return Err(MediaError::Status(status.as_u16()));
    }

    let bytes = response.bytes().await?;
    tracing::debug!(url = %url, size = bytes.len(), "image downloaded");
    Ok(bytes.to_vec())
}

#[derive(Debug, Clone)]
enum CacheEntry {
    Pending,
    Ready(Handle),
    Failed,
}

/// Decoded image handles keyed by resolved URL
#[derive(Debug, Default)]
pub struct ImageCache {
    entries: HashMap<String, CacheEntry>,
}

impl ImageCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `url` as in flight. Returns false if it is already pending,
    /// cached or known to fail, so the caller should not fetch it again.
    pub fn request(&mut self, url: &str) -> bool {
        if url.is_empty() || self.entries.contains_key(url) {
            return false;
        }
        self.entries.insert(url.to_string(), CacheEntry::Pending);
        true
    }

    /// Record the outcome of a download started with [`ImageCache::request`]
    pub fn complete(&mut self, url: String, result: Result<Vec<u8>, MediaError>) {
        let entry = match result {
            Ok(bytes) => CacheEntry::Ready(Handle::from_bytes(bytes)),
            Err(err) => {
                tracing::debug!(url = %url, error = %err, "image download failed");
                CacheEntry::Failed
            }
        };
        self.entries.insert(url, entry);
    }

    pub fn get(&self, url: &str) -> Option<&Handle> {
        match self.entries.get(url) {
            Some(CacheEntry::Ready(handle)) => Some(handle),
            _ => None,
        }
    }
}
