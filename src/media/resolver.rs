//! Image descriptor → displayable URL
//!
//! The data file stores human-browsable file repository pages rather than
//! raw bitmap URLs. This module performs the one-time translation to the
//! repository's `Special:FilePath` redirect, which serves the bitmap at a
//! requested width.

use std::borrow::Cow;

use crate::state::data::Image;

/// Width requested for gallery, lightbox and image library entries
pub const DEFAULT_WIDTH: u32 = 1400;
/// Width requested for featured strip tiles
pub const FEATURED_WIDTH: u32 = 900;
/// Wikimedia Commons, where the catalog's file pages live
pub const COMMONS_ROOT: &str = "https://commons.wikimedia.org/wiki";

const FILE_PAGE_MARKER: &str = "/wiki/File:";

/// Resolves image descriptors against a file repository
#[derive(Debug, Clone, PartialEq)]
pub struct ImageResolver {
    repository_root: String,
    gallery_width: u32,
    featured_width: u32,
}

impl Default for ImageResolver {
    fn default() -> Self {
        Self::new(COMMONS_ROOT, DEFAULT_WIDTH, FEATURED_WIDTH)
    }
}

impl ImageResolver {
    pub fn new(repository_root: impl Into<String>, gallery_width: u32, featured_width: u32) -> Self {
        let root: String = repository_root.into();
        Self {
            repository_root: root.trim_end_matches('/').to_string(),
            gallery_width,
            featured_width,
        }
    }

    /// URL for gallery, lightbox and image library entries
    pub fn gallery_url(&self, image: &Image) -> String {
        self.resolve(image, self.gallery_width)
    }

    /// URL for featured strip tiles
    pub fn featured_url(&self, image: &Image) -> String {
        self.resolve(image, self.featured_width)
    }

    /// Produce a displayable URL, or an empty string if the image has nothing
    /// usable.
    ///
    /// A direct URL wins and is returned verbatim (width ignored). Otherwise the
    /// file page is translated.
    pub fn resolve(&self, image: &Image, width: u32) -> String {
        if let Some(direct) = &image.direct_url {
            return direct.clone();
        }
        match &image.commons_file_page {
            Some(page) => self.file_page_to_direct(page, width),
            None => String::new(),
        }
    }

    /// `.../wiki/File:<name>` → `<root>/Special:FilePath/<name>?width=<width>`
    ///
    /// Returns an empty string when the page does not have the expected shape
    /// or the filename is not valid percent-encoded UTF-8.
    pub fn file_page_to_direct(&self, page: &str, width: u32) -> String {
        let filename = match page.find(FILE_PAGE_MARKER) {
            Some(start) => &page[start + FILE_PAGE_MARKER.len()..],
            None => return String::new(),
        };
        if filename.is_empty() || filename.contains('\n') {
            return String::new();
        }

        let decoded = match urlencoding::decode(filename) {
            Ok(decoded) => decoded,
            Err(err) => {
                tracing::debug!(page, error = %err, "file page name is not valid UTF-8");
                return String::new();
            }
        };

        format!(
            "{}/Special:FilePath/{}?width={}",
            self.repository_root,
            encode_uri_component(&decoded),
            width
        )
    }
}

/// Percent-encode like a browser's `encodeURIComponent`: everything except
/// `A-Z a-z 0-9 - _ . ! ~ * ' ( )`.
pub fn encode_uri_component(input: &str) -> String {
    let encoded = urlencoding::encode(input);
    if !encoded.contains('%') {
        return encoded.into_owned();
    }
    restore_mark_characters(encoded)
}

// urlencoding escapes the RFC 3986 sub-delims `! ' ( ) *`, which
// encodeURIComponent leaves alone.
fn restore_mark_characters(encoded: Cow<'_, str>) -> String {
    encoded
        .replace("%21", "!")
        .replace("%27", "'")
        .replace("%28", "(")
        .replace("%29", ")")
        .replace("%2A", "*")
}
