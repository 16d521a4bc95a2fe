//! Image handling
//!
//! - Translating image descriptors into fetchable URLs (resolver.rs)
//! - Downloading and caching the bitmaps the UI shows (fetch.rs)

pub mod fetch;
pub mod resolver;
