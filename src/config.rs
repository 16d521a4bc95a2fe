//! Application configuration
//!
//! Layered: built-in defaults, then an optional TOML file, then command line
//! flags. A missing file is normal; a broken one is logged and ignored.
//!
//! The config file lives in the user's config directory:
//! - Linux: ~/.config/hidden-places/config.toml
//! - macOS: ~/Library/Application Support/hidden-places/config.toml
//! - Windows: %APPDATA%\hidden-places\config.toml

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::ConfigError;
use crate::media::resolver::{ImageResolver, COMMONS_ROOT, DEFAULT_WIDTH, FEATURED_WIDTH};
use crate::state::loader::DataSource;
use crate::state::selection::SortKey;

const APP_DIR: &str = "hidden-places";
const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Path or http(s) URL of the catalog document
    pub data_source: String,
    /// File repository that `Special:FilePath` links point at
    pub repository_root: String,
    /// Width requested for gallery and lightbox images
    pub gallery_width: u32,
    /// Width requested for featured strip tiles
    pub featured_width: u32,
    /// Download bitmaps for the featured strip and the gallery
    pub remote_images: bool,
    /// Map service used for "Open in maps" links
    pub maps_base: String,
    /// Initial sort order: "az", "rating" or "type"
    pub sort: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_source: "data/data.json".to_string(),
            repository_root: COMMONS_ROOT.to_string(),
            gallery_width: DEFAULT_WIDTH,
            featured_width: FEATURED_WIDTH,
            remote_images: true,
            maps_base: "https://www.google.com/maps".to_string(),
            sort: SortKey::Az.as_str().to_string(),
        }
    }
}

impl AppConfig {
    /// Default config file location, if the platform has a config directory
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
    }

    /// Load from `explicit`, or from the default location.
    ///
    /// Never fails: problems are logged and defaults are used instead.
    pub fn load(explicit: Option<&Path>) -> Self {
        let path = match explicit.map(Path::to_path_buf).or_else(Self::default_path) {
            Some(path) => path,
            None => {
                tracing::debug!("no config directory, using defaults");
                return Self::default();
            }
        };

        match Self::read(&path) {
            Ok(Some(config)) => {
                tracing::info!(path = %path.display(), "config loaded");
                config
            }
            Ok(None) => {
                tracing::debug!(path = %path.display(), "no config file, using defaults");
                Self::default()
            }
            Err(err) => {
                tracing::warn!(error = %err, "ignoring config file");
                Self::default()
            }
        }
    }

    /// Read a config file. `Ok(None)` if it does not exist.
    pub fn read(path: &Path) -> Result<Option<Self>, ConfigError> {
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        toml::from_str(&contents)
            .map(Some)
            .map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })
    }

    /// Command line flags win over the file
    pub fn apply_overrides(&mut self, data: Option<String>, no_remote_images: bool) {
        if let Some(data) = data {
            self.data_source = data;
        }
        if no_remote_images {
            self.remote_images = false;
        }
    }

    pub fn data_source(&self) -> DataSource {
        DataSource::parse(&self.data_source)
    }

    pub fn resolver(&self) -> ImageResolver {
        ImageResolver::new(&self.repository_root, self.gallery_width, self.featured_width)
    }

    pub fn sort_key(&self) -> SortKey {
        self.sort.parse().unwrap_or_default()
    }
}
