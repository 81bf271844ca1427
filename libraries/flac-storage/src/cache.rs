//! Library cache store
//!
//! Persists the whole catalog as one pretty-printed JSON document.
//!
//! Known limitation: `save` overwrites the document in place rather than
//! writing a temporary file and renaming it, so a `load` racing a `save` can
//! observe a torn document. Such a load fails validation and falls back to an
//! empty catalog.

use crate::error::{Result, StorageError};
use crate::validate::parse_catalog;
use flac_core::Catalog;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Application directory under the platform data dir
pub const APP_DIR_NAME: &str = "flac-player";

/// Cache document file name
pub const CACHE_FILE_NAME: &str = "library.json";

/// Outcome of loading the cache
///
/// Loading never fails outright: problems are reported in `issue` and the
/// catalog falls back to empty.
#[derive(Debug, Default)]
pub struct CacheLoad {
    /// Restored catalog (empty when the document is missing or invalid)
    pub catalog: Catalog,

    /// Why the document was rejected, if it was
    pub issue: Option<StorageError>,
}

impl CacheLoad {
    /// Whether a document existed but could not be used
    ///
    /// True both when it could not be read and when validation rejected it.
    pub fn is_invalid(&self) -> bool {
        self.issue.is_some()
    }
}

/// Single-document catalog store
#[derive(Debug, Clone)]
pub struct CacheStore {
    file: PathBuf,
}

impl CacheStore {
    /// Store the document inside `dir` (as `dir/library.json`)
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            file: dir.into().join(CACHE_FILE_NAME),
        }
    }

    /// Store the document in the platform data directory
    ///
    /// Linux: `~/.local/share/flac-player/library.json`
    pub fn default_location() -> Result<Self> {
        let data_dir = dirs::data_dir().ok_or(StorageError::NoDataDir)?;
        Ok(Self::new(data_dir.join(APP_DIR_NAME)))
    }

    /// Path of the cache document
    pub fn file_path(&self) -> &Path {
        &self.file
    }

    /// Write the full catalog, replacing any previous document
    pub async fn save(&self, catalog: &Catalog) -> Result<()> {
        if let Some(dir) = self.file.parent() {
            tokio::fs::create_dir_all(dir).await?;
        }

        let json = serde_json::to_string_pretty(catalog)?;
        tokio::fs::write(&self.file, json).await?;

        tracing::info!(
            "Saved {} tracks to cache {}",
            catalog.len(),
            self.file.display()
        );
        Ok(())
    }

    /// Read the catalog back
    ///
    /// A missing document is an empty catalog, not an error.
    pub async fn load(&self) -> CacheLoad {
        let text = match tokio::fs::read_to_string(&self.file).await {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!("No cache document at {}", self.file.display());
                return CacheLoad::default();
            }
            Err(e) => {
                tracing::warn!("Failed to read cache {}: {}", self.file.display(), e);
                return CacheLoad {
                    catalog: Catalog::new(),
                    issue: Some(e.into()),
                };
            }
        };

        match parse_catalog(&text) {
            Ok(catalog) => {
                tracing::info!("Loaded {} tracks from cache", catalog.len());
                CacheLoad {
                    catalog,
                    issue: None,
                }
            }
            Err(e) => {
                tracing::warn!("Ignoring cache {}: {}", self.file.display(), e);
                CacheLoad {
                    catalog: Catalog::new(),
                    issue: Some(e),
                }
            }
        }
    }

    /// Remove the document
    ///
    /// Returns `true` if a document was removed, `false` if there was none.
    pub async fn clear(&self) -> Result<bool> {
        match tokio::fs::remove_file(&self.file).await {
            Ok(()) => {
                tracing::info!("Cleared cache {}", self.file.display());
                Ok(true)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}
