//! FLAC Player Storage
//!
//! Persisted library cache for FLAC Player.
//!
//! The whole catalog lives in a single JSON document
//! (`<data dir>/flac-player/library.json`). Loading validates the document's
//! shape and falls back to an empty catalog instead of failing, so a corrupt
//! cache only costs a re-scan.
//!
//! # Example
//!
//! ```rust,no_run
//! use flac_storage::CacheStore;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = CacheStore::default_location()?;
//! let loaded = store.load().await;
//! if let Some(issue) = &loaded.issue {
//!     eprintln!("cache ignored: {issue}");
//! }
//! store.save(&loaded.catalog).await?;
//! # Ok(())
//! # }
//! ```

mod cache;
mod error;
mod validate;

pub use cache::{CacheLoad, CacheStore, APP_DIR_NAME, CACHE_FILE_NAME};
pub use error::{Result, StorageError};
pub use validate::{parse_catalog, validate_catalog};
