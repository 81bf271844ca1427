//! Catalog owner
//!
//! `LibraryContext` holds the catalog for the lifetime of the application and
//! keeps the cache document in step with it.

use crate::scanner::LibraryScanner;
use crate::Result;
use flac_core::{Catalog, ExtractionFailure, Track};
use flac_storage::{CacheStore, StorageError};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Summary of a scan applied to the catalog
#[derive(Debug, Default)]
pub struct ScanReport {
    /// Tracks added to the catalog
    pub added: usize,

    /// Per-file gateway failures
    pub errors: Vec<ExtractionFailure>,

    /// Regular files seen under the root
    pub files_discovered: usize,

    /// Files with a supported extension
    pub candidates: usize,

    /// Candidates already in the catalog
    pub skipped_existing: usize,

    /// Set when the catalog was updated in memory but could not be saved
    pub save_error: Option<StorageError>,
}

/// Library context: catalog, cache store and scanner
pub struct LibraryContext {
    catalog: Catalog,
    store: CacheStore,
    scanner: LibraryScanner,
    scanning: Arc<AtomicBool>,
    cache_issue: Option<StorageError>,
}

impl LibraryContext {
    /// Restore the catalog from `store`
    ///
    /// An unreadable or invalid cache yields an empty catalog; the reason is
    /// kept in [`LibraryContext::cache_issue`].
    pub async fn open(store: CacheStore, scanner: LibraryScanner) -> Self {
        let loaded = store.load().await;
        if let Some(issue) = &loaded.issue {
            tracing::warn!("Starting with an empty library: {}", issue);
        }

        Self {
            catalog: loaded.catalog,
            store,
            scanner,
            scanning: Arc::new(AtomicBool::new(false)),
            cache_issue: loaded.issue,
        }
    }

    /// Scan `root`, merge new tracks and save the cache
    ///
    /// A failed save does not roll back the merge; it is reported in
    /// [`ScanReport::save_error`].
    pub async fn scan(&mut self, root: &Path) -> Result<ScanReport> {
        self.scanning.store(true, Ordering::SeqCst);
        let outcome = self.scanner.scan(root, &self.catalog).await;
        self.scanning.store(false, Ordering::SeqCst);
        let outcome = outcome?;

        let added = self.catalog.extend(outcome.new_tracks);

        let save_error = match self.store.save(&self.catalog).await {
            Ok(()) => None,
            Err(e) => {
                tracing::warn!("Library updated but cache not saved: {}", e);
                Some(e)
            }
        };

        Ok(ScanReport {
            added,
            errors: outcome.errors,
            files_discovered: outcome.files_discovered,
            candidates: outcome.candidates,
            skipped_existing: outcome.skipped_existing,
            save_error,
        })
    }

    /// Empty the catalog and remove the cache document
    pub async fn clear(&mut self) -> Result<()> {
        self.catalog.clear();
        let removed = self.store.clear().await?;
        tracing::info!("Library cleared (cache removed: {})", removed);
        Ok(())
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn tracks(&self) -> &[Arc<Track>] {
        self.catalog.tracks()
    }

    pub fn len(&self) -> usize {
        self.catalog.len()
    }

    pub fn is_empty(&self) -> bool {
        self.catalog.is_empty()
    }

    pub fn find_by_path(&self, path: &Path) -> Option<&Arc<Track>> {
        self.catalog.find_by_path(path)
    }

    /// Whether a scan is in progress
    pub fn is_scanning(&self) -> bool {
        self.scanning.load(Ordering::SeqCst)
    }

    /// Shared scanning flag, for observers outside the control task
    pub fn scanning_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.scanning)
    }

    /// Why the cache was ignored at open, if it was
    pub fn cache_issue(&self) -> Option<&StorageError> {
        self.cache_issue.as_ref()
    }

    pub fn store(&self) -> &CacheStore {
        &self.store
    }
}
