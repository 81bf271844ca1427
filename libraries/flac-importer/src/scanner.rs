//! Directory scanning for FLAC files

use crate::{ImportError, Result};
use flac_core::{is_supported_audio_file, Catalog, ExtractionFailure, MetadataExtractor, Track, TrackId};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::mpsc;
use walkdir::WalkDir;

/// Progress message sent while a scan runs
#[derive(Debug, Clone)]
pub enum ScanProgress {
    /// Enumeration finished; `candidates` files will go through the gateway
    Started { candidates: usize },

    /// One candidate was processed
    FileScanned {
        path: PathBuf,
        error: Option<String>,
    },

    /// Scan finished
    Completed { new_tracks: usize, errors: usize },
}

/// Result of one scan
#[derive(Debug, Default)]
pub struct ScanOutcome {
    /// Tracks not previously in the catalog, in discovery order
    pub new_tracks: Vec<Track>,

    /// Per-file gateway failures
    pub errors: Vec<ExtractionFailure>,

    /// Regular files seen under the root
    pub files_discovered: usize,

    /// Files with a supported extension
    pub candidates: usize,

    /// Candidates skipped because the catalog already holds their path
    pub skipped_existing: usize,
}

/// Scanner for FLAC files in a directory tree
pub struct LibraryScanner {
    extractor: Arc<dyn MetadataExtractor>,

    /// Whether to follow symbolic links
    follow_links: bool,

    progress_tx: Option<mpsc::Sender<ScanProgress>>,
}

impl LibraryScanner {
    /// Create a scanner that reads metadata through `extractor`
    pub fn new(extractor: Arc<dyn MetadataExtractor>) -> Self {
        Self {
            extractor,
            follow_links: false,
            progress_tx: None,
        }
    }

    /// Set whether to follow symbolic links (default: false)
    pub fn follow_links(mut self, follow: bool) -> Self {
        self.follow_links = follow;
        self
    }

    /// Report progress on `tx`
    pub fn with_progress(mut self, tx: mpsc::Sender<ScanProgress>) -> Self {
        self.progress_tx = Some(tx);
        self
    }

    /// Scan `root` for tracks missing from `existing`
    ///
    /// Fails only when the root itself cannot be enumerated. Files the
    /// gateway rejects are collected in [`ScanOutcome::errors`].
    pub async fn scan(&self, root: &Path, existing: &Catalog) -> Result<ScanOutcome> {
        let root = absolute_root(root).await?;
        tracing::info!("Scanning {}", root.display());

        let follow_links = self.follow_links;
        let walk_root = root.clone();
        let (files, files_discovered) =
            tokio::task::spawn_blocking(move || enumerate_files(&walk_root, follow_links))
                .await
                .map_err(|e| ImportError::scan_failure(&root, e.to_string()))??;

        let mut outcome = ScanOutcome {
            files_discovered,
            candidates: files.len(),
            ..ScanOutcome::default()
        };

        self.report(ScanProgress::Started {
            candidates: files.len(),
        })
        .await;

        let mut batch_paths: HashSet<PathBuf> = HashSet::new();
        let mut batch_ids: HashSet<TrackId> = HashSet::new();

        for path in files {
            if existing.contains_path(&path) {
                outcome.skipped_existing += 1;
                continue;
            }
            if !batch_paths.insert(path.clone()) {
                continue;
            }

            let extracted = match unstorable_path(&path) {
                Some(failure) => Err(failure),
                None => self.extractor.extract(&path).await,
            };

            match extracted {
                Ok(mut track) => {
                    // The path we discovered is the dedup key, whatever the gateway reported
                    track.path.clone_from(&path);
                    if track.id.is_empty()
                        || existing.contains_id(&track.id)
                        || batch_ids.contains(&track.id)
                    {
                        track.id = fresh_id(existing, &batch_ids);
                    }
                    batch_ids.insert(track.id.clone());

                    tracing::debug!("Scanned {}", path.display());
                    self.report(ScanProgress::FileScanned { path, error: None })
                        .await;
                    outcome.new_tracks.push(track);
                }
                Err(failure) => {
                    tracing::warn!("{}", failure);
                    self.report(ScanProgress::FileScanned {
                        path,
                        error: Some(failure.reason.clone()),
                    })
                    .await;
                    outcome.errors.push(failure);
                }
            }
        }

        self.report(ScanProgress::Completed {
            new_tracks: outcome.new_tracks.len(),
            errors: outcome.errors.len(),
        })
        .await;

        tracing::info!(
            "Scan of {} complete: {} files, {} candidates, {} new, {} known, {} errors",
            root.display(),
            outcome.files_discovered,
            outcome.candidates,
            outcome.new_tracks.len(),
            outcome.skipped_existing,
            outcome.errors.len()
        );

        Ok(outcome)
    }

    async fn report(&self, progress: ScanProgress) {
        if let Some(tx) = &self.progress_tx {
            // A dropped receiver only means nobody is listening
            let _ = tx.send(progress).await;
        }
    }
}

/// Resolve `root` to a canonical directory path
///
/// `/m` and `/m/sub/..` yield the same root, so file paths stay comparable
/// across scans.
async fn absolute_root(root: &Path) -> Result<PathBuf> {
    let canonical = tokio::fs::canonicalize(root).await.map_err(|e| {
        let reason = if e.kind() == std::io::ErrorKind::NotFound {
            "path does not exist".to_string()
        } else {
            e.to_string()
        };
        ImportError::scan_failure(root, reason)
    })?;

    if !canonical.is_dir() {
        return Err(ImportError::scan_failure(canonical, "not a directory"));
    }
    Ok(canonical)
}

/// Failure for a path the cache document cannot store (non-UTF-8)
fn unstorable_path(path: &Path) -> Option<ExtractionFailure> {
    path.to_str()
        .is_none()
        .then(|| ExtractionFailure::new(path, "file path is not valid UTF-8"))
}

/// Walk `root`, returning supported files and the count of all regular files
fn enumerate_files(root: &Path, follow_links: bool) -> Result<(Vec<PathBuf>, usize)> {
    let mut files = Vec::new();
    let mut discovered = 0;

    for entry in WalkDir::new(root).follow_links(follow_links) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) if e.depth() == 0 => {
                return Err(ImportError::scan_failure(root, e.to_string()));
            }
            Err(e) => {
                tracing::warn!("Skipping unreadable entry under {}: {}", root.display(), e);
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }
        discovered += 1;

        if is_supported_audio_file(entry.path()) {
            files.push(entry.into_path());
        }
    }

    Ok((files, discovered))
}

fn fresh_id(existing: &Catalog, batch: &HashSet<TrackId>) -> TrackId {
    loop {
        let id = TrackId::generate();
        if !existing.contains_id(&id) && !batch.contains(&id) {
            return id;
        }
    }
}
