//! Error types for the importer

use flac_storage::StorageError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ImportError {
    /// The scan root could not be enumerated; no partial result exists
    #[error("Failed to scan {}: {reason}", path.display())]
    ScanFailure { path: PathBuf, reason: String },

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

impl ImportError {
    pub(crate) fn scan_failure(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::ScanFailure {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ImportError>;
