/// Metadata-specific errors
use flac_core::ExtractionFailure;
use std::path::Path;
use thiserror::Error;

/// Result type alias using `MetadataError`
pub type Result<T> = std::result::Result<T, MetadataError>;

/// Metadata error types
#[derive(Error, Debug)]
pub enum MetadataError {
    /// File not found
    #[error("File not found")]
    FileNotFound,

    /// Probed file is not a FLAC stream
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Tag parsing error
    #[error(transparent)]
    Lofty(#[from] lofty::error::LoftyError),

    /// Blocking reader task failed
    #[error("Reader task failed: {0}")]
    Task(String),
}

impl MetadataError {
    /// Attach the offending path, producing the gateway-level failure
    pub fn at(self, path: &Path) -> ExtractionFailure {
        ExtractionFailure::new(path, self.to_string())
    }
}
