/// Core traits for FLAC Player
use crate::error::ExtractionFailure;
use crate::types::Track;
use async_trait::async_trait;
use std::path::Path;

/// Metadata gateway
///
/// Implementers turn one audio file into a `Track`. Callers pre-filter by
/// extension; implementers must not have side effects beyond reading.
#[async_trait]
pub trait MetadataExtractor: Send + Sync {
    /// Extract track metadata from the file at `path`
    ///
    /// # Errors
    /// Returns an `ExtractionFailure` carrying `path` when the file cannot be
    /// read or is not a supported stream
    async fn extract(&self, path: &Path) -> Result<Track, ExtractionFailure>;
}
