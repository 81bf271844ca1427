/// Core error types for FLAC Player
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Metadata could not be extracted from a single file
///
/// Always carries the offending path. Scanners collect these next to their
/// successes instead of aborting.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Failed to extract metadata from {}: {reason}", path.display())]
pub struct ExtractionFailure {
    /// File that could not be read
    pub path: PathBuf,

    /// Human readable cause
    pub reason: String,
}

impl ExtractionFailure {
    /// Create an extraction failure for `path`
    pub fn new(path: impl AsRef<Path>, reason: impl Into<String>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_path_and_reason() {
        let err = ExtractionFailure::new("/music/broken.flac", "not a FLAC stream");
        let msg = err.to_string();
        assert!(msg.contains("/music/broken.flac"));
        assert!(msg.contains("not a FLAC stream"));
    }
}
