/// Storage-specific errors
use thiserror::Error;

/// Result type alias using `StorageError`
pub type Result<T> = std::result::Result<T, StorageError>;

/// Storage error types
#[derive(Error, Debug)]
pub enum StorageError {
    /// Cache document exists but does not describe a valid catalog
    #[error("Cache document is invalid: {0}")]
    CacheInvalid(String),

    /// No platform data directory could be determined
    #[error("No data directory available on this platform")]
    NoDataDir,

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl StorageError {
    /// Create a cache invalid error
    pub fn invalid(reason: impl Into<String>) -> Self {
        Self::CacheInvalid(reason.into())
    }
}
