/// Error types for the player application
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlayerError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Storage error: {0}")]
    Storage(#[from] flac_storage::StorageError),
}

pub type Result<T> = std::result::Result<T, PlayerError>;
