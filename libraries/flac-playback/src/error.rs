//! Error types for playback management

use flac_core::TrackId;
use std::path::PathBuf;
use thiserror::Error;

/// Playback errors
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// No track is currently loaded
    #[error("No track loaded")]
    NoTrackLoaded,

    /// Queue is empty
    #[error("Queue is empty")]
    QueueEmpty,

    /// The requested track is not in the queue
    #[error("Track {0} is not in the queue")]
    NotInQueue(TrackId),

    /// The file could not be read or handed to the engine
    #[error("Failed to load {}: {reason}", path.display())]
    ResourceLoad { path: PathBuf, reason: String },

    /// The engine rejected a transport command
    #[error("Playback engine error: {0}")]
    Engine(String),

    /// Volume must be a finite number
    #[error("Invalid volume: {0}")]
    InvalidVolume(f32),
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
