//! Playback Events
//!
//! Queued by the session for UI synchronization and read with
//! `drain_events()`.

use crate::types::PlaybackState;
use flac_core::TrackId;
use serde::{Deserialize, Serialize};

/// Events emitted by the playback session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PlaybackEvent {
    /// Transport state changed
    StateChanged { state: PlaybackState },

    /// A different track became current
    TrackChanged {
        track_id: TrackId,
        previous_track_id: Option<TrackId>,
    },

    /// Elapsed position refreshed (poll, seek, stop or end of track)
    PositionUpdated {
        position_secs: f64,
        duration_secs: f64,
    },

    /// Volume changed (0.0 - 1.0)
    VolumeChanged { volume: f32 },

    /// Something went wrong that the user should hear about
    Error { message: String },
}
