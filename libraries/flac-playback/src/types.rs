//! Core types for playback management

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Default volume for a new session
pub const DEFAULT_VOLUME: f32 = 0.8;

/// Default period of the progress poll
pub const DEFAULT_PROGRESS_INTERVAL: Duration = Duration::from_secs(1);

/// Playback state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PlaybackState {
    /// No resource held
    #[default]
    Stopped,

    /// Resource created, waiting for the engine to start
    Loading,

    /// Currently playing
    Playing,

    /// Paused mid-track
    Paused,
}

impl fmt::Display for PlaybackState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Stopped => "stopped",
            Self::Loading => "loading",
            Self::Playing => "playing",
            Self::Paused => "paused",
        };
        f.write_str(name)
    }
}

/// Session configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaybackConfig {
    /// Initial volume (0.0 - 1.0)
    pub volume: f32,

    /// How often the elapsed position is refreshed while playing
    pub progress_interval: Duration,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            volume: DEFAULT_VOLUME,
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
        }
    }
}

/// Identifies one audio resource for its whole lifetime
///
/// Handles grow monotonically within a session, so a message tagged with an
/// old handle can always be told apart from one for the live resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResourceHandle(u64);

impl ResourceHandle {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn id(self) -> u64 {
        self.0
    }

    pub(crate) fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for ResourceHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Follow-up the owner of a session must perform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionAction {
    /// The track ended; load the next one in the queue
    AdvanceToNext,
}

/// Seconds as a `Duration`, saturating on values `Duration` cannot hold
pub(crate) fn secs_to_duration(secs: f64) -> Duration {
    Duration::try_from_secs_f64(secs).unwrap_or(Duration::ZERO)
}
