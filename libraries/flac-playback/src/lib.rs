//! FLAC Player - Playback
//!
//! Playback session and queue navigation for FLAC Player.
//!
//! This crate provides:
//! - A session state machine holding at most one audio resource
//! - Progress polling while a track plays
//! - Volume (0.0 - 1.0) applied before the first frame of every track
//! - Percentage seek
//! - A wrapping playlist queue
//! - `SessionContext`, which advances to the next track when one ends
//!
//! # Architecture
//!
//! `flac-playback` does no decoding or audio output itself. The platform
//! supplies an [`AudioEngine`] that turns file bytes into an
//! [`AudioResource`]. The resource reports back through an [`EventSink`];
//! those reports and the progress poll's ticks reach the session as
//! [`SessionMessage`]s on a channel, tagged with the resource's handle.
//!
//! # Example
//!
//! ```rust,no_run
//! use flac_playback::{AudioEngine, PlaybackConfig, SessionContext};
//! use flac_core::Track;
//! use std::path::PathBuf;
//! use std::sync::Arc;
//!
//! # async fn example(engine: Box<dyn AudioEngine>) -> flac_playback::Result<()> {
//! let mut ctx = SessionContext::new(engine, PlaybackConfig::default());
//!
//! let track = Arc::new(Track::new(PathBuf::from("/music/song.flac"), "Song", "Artist"));
//! let id = track.id.clone();
//! ctx.enqueue(track);
//! ctx.play(&id).await?;
//!
//! // Drive the session from the control task
//! loop {
//!     ctx.process_next_message().await?;
//!     for event in ctx.drain_events() {
//!         println!("{event:?}");
//!     }
//! }
//! # }
//! ```

pub mod context;
pub mod engine;
pub mod error;
pub mod events;
mod progress;
pub mod queue;
pub mod session;
pub mod types;

pub use context::{OpenFilesReport, SessionContext};
pub use engine::{AudioEngine, AudioResource, EngineEvent, EventSink, SessionMessage};
pub use error::{PlaybackError, Result};
pub use events::PlaybackEvent;
pub use queue::PlaylistQueue;
pub use session::PlaybackSession;
pub use types::{PlaybackConfig, PlaybackState, ResourceHandle, SessionAction};
