//! Playback session
//!
//! State machine around a single live audio resource:
//!
//! ```text
//! Stopped -> Loading -> Playing <-> Paused -> Stopped
//!               \-> Stopped (load failure)
//! ```
//!
//! Transport calls go to the resource; the resulting state changes arrive
//! later as [`SessionMessage`]s and are applied by [`PlaybackSession::handle_message`].

use crate::engine::{AudioEngine, AudioResource, EngineEvent, EventSink, SessionMessage};
use crate::error::{PlaybackError, Result};
use crate::events::PlaybackEvent;
use crate::progress::ProgressPoll;
use crate::types::{secs_to_duration, PlaybackConfig, PlaybackState, ResourceHandle, SessionAction};
use flac_core::{Track, TrackId};
use tokio::sync::mpsc;

struct LiveResource {
    handle: ResourceHandle,
    resource: Box<dyn AudioResource>,
}

/// The single active playback session
///
/// Holds at most one audio resource. Every `load` tears the previous one
/// down (stop, then release) before the engine is asked for a new one.
pub struct PlaybackSession {
    engine: Box<dyn AudioEngine>,
    config: PlaybackConfig,

    state: PlaybackState,
    current: Option<TrackId>,
    position: f64,
    duration: f64,
    volume: f32,

    resource: Option<LiveResource>,
    poll: Option<ProgressPoll>,
    last_handle: ResourceHandle,

    tx: mpsc::UnboundedSender<SessionMessage>,
    rx: mpsc::UnboundedReceiver<SessionMessage>,

    pending_events: Vec<PlaybackEvent>,
}

impl PlaybackSession {
    /// Create a stopped session driving `engine`
    pub fn new(engine: Box<dyn AudioEngine>, config: PlaybackConfig) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let volume = if config.volume.is_finite() {
            config.volume.clamp(0.0, 1.0)
        } else {
            crate::types::DEFAULT_VOLUME
        };

        Self {
            engine,
            config,
            state: PlaybackState::Stopped,
            current: None,
            position: 0.0,
            duration: 0.0,
            volume,
            resource: None,
            poll: None,
            last_handle: ResourceHandle::new(0),
            tx,
            rx,
            pending_events: Vec::new(),
        }
    }

    /// Load `track` and start playing it
    ///
    /// On failure the session is Stopped without a resource, but `track`
    /// stays current so the UI can still show what failed.
    pub async fn load(&mut self, track: &Track) -> Result<()> {
        self.teardown();

        let previous = self.current.replace(track.id.clone());
        self.position = 0.0;
        self.duration = if track.duration.is_finite() && track.duration > 0.0 {
            track.duration
        } else {
            0.0
        };
        self.set_state(PlaybackState::Loading);
        self.pending_events.push(PlaybackEvent::TrackChanged {
            track_id: track.id.clone(),
            previous_track_id: previous,
        });
        self.emit_position();

        tracing::debug!("Loading {}", track.path.display());

        let bytes = match tokio::fs::read(&track.path).await {
            Ok(bytes) => bytes,
            Err(e) => return Err(self.fail_load(track, e.to_string())),
        };

        let handle = self.last_handle.next();
        self.last_handle = handle;
        let sink = EventSink::new(handle, self.tx.clone());

        let mut resource = match self.engine.create(bytes, self.volume, sink) {
            Ok(resource) => resource,
            Err(e) => return Err(self.fail_load(track, e.to_string())),
        };

        // Gain must be in place before the first frame is produced
        if let Err(e) = apply_volume(resource.as_mut(), self.volume) {
            tracing::warn!("Failed to apply volume to {}: {}", handle, e);
        }

        if let Err(e) = resource.play() {
            tracing::error!("Failed to start {}: {}", track.path.display(), e);
            self.pending_events.push(PlaybackEvent::Error {
                message: e.to_string(),
            });
        }

        self.resource = Some(LiveResource { handle, resource });
        tracing::info!("Loaded \"{}\" by {} as {}", track.title, track.artist, handle);
        Ok(())
    }

    fn fail_load(&mut self, track: &Track, reason: String) -> PlaybackError {
        tracing::error!("Failed to load {}: {}", track.path.display(), reason);
        self.set_state(PlaybackState::Stopped);
        self.pending_events.push(PlaybackEvent::Error {
            message: format!("Cannot play {}: {}", track.title, reason),
        });
        PlaybackError::ResourceLoad {
            path: track.path.clone(),
            reason,
        }
    }

    /// Wait for the next engine or poll message
    ///
    /// Never yields `None` while the session is alive, since it keeps a
    /// sender of its own.
    pub async fn next_message(&mut self) -> Option<SessionMessage> {
        self.rx.recv().await
    }

    /// Take an already queued message, if any
    pub fn try_next_message(&mut self) -> Option<SessionMessage> {
        self.rx.try_recv().ok()
    }

    /// Apply one message; stale handles are ignored
    pub fn handle_message(&mut self, message: SessionMessage) -> Option<SessionAction> {
        match message {
            SessionMessage::Engine { handle, event } => {
                if !self.is_live(handle) {
                    tracing::debug!("Ignoring {:?} from stale resource {}", event, handle);
                    return None;
                }
                self.handle_engine_event(handle, event)
            }
            SessionMessage::ProgressTick { handle } => {
                if self.is_live(handle) && self.state == PlaybackState::Playing {
                    self.refresh_position();
                }
                None
            }
        }
    }

    fn handle_engine_event(
        &mut self,
        handle: ResourceHandle,
        event: EngineEvent,
    ) -> Option<SessionAction> {
        match event {
            EngineEvent::Started => {
                self.set_state(PlaybackState::Playing);
                self.poll = Some(ProgressPoll::start(
                    handle,
                    self.config.progress_interval,
                    self.tx.clone(),
                ));
                None
            }
            EngineEvent::Paused => {
                self.poll = None;
                self.refresh_position();
                self.set_state(PlaybackState::Paused);
                None
            }
            EngineEvent::Ended => {
                self.teardown();
                self.position = self.duration;
                self.emit_position();
                self.set_state(PlaybackState::Stopped);
                Some(SessionAction::AdvanceToNext)
            }
            EngineEvent::Error(message) => {
                tracing::error!("Playback engine error on {}: {}", handle, message);
                self.pending_events.push(PlaybackEvent::Error { message });
                None
            }
        }
    }

    /// Pause if playing, otherwise play; no-op without a resource
    pub fn toggle_play(&mut self) {
        let Some(live) = self.resource.as_mut() else {
            return;
        };

        let result = if self.state == PlaybackState::Playing {
            live.resource.pause()
        } else {
            live.resource.play()
        };

        if let Err(e) = result {
            tracing::warn!("Transport command failed on {}: {}", live.handle, e);
            self.pending_events.push(PlaybackEvent::Error {
                message: e.to_string(),
            });
        }
    }

    /// Seek to `percent` (clamped to 0 - 100) of the current track
    pub fn seek(&mut self, percent: f64) -> Result<()> {
        if self.current.is_none() {
            return Err(PlaybackError::NoTrackLoaded);
        }

        let percent = if percent.is_nan() {
            0.0
        } else {
            percent.clamp(0.0, 100.0)
        };
        let offset = percent / 100.0 * self.duration;

        if let Some(live) = self.resource.as_mut() {
            live.resource.seek(secs_to_duration(offset))?;
        }

        self.position = offset;
        self.emit_position();
        Ok(())
    }

    /// Set the volume (clamped to 0.0 - 1.0)
    ///
    /// The level is always pushed to a live resource, even when unchanged.
    pub fn set_volume(&mut self, level: f32) -> Result<()> {
        if !level.is_finite() {
            return Err(PlaybackError::InvalidVolume(level));
        }

        let level = level.clamp(0.0, 1.0);
        self.volume = level;
        self.pending_events
            .push(PlaybackEvent::VolumeChanged { volume: level });

        if let Some(live) = self.resource.as_mut() {
            apply_volume(live.resource.as_mut(), level)?;
        }
        Ok(())
    }

    /// Stop and release the resource; the track stays current
    pub fn stop(&mut self) {
        self.teardown();
        self.position = 0.0;
        self.emit_position();
        self.set_state(PlaybackState::Stopped);
    }

    /// Release everything before the session goes away
    pub fn shutdown(&mut self) {
        self.teardown();
        self.set_state(PlaybackState::Stopped);
        tracing::debug!("Playback session shut down");
    }

    /// Cancel the poll, then stop and drop the resource
    fn teardown(&mut self) {
        self.poll = None;

        if let Some(mut live) = self.resource.take() {
            if let Err(e) = live.resource.stop() {
                tracing::warn!("Failed to stop {}: {}", live.handle, e);
            }
            tracing::debug!("Released {}", live.handle);
        }
    }

    fn is_live(&self, handle: ResourceHandle) -> bool {
        self.resource.as_ref().is_some_and(|live| live.handle == handle)
    }

    fn refresh_position(&mut self) {
        let Some(live) = self.resource.as_ref() else {
            return;
        };
        let position = live.resource.position().as_secs_f64();
        self.position = position.clamp(0.0, self.duration);
        self.emit_position();
    }

    fn set_state(&mut self, state: PlaybackState) {
        if self.state != state {
            self.state = state;
            self.pending_events.push(PlaybackEvent::StateChanged { state });
        }
    }

    fn emit_position(&mut self) {
        self.pending_events.push(PlaybackEvent::PositionUpdated {
            position_secs: self.position,
            duration_secs: self.duration,
        });
    }

    // ===== State Queries =====

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// Id of the current track (kept after stop, end and load failure)
    pub fn current_track_id(&self) -> Option<&TrackId> {
        self.current.as_ref()
    }

    /// Elapsed seconds, within `0..=duration`
    pub fn position(&self) -> f64 {
        self.position
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    pub fn config(&self) -> &PlaybackConfig {
        &self.config
    }

    /// Whether an audio resource is live
    pub fn has_resource(&self) -> bool {
        self.resource.is_some()
    }

    /// Handle of the live resource
    pub fn resource_handle(&self) -> Option<ResourceHandle> {
        self.resource.as_ref().map(|live| live.handle)
    }

    /// Whether the progress poll is running
    pub fn is_polling(&self) -> bool {
        self.poll.is_some()
    }

    /// Take all events queued since the last call
    pub fn drain_events(&mut self) -> Vec<PlaybackEvent> {
        std::mem::take(&mut self.pending_events)
    }
}

impl Drop for PlaybackSession {
    fn drop(&mut self) {
        self.teardown();
    }
}

fn apply_volume(resource: &mut dyn AudioResource, volume: f32) -> Result<()> {
    resource.set_volume(volume)?;
    resource.sync_output_volume()
}
