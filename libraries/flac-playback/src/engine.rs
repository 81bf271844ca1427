//! Audio engine seam
//!
//! The session never touches decoding or output directly. An [`AudioEngine`]
//! turns file bytes into an [`AudioResource`], and the resource reports back
//! through its [`EventSink`]. Every report is tagged with the resource's
//! handle, so reports from a resource the session already dropped are
//! recognisable and ignored.

use crate::error::Result;
use crate::types::ResourceHandle;
use std::time::Duration;
use tokio::sync::mpsc;

/// Notification from an audio resource
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    /// Output actually started (or resumed)
    Started,

    /// Output paused
    Paused,

    /// The track played to its end
    Ended,

    /// Asynchronous engine failure
    Error(String),
}

/// Message delivered to the session's control task
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionMessage {
    /// Engine notification for `handle`
    Engine {
        handle: ResourceHandle,
        event: EngineEvent,
    },

    /// Progress poll fired for `handle`
    ProgressTick { handle: ResourceHandle },
}

/// Sender half handed to one audio resource
///
/// Cheap to clone; engines may move clones into their own tasks or threads.
#[derive(Debug, Clone)]
pub struct EventSink {
    handle: ResourceHandle,
    tx: mpsc::UnboundedSender<SessionMessage>,
}

impl EventSink {
    pub fn new(handle: ResourceHandle, tx: mpsc::UnboundedSender<SessionMessage>) -> Self {
        Self { handle, tx }
    }

    /// Handle of the resource this sink belongs to
    pub fn handle(&self) -> ResourceHandle {
        self.handle
    }

    /// Send an event; returns `false` once the session is gone
    pub fn emit(&self, event: EngineEvent) -> bool {
        self.tx
            .send(SessionMessage::Engine {
                handle: self.handle,
                event,
            })
            .is_ok()
    }

    pub fn started(&self) -> bool {
        self.emit(EngineEvent::Started)
    }

    pub fn paused(&self) -> bool {
        self.emit(EngineEvent::Paused)
    }

    pub fn ended(&self) -> bool {
        self.emit(EngineEvent::Ended)
    }

    pub fn error(&self, message: impl Into<String>) -> bool {
        self.emit(EngineEvent::Error(message.into()))
    }
}

/// One loaded track inside the engine
///
/// Dropping the resource must release everything it holds.
pub trait AudioResource: Send {
    /// Start or resume output; the engine confirms with `Started`
    fn play(&mut self) -> Result<()>;

    /// Pause output; the engine confirms with `Paused`
    fn pause(&mut self) -> Result<()>;

    /// Stop output ahead of release
    fn stop(&mut self) -> Result<()>;

    /// Move the read position
    fn seek(&mut self, position: Duration) -> Result<()>;

    /// Set the resource gain (0.0 - 1.0)
    fn set_volume(&mut self, volume: f32) -> Result<()>;

    /// Push the resource gain to the output stage
    ///
    /// Engines whose gain lives in a separate output node apply it here.
    fn sync_output_volume(&mut self) -> Result<()> {
        Ok(())
    }

    /// Current read position
    fn position(&self) -> Duration;
}

/// Factory for audio resources
pub trait AudioEngine: Send {
    /// Decode handoff: build a resource for `bytes` at `volume`
    ///
    /// The resource reports through `sink` from then on.
    fn create(
        &mut self,
        bytes: Vec<u8>,
        volume: f32,
        sink: EventSink,
    ) -> Result<Box<dyn AudioResource>>;
}
