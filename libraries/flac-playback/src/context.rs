//! Session owner
//!
//! `SessionContext` ties the playback session to the queue: it resolves
//! navigation to tracks, loads them, and follows up on `AdvanceToNext`.

use crate::engine::{AudioEngine, SessionMessage};
use crate::error::{PlaybackError, Result};
use crate::events::PlaybackEvent;
use crate::queue::PlaylistQueue;
use crate::session::PlaybackSession;
use crate::types::{PlaybackConfig, SessionAction};
use flac_core::{is_supported_audio_file, ExtractionFailure, MetadataExtractor, Track, TrackId};
use std::path::PathBuf;
use std::sync::Arc;

/// Result of opening individual files
#[derive(Debug, Default)]
pub struct OpenFilesReport {
    /// Tracks appended to the queue
    pub added: usize,

    /// Files skipped because the queue already holds their path
    pub skipped: usize,

    /// Files the gateway could not read
    pub failures: Vec<ExtractionFailure>,
}

/// Playback session plus its queue
pub struct SessionContext {
    session: PlaybackSession,
    queue: PlaylistQueue,
}

impl SessionContext {
    pub fn new(engine: Box<dyn AudioEngine>, config: PlaybackConfig) -> Self {
        Self {
            session: PlaybackSession::new(engine, config),
            queue: PlaylistQueue::new(),
        }
    }

    /// Play a queued track
    pub async fn play(&mut self, id: &TrackId) -> Result<()> {
        let track = self
            .queue
            .select(id)
            .ok_or_else(|| PlaybackError::NotInQueue(id.clone()))?;
        self.session.load(&track).await
    }

    /// Play the track after the current one (wrapping)
    pub async fn next(&mut self) -> Result<()> {
        let current = self.session.current_track_id().cloned();
        let track = self
            .queue
            .next_from(current.as_ref())
            .ok_or(PlaybackError::QueueEmpty)?;
        self.session.load(&track).await
    }

    /// Play the track before the current one (wrapping)
    pub async fn previous(&mut self) -> Result<()> {
        let current = self.session.current_track_id().cloned();
        let track = self
            .queue
            .previous_from(current.as_ref())
            .ok_or(PlaybackError::QueueEmpty)?;
        self.session.load(&track).await
    }

    /// Toggle play/pause, reloading when nothing is live
    ///
    /// Unlike [`PlaybackSession::toggle_play`], which is a no-op without a
    /// resource, this loads the current track (or the queue's current entry)
    /// again from the start after a stop or an ended track.
    pub async fn toggle_play(&mut self) -> Result<()> {
        if self.session.has_resource() {
            self.session.toggle_play();
            return Ok(());
        }

        let track = self
            .current_track()
            .or_else(|| self.queue.current())
            .cloned()
            .ok_or(PlaybackError::NoTrackLoaded)?;
        self.session.load(&track).await
    }

    /// Queue a track; returns `false` for duplicates
    pub fn enqueue(&mut self, track: Arc<Track>) -> bool {
        self.queue.add(track)
    }

    /// Queue many tracks; returns how many were added
    pub fn enqueue_all(&mut self, tracks: impl IntoIterator<Item = Arc<Track>>) -> usize {
        self.queue.extend(tracks)
    }

    /// Wait for one session message and apply it
    ///
    /// When the message ends the track, the next one is loaded.
    pub async fn process_next_message(&mut self) -> Result<Option<SessionAction>> {
        match self.session.next_message().await {
            Some(message) => self.apply_message(message).await,
            None => Ok(None),
        }
    }

    /// Apply every message that is already queued
    pub async fn process_pending_messages(&mut self) -> Result<Vec<SessionAction>> {
        let mut actions = Vec::new();
        while let Some(message) = self.session.try_next_message() {
            if let Some(action) = self.apply_message(message).await? {
                actions.push(action);
            }
        }
        Ok(actions)
    }

    /// Apply a message received elsewhere (e.g. from a `select!` loop)
    pub async fn apply_message(&mut self, message: SessionMessage) -> Result<Option<SessionAction>> {
        let action = self.session.handle_message(message);
        if action == Some(SessionAction::AdvanceToNext) {
            tracing::debug!("Track ended, advancing");
            self.next().await?;
        }
        Ok(action)
    }

    /// Add individual files to the queue
    ///
    /// Unsupported extensions are skipped silently and non-UTF-8 paths are
    /// reported as failures. If nothing was playing, the first added track
    /// starts.
    pub async fn open_files(
        &mut self,
        paths: &[PathBuf],
        extractor: &dyn MetadataExtractor,
    ) -> Result<OpenFilesReport> {
        let had_current = self.current_track().is_some();
        let mut report = OpenFilesReport::default();
        let mut first_added = None;

        for path in paths.iter().filter(|p| is_supported_audio_file(p)) {
            if self.queue.contains_path(path) {
                report.skipped += 1;
                continue;
            }

            let extracted = if path.to_str().is_some() {
                extractor.extract(path).await
            } else {
                Err(ExtractionFailure::new(path, "file path is not valid UTF-8"))
            };

            match extracted {
                Ok(mut track) => {
                    track.path.clone_from(path);
                    if track.id.is_empty() || self.queue.contains_id(&track.id) {
                        track.id = TrackId::generate();
                    }
                    let id = track.id.clone();
                    if self.queue.add(Arc::new(track)) {
                        report.added += 1;
                        first_added.get_or_insert(id);
                    }
                }
                Err(failure) => {
                    tracing::warn!("{}", failure);
                    report.failures.push(failure);
                }
            }
        }

        tracing::info!(
            "Opened {} files: {} added, {} already queued, {} failed",
            paths.len(),
            report.added,
            report.skipped,
            report.failures.len()
        );

        if let (false, Some(id)) = (had_current, first_added) {
            self.play(&id).await?;
        }
        Ok(report)
    }

    /// The session's current track, looked up in the queue
    pub fn current_track(&self) -> Option<&Arc<Track>> {
        self.session
            .current_track_id()
            .and_then(|id| self.queue.find(id))
    }

    pub fn session(&self) -> &PlaybackSession {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut PlaybackSession {
        &mut self.session
    }

    pub fn queue(&self) -> &PlaylistQueue {
        &self.queue
    }

    /// Take all events queued by the session
    pub fn drain_events(&mut self) -> Vec<PlaybackEvent> {
        self.session.drain_events()
    }

    /// Tear the session down
    pub fn shutdown(&mut self) {
        self.session.shutdown();
    }
}
