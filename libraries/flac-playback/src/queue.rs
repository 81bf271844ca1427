//! Playlist queue with a current-track pointer
//!
//! Navigation wraps around in both directions.

use flac_core::{Track, TrackId};
use std::path::Path;
use std::sync::Arc;

/// Ordered playlist
///
/// The pointer is set whenever the queue is non-empty.
#[derive(Debug, Clone, Default)]
pub struct PlaylistQueue {
    tracks: Vec<Arc<Track>>,
    current: Option<usize>,
}

impl PlaylistQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a track unless one with the same path or id is queued
    ///
    /// The first track added to an empty queue becomes current.
    pub fn add(&mut self, track: Arc<Track>) -> bool {
        if self.contains_path(&track.path) || self.contains_id(&track.id) {
            return false;
        }
        self.tracks.push(track);
        if self.current.is_none() {
            self.current = Some(0);
        }
        true
    }

    /// Append many tracks; returns how many were added
    pub fn extend(&mut self, tracks: impl IntoIterator<Item = Arc<Track>>) -> usize {
        tracks
            .into_iter()
            .map(|track| self.add(track))
            .filter(|added| *added)
            .count()
    }

    /// Move to the track after the current one, wrapping at the end
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Option<Arc<Track>> {
        let index = self.current?;
        self.move_to((index + 1) % self.tracks.len())
    }

    /// Move to the track before the current one, wrapping at the start
    pub fn previous(&mut self) -> Option<Arc<Track>> {
        let index = self.current?;
        let len = self.tracks.len();
        self.move_to((index + len - 1) % len)
    }

    /// Move to the track after `id`
    ///
    /// An unknown or absent id moves to the first track.
    pub fn next_from(&mut self, id: Option<&TrackId>) -> Option<Arc<Track>> {
        match id.and_then(|id| self.index_of(id)) {
            Some(index) => {
                self.current = Some(index);
                self.next()
            }
            None => self.move_to(0),
        }
    }

    /// Move to the track before `id`
    ///
    /// An unknown or absent id moves to the last track.
    pub fn previous_from(&mut self, id: Option<&TrackId>) -> Option<Arc<Track>> {
        match id.and_then(|id| self.index_of(id)) {
            Some(index) => {
                self.current = Some(index);
                self.previous()
            }
            None => {
                let last = self.tracks.len().checked_sub(1)?;
                self.move_to(last)
            }
        }
    }

    /// Make `id` current
    pub fn select(&mut self, id: &TrackId) -> Option<Arc<Track>> {
        let index = self.index_of(id)?;
        self.move_to(index)
    }

    fn move_to(&mut self, index: usize) -> Option<Arc<Track>> {
        let track = self.tracks.get(index)?;
        self.current = Some(index);
        Some(Arc::clone(track))
    }

    fn index_of(&self, id: &TrackId) -> Option<usize> {
        self.tracks.iter().position(|t| &t.id == id)
    }

    pub fn current(&self) -> Option<&Arc<Track>> {
        self.current.and_then(|index| self.tracks.get(index))
    }

    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    pub fn find(&self, id: &TrackId) -> Option<&Arc<Track>> {
        self.tracks.iter().find(|t| &t.id == id)
    }

    pub fn contains_path(&self, path: &Path) -> bool {
        self.tracks.iter().any(|t| t.path == path)
    }

    pub fn contains_id(&self, id: &TrackId) -> bool {
        self.index_of(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<Track>> {
        self.tracks.iter()
    }

    pub fn tracks(&self) -> &[Arc<Track>] {
        &self.tracks
    }

    pub fn clear(&mut self) {
        self.tracks.clear();
        self.current = None;
    }
}
