//! Track catalog
//!
//! Insertion-ordered set of tracks keyed by path. Tracks are shared behind
//! `Arc` so the playback queue can hold the same instances.

use crate::types::{Track, TrackId};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// The full set of known tracks
///
/// Invariant: no two entries share a `path` or an `id`.
/// Serializes as a plain array of tracks.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "Vec<Arc<Track>>", into = "Vec<Arc<Track>>")]
pub struct Catalog {
    tracks: Vec<Arc<Track>>,
    paths: HashSet<PathBuf>,
    ids: HashSet<TrackId>,
}

impl Catalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a track, refusing duplicates by path or id
    ///
    /// Returns `true` if the track was added.
    pub fn insert(&mut self, track: Track) -> bool {
        self.insert_shared(Arc::new(track))
    }

    /// Insert an already shared track, refusing duplicates by path or id
    pub fn insert_shared(&mut self, track: Arc<Track>) -> bool {
        if self.paths.contains(&track.path) || self.ids.contains(&track.id) {
            return false;
        }
        self.paths.insert(track.path.clone());
        self.ids.insert(track.id.clone());
        self.tracks.push(track);
        true
    }

    /// Union with `tracks`; returns how many were added
    pub fn extend(&mut self, tracks: impl IntoIterator<Item = Track>) -> usize {
        tracks
            .into_iter()
            .map(|track| self.insert(track))
            .filter(|added| *added)
            .count()
    }

    /// Check whether a track with this path is known
    pub fn contains_path(&self, path: &Path) -> bool {
        self.paths.contains(path)
    }

    /// Check whether a track with this id is known
    pub fn contains_id(&self, id: &TrackId) -> bool {
        self.ids.contains(id)
    }

    /// Find a track by path
    pub fn find_by_path(&self, path: &Path) -> Option<&Arc<Track>> {
        if !self.contains_path(path) {
            return None;
        }
        self.tracks.iter().find(|t| t.path == path)
    }

    /// Find a track by id
    pub fn find_by_id(&self, id: &TrackId) -> Option<&Arc<Track>> {
        if !self.contains_id(id) {
            return None;
        }
        self.tracks.iter().find(|t| &t.id == id)
    }

    /// All tracks in insertion order
    pub fn tracks(&self) -> &[Arc<Track>] {
        &self.tracks
    }

    /// Iterate over tracks in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &Arc<Track>> {
        self.tracks.iter()
    }

    /// Number of tracks
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Whether the catalog is empty
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Remove every track
    pub fn clear(&mut self) {
        self.tracks.clear();
        self.paths.clear();
        self.ids.clear();
    }
}

impl PartialEq for Catalog {
    fn eq(&self, other: &Self) -> bool {
        self.tracks == other.tracks
    }
}

impl From<Vec<Arc<Track>>> for Catalog {
    /// Builds a catalog, silently dropping later duplicates
    fn from(tracks: Vec<Arc<Track>>) -> Self {
        let mut catalog = Self::new();
        for track in tracks {
            catalog.insert_shared(track);
        }
        catalog
    }
}

impl From<Catalog> for Vec<Arc<Track>> {
    fn from(catalog: Catalog) -> Self {
        catalog.tracks
    }
}

impl FromIterator<Track> for Catalog {
    fn from_iter<I: IntoIterator<Item = Track>>(iter: I) -> Self {
        let mut catalog = Self::new();
        catalog.extend(iter);
        catalog
    }
}
