/// Track domain type
use crate::types::TrackId;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Audio track
///
/// One audio file's identity plus its metadata. Created by a metadata
/// gateway at scan time and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    /// Unique track identifier
    pub id: TrackId,

    /// Absolute file path on disk (unique key for deduplication)
    pub path: PathBuf,

    /// Track title
    pub title: String,

    /// Artist name
    pub artist: String,

    /// Album name
    #[serde(default)]
    pub album: String,

    /// Duration in seconds
    #[serde(default)]
    pub duration: f64,

    /// Embedded cover reference
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover: Option<String>,
}

impl Track {
    /// Create a new track with a generated ID and minimal metadata
    pub fn new(path: PathBuf, title: impl Into<String>, artist: impl Into<String>) -> Self {
        Self {
            id: TrackId::generate(),
            path,
            title: title.into(),
            artist: artist.into(),
            album: String::new(),
            duration: 0.0,
            cover: None,
        }
    }

    /// Set the album name
    #[must_use]
    pub fn with_album(mut self, album: impl Into<String>) -> Self {
        self.album = album.into();
        self
    }

    /// Set the duration in seconds (negative and non-finite values become 0)
    #[must_use]
    pub fn with_duration(mut self, seconds: f64) -> Self {
        self.duration = if seconds.is_finite() {
            seconds.max(0.0)
        } else {
            0.0
        };
        self
    }

    /// Set the embedded cover reference
    #[must_use]
    pub fn with_cover(mut self, cover: impl Into<String>) -> Self {
        self.cover = Some(cover.into());
        self
    }

    /// Get the track duration as a Duration
    pub fn duration(&self) -> Duration {
        Duration::from_secs_f64(self.duration.max(0.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn track_creation() {
        let track = Track::new(PathBuf::from("/music/song.flac"), "Test Song", "Test Artist");
        assert_eq!(track.title, "Test Song");
        assert_eq!(track.path, PathBuf::from("/music/song.flac"));
        assert!(track.album.is_empty());
        assert!(track.cover.is_none());
        assert!(!track.id.is_empty());
    }

    #[test]
    fn duration_is_never_negative() {
        let track = Track::new(PathBuf::from("/a.flac"), "A", "B").with_duration(-3.0);
        assert_eq!(track.duration, 0.0);

        let track = track.with_duration(f64::NAN);
        assert_eq!(track.duration, 0.0);

        let track = track.with_duration(180.5);
        assert_eq!(track.duration(), Duration::from_secs_f64(180.5));
    }

    #[test]
    fn cover_is_omitted_from_json_when_absent() {
        let track = Track::new(PathBuf::from("/a.flac"), "A", "B");
        let json = serde_json::to_value(&track).unwrap();
        assert!(json.get("cover").is_none());
        assert_eq!(json["path"], "/a.flac");
    }

    #[test]
    fn optional_fields_default_when_missing() {
        let track: Track = serde_json::from_str(
            r#"{"id":"abc","path":"/a.flac","title":"A","artist":"B"}"#,
        )
        .unwrap();
        assert_eq!(track.album, "");
        assert_eq!(track.duration, 0.0);
        assert_eq!(track.cover, None);
    }
}
