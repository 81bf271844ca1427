/// Metadata gateway implementation using lofty
use crate::error::{MetadataError, Result};
use async_trait::async_trait;
use flac_core::{ExtractionFailure, MetadataExtractor, Track};
use lofty::{Accessor, AudioFile, FileType, PictureType, Probe, Tag, TaggedFileExt};
use std::path::{Path, PathBuf};

const UNKNOWN_TITLE: &str = "Unknown Title";
const UNKNOWN_ARTIST: &str = "Unknown Artist";
const UNKNOWN_ALBUM: &str = "Unknown Album";

/// Metadata extractor backed by the lofty library
///
/// Reads run on tokio's blocking pool so a slow disk never stalls the
/// control task.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoftyMetadataExtractor;

impl LoftyMetadataExtractor {
    /// Create a new metadata extractor
    pub fn new() -> Self {
        Self
    }

    /// Read a track synchronously
    pub fn read_track(path: &Path) -> Result<Track> {
        if !path.exists() {
            return Err(MetadataError::FileNotFound);
        }

        let tagged_file = Probe::open(path)?.read()?;

        if tagged_file.file_type() != FileType::Flac {
            return Err(MetadataError::UnsupportedFormat(format!(
                "{:?}",
                tagged_file.file_type()
            )));
        }

        // Stream info gives the authoritative length
        let duration = tagged_file.properties().duration().as_secs_f64();

        let tag = tagged_file.primary_tag().or(tagged_file.first_tag());

        let title = tag
            .and_then(|t| t.title().map(|s| s.to_string()))
            .filter(|s| !s.trim().is_empty())
            .or_else(|| {
                path.file_stem()
                    .and_then(|s| s.to_str())
                    .map(|s| s.to_string())
            })
            .unwrap_or_else(|| UNKNOWN_TITLE.to_string());

        let artist = tag
            .and_then(|t| t.artist().map(|s| s.to_string()))
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| UNKNOWN_ARTIST.to_string());

        let album = tag
            .and_then(|t| t.album().map(|s| s.to_string()))
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| UNKNOWN_ALBUM.to_string());

        let mut track = Track::new(path.to_path_buf(), title, artist)
            .with_album(album)
            .with_duration(duration);

        if let Some(cover) = tag.and_then(|t| cover_reference(path, t)) {
            track = track.with_cover(cover);
        }

        Ok(track)
    }
}

/// Reference to the embedded cover, front cover preferred
///
/// Form: `<path>#cover` for the front cover, `<path>#picture-<n>` otherwise.
fn cover_reference(path: &Path, tag: &Tag) -> Option<String> {
    let pictures = tag.pictures();
    if pictures
        .iter()
        .any(|p| p.pic_type() == PictureType::CoverFront)
    {
        return Some(format!("{}#cover", path.display()));
    }
    (!pictures.is_empty()).then(|| format!("{}#picture-0", path.display()))
}

#[async_trait]
impl MetadataExtractor for LoftyMetadataExtractor {
    async fn extract(&self, path: &Path) -> std::result::Result<Track, ExtractionFailure> {
        let owned: PathBuf = path.to_path_buf();
        let result = tokio::task::spawn_blocking(move || Self::read_track(&owned))
            .await
            .map_err(|e| MetadataError::Task(e.to_string()).at(path))?;

        match result {
            Ok(track) => {
                tracing::debug!("Read metadata for {}", path.display());
                Ok(track)
            }
            Err(e) => Err(e.at(path)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_nonexistent_file_returns_error() {
        let result = LoftyMetadataExtractor::read_track(Path::new("/nonexistent/file.flac"));
        assert!(matches!(result, Err(MetadataError::FileNotFound)));
    }

    #[tokio::test]
    async fn extract_failure_carries_path() {
        let extractor = LoftyMetadataExtractor::new();
        let path = Path::new("/nonexistent/file.flac");
        let err = extractor.extract(path).await.unwrap_err();
        assert_eq!(err.path, path);
    }
}
