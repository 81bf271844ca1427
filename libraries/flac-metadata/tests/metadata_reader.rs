//! Integration tests for the lofty-backed metadata gateway
//!
//! Fixtures are built in memory: a `fLaC` marker and the metadata blocks the
//! gateway reads, with no audio frames.

use flac_core::MetadataExtractor;
use flac_metadata::{LoftyMetadataExtractor, MetadataError};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

// ===== Fixtures =====

const BLOCK_STREAMINFO: u8 = 0;
const BLOCK_VORBIS_COMMENT: u8 = 4;
const BLOCK_PICTURE: u8 = 6;

/// STREAMINFO for 16-bit stereo at `sample_rate` holding `total_samples`
fn stream_info(sample_rate: u32, total_samples: u64) -> Vec<u8> {
    let mut body = Vec::with_capacity(34);
    body.extend_from_slice(&4096u16.to_be_bytes());
    body.extend_from_slice(&4096u16.to_be_bytes());
    body.extend_from_slice(&[0u8; 6]);
    let packed = (u64::from(sample_rate) << 44) | (1u64 << 41) | (15u64 << 36) | total_samples;
    body.extend_from_slice(&packed.to_be_bytes());
    body.extend_from_slice(&[0u8; 16]);
    body
}

fn vorbis_comment(fields: &[(&str, &str)]) -> Vec<u8> {
    let vendor = b"flac-player tests";
    let mut body = Vec::new();
    body.extend_from_slice(&(vendor.len() as u32).to_le_bytes());
    body.extend_from_slice(vendor);
    body.extend_from_slice(&(fields.len() as u32).to_le_bytes());
    for (key, value) in fields {
        let entry = format!("{key}={value}");
        body.extend_from_slice(&(entry.len() as u32).to_le_bytes());
        body.extend_from_slice(entry.as_bytes());
    }
    body
}

/// PICTURE block of `picture_type` (3 = front cover)
fn picture(picture_type: u32) -> Vec<u8> {
    let mime = b"image/png";
    let data = [0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];
    let mut body = Vec::new();
    body.extend_from_slice(&picture_type.to_be_bytes());
    body.extend_from_slice(&(mime.len() as u32).to_be_bytes());
    body.extend_from_slice(mime);
    body.extend_from_slice(&0u32.to_be_bytes());
    for dimension in [1u32, 1, 24, 0] {
        body.extend_from_slice(&dimension.to_be_bytes());
    }
    body.extend_from_slice(&(data.len() as u32).to_be_bytes());
    body.extend_from_slice(&data);
    body
}

/// Assemble a FLAC file from `(block type, body)` pairs
fn flac_bytes(blocks: &[(u8, Vec<u8>)]) -> Vec<u8> {
    let mut bytes = b"fLaC".to_vec();
    for (index, (block_type, body)) in blocks.iter().enumerate() {
        let last = if index + 1 == blocks.len() { 0x80 } else { 0 };
        bytes.push(last | block_type);
        bytes.extend_from_slice(&(body.len() as u32).to_be_bytes()[1..]);
        bytes.extend_from_slice(body);
    }
    bytes
}

fn write_fixture(dir: &TempDir, name: &str, bytes: &[u8]) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, bytes).unwrap();
    path
}

/// Minimal PCM WAV: 8 kHz mono 16-bit, two samples
fn wav_bytes() -> Vec<u8> {
    let mut fmt = Vec::new();
    fmt.extend_from_slice(&1u16.to_le_bytes());
    fmt.extend_from_slice(&1u16.to_le_bytes());
    fmt.extend_from_slice(&8000u32.to_le_bytes());
    fmt.extend_from_slice(&16000u32.to_le_bytes());
    fmt.extend_from_slice(&2u16.to_le_bytes());
    fmt.extend_from_slice(&16u16.to_le_bytes());
    let data = [0u8; 4];

    let mut body = b"WAVE".to_vec();
    body.extend_from_slice(b"fmt ");
    body.extend_from_slice(&(fmt.len() as u32).to_le_bytes());
    body.extend_from_slice(&fmt);
    body.extend_from_slice(b"data");
    body.extend_from_slice(&(data.len() as u32).to_le_bytes());
    body.extend_from_slice(&data);

    let mut bytes = b"RIFF".to_vec();
    bytes.extend_from_slice(&(body.len() as u32).to_le_bytes());
    bytes.extend_from_slice(&body);
    bytes
}

fn assert_seconds(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 0.01,
        "expected {expected}s, got {actual}s"
    );
}

// ===== Successful reads =====

#[tokio::test]
async fn tags_and_duration_are_read() {
    let temp = TempDir::new().unwrap();
    let bytes = flac_bytes(&[
        (BLOCK_STREAMINFO, stream_info(44_100, 44_100 * 3)),
        (
            BLOCK_VORBIS_COMMENT,
            vorbis_comment(&[
                ("TITLE", "Blue in Green"),
                ("ARTIST", "Miles Davis"),
                ("ALBUM", "Kind of Blue"),
            ]),
        ),
    ]);
    let path = write_fixture(&temp, "01.flac", &bytes);

    let track = LoftyMetadataExtractor::new().extract(&path).await.unwrap();

    assert_eq!(track.path, path);
    assert_eq!(track.title, "Blue in Green");
    assert_eq!(track.artist, "Miles Davis");
    assert_eq!(track.album, "Kind of Blue");
    assert_seconds(track.duration, 3.0);
    assert!(track.cover.is_none());
    assert!(!track.id.is_empty());
}

#[tokio::test]
async fn untagged_file_falls_back_to_stem_and_unknowns() {
    let temp = TempDir::new().unwrap();
    let bytes = flac_bytes(&[(BLOCK_STREAMINFO, stream_info(48_000, 48_000 * 2))]);
    let path = write_fixture(&temp, "Side A.flac", &bytes);

    let track = LoftyMetadataExtractor::new().extract(&path).await.unwrap();

    assert_eq!(track.title, "Side A");
    assert_eq!(track.artist, "Unknown Artist");
    assert_eq!(track.album, "Unknown Album");
    assert_seconds(track.duration, 2.0);
}

#[test]
fn blank_tag_values_use_fallbacks() {
    let temp = TempDir::new().unwrap();
    let bytes = flac_bytes(&[
        (BLOCK_STREAMINFO, stream_info(44_100, 44_100)),
        (
            BLOCK_VORBIS_COMMENT,
            vorbis_comment(&[("TITLE", "  "), ("ARTIST", "Someone")]),
        ),
    ]);
    let path = write_fixture(&temp, "demo take.flac", &bytes);

    let track = LoftyMetadataExtractor::read_track(&path).unwrap();

    assert_eq!(track.title, "demo take");
    assert_eq!(track.artist, "Someone");
    assert_eq!(track.album, "Unknown Album");
}

#[test]
fn front_cover_is_referenced_by_path() {
    let temp = TempDir::new().unwrap();
    let bytes = flac_bytes(&[
        (BLOCK_STREAMINFO, stream_info(44_100, 44_100)),
        (BLOCK_VORBIS_COMMENT, vorbis_comment(&[("TITLE", "Cover")])),
        (BLOCK_PICTURE, picture(3)),
    ]);
    let path = write_fixture(&temp, "cover.flac", &bytes);

    let track = LoftyMetadataExtractor::read_track(&path).unwrap();

    assert_eq!(track.cover, Some(format!("{}#cover", path.display())));
}

#[test]
fn non_flac_stream_is_rejected() {
    let temp = TempDir::new().unwrap();
    let path = write_fixture(&temp, "tone.wav", &wav_bytes());

    let result = LoftyMetadataExtractor::read_track(&path);

    assert!(
        matches!(result, Err(MetadataError::UnsupportedFormat(_))),
        "got {result:?}"
    );
}

// ===== Failures =====

#[tokio::test]
async fn garbage_file_is_reported_not_thrown() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("broken.flac");
    fs::write(&path, b"definitely not audio").unwrap();

    let extractor = LoftyMetadataExtractor::new();
    let err = extractor.extract(&path).await.unwrap_err();

    assert_eq!(err.path, path);
    assert!(!err.reason.is_empty());
}

#[tokio::test]
async fn truncated_flac_header_is_reported() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("truncated.flac");
    // fLaC magic followed by a STREAMINFO header that promises more bytes than exist
    let mut bytes = b"fLaC\x80\x00\x00\x22".to_vec();
    bytes.extend_from_slice(&[0u8; 8]);
    fs::write(&path, bytes).unwrap();

    let extractor = LoftyMetadataExtractor::new();
    let result = extractor.extract(&path).await;

    assert!(result.is_err());
}

#[tokio::test]
async fn many_failures_do_not_poison_the_extractor() {
    let temp = TempDir::new().unwrap();
    let extractor = LoftyMetadataExtractor::new();

    for i in 0..5 {
        let path = temp.path().join(format!("bad_{i}.flac"));
        fs::write(&path, vec![i as u8; 64]).unwrap();
        assert!(extractor.extract(&path).await.is_err());
    }
}
