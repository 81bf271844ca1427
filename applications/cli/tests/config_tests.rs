//! Configuration loading and validation

use flac_player::config::PlayerConfig;
use flac_player::PlayerError;
use std::fs;
use std::path::Path;
use std::time::Duration;
use tempfile::TempDir;

fn write_config(dir: &TempDir, content: &str) -> std::path::PathBuf {
    let path = dir.path().join("player.toml");
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn defaults_are_valid() {
    let config = PlayerConfig::default();
    config.validate().unwrap();

    let playback = config.playback_config();
    assert_eq!(playback.volume, 0.8);
    assert_eq!(playback.progress_interval, Duration::from_secs(1));
    assert!(config.library.cache_dir.is_none());
}

#[test]
fn file_values_override_defaults() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        r#"
[library]
cache_dir = "/tmp/flac-player-cache"

[playback]
volume = 0.5
progress_interval_ms = 250
"#,
    );

    let config = PlayerConfig::load(Some(path.as_path())).unwrap();
    config.validate().unwrap();

    assert_eq!(config.playback.volume, 0.5);
    assert_eq!(
        config.playback_config().progress_interval,
        Duration::from_millis(250)
    );
    let store = config.cache_store().unwrap();
    assert_eq!(
        store.file_path(),
        Path::new("/tmp/flac-player-cache/library.json")
    );
}

#[test]
fn partial_sections_keep_defaults() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "[playback]\nvolume = 0.3\n");

    let config = PlayerConfig::load(Some(path.as_path())).unwrap();

    assert_eq!(config.playback.volume, 0.3);
    assert_eq!(config.playback.progress_interval_ms, 1_000);
}

#[test]
fn missing_explicit_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    let result = PlayerConfig::load(Some(dir.path().join("absent.toml").as_path()));
    assert!(matches!(result, Err(PlayerError::Config(_))));
}

#[test]
fn out_of_range_values_fail_validation() {
    let mut config = PlayerConfig::default();
    config.playback.volume = 1.5;
    assert!(matches!(config.validate(), Err(PlayerError::Config(_))));

    config.playback.volume = f32::NAN;
    assert!(config.validate().is_err());

    let mut config = PlayerConfig::default();
    config.playback.progress_interval_ms = 0;
    assert!(config.validate().is_err());
}
