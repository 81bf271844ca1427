/// Player configuration
use crate::error::{PlayerError, Result};
use flac_playback::PlaybackConfig;
use flac_storage::CacheStore;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

const DEFAULT_CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct PlayerConfig {
    #[serde(default)]
    pub library: LibrarySettings,

    #[serde(default)]
    pub playback: PlaybackSettings,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct LibrarySettings {
    /// Directory holding `library.json`; the platform data dir when unset
    #[serde(default)]
    pub cache_dir: Option<PathBuf>,

    /// Directory scanned by `play` when no `--dir` is given
    #[serde(default)]
    pub music_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PlaybackSettings {
    #[serde(default = "default_volume")]
    pub volume: f32,

    #[serde(default = "default_progress_interval_ms")]
    pub progress_interval_ms: u64,
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        Self {
            volume: default_volume(),
            progress_interval_ms: default_progress_interval_ms(),
        }
    }
}

impl PlayerConfig {
    /// Load configuration from file and environment
    ///
    /// An explicit `path` must exist; otherwise `./config.toml` is read if
    /// present. `FLAC_PLAYER_<SECTION>__<KEY>` variables override both.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                settings = settings.add_source(config::File::from(path.to_path_buf()));
            }
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    settings = settings.add_source(config::File::from(default_path));
                }
            }
        }

        settings = settings.add_source(
            config::Environment::with_prefix("FLAC_PLAYER")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = settings
            .build()
            .map_err(|e| PlayerError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| PlayerError::Config(e.to_string()))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        let volume = self.playback.volume;
        if !volume.is_finite() || !(0.0..=1.0).contains(&volume) {
            return Err(PlayerError::Config(format!(
                "playback.volume must be between 0.0 and 1.0, got {volume}"
            )));
        }

        if self.playback.progress_interval_ms == 0 {
            return Err(PlayerError::Config(
                "playback.progress_interval_ms must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }

    /// Session settings derived from the `playback` section
    pub fn playback_config(&self) -> PlaybackConfig {
        PlaybackConfig {
            volume: self.playback.volume,
            progress_interval: Duration::from_millis(self.playback.progress_interval_ms),
        }
    }

    /// Cache store at the configured or default location
    pub fn cache_store(&self) -> Result<CacheStore> {
        match &self.library.cache_dir {
            Some(dir) => Ok(CacheStore::new(dir)),
            None => Ok(CacheStore::default_location()?),
        }
    }
}

// Default values
fn default_volume() -> f32 {
    flac_playback::types::DEFAULT_VOLUME
}

fn default_progress_interval_ms() -> u64 {
    1_000
}
