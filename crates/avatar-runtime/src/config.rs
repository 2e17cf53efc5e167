//! Runtime configuration
//!
//! Loaded from a JSON file whose path is given by `AVATAR_CONFIG`; every
//! field is optional and falls back to its default.

use std::path::{Path, PathBuf};
use std::time::Duration;

use avatar_visual::AnimationConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

/// Environment variable naming the config file
pub const CONFIG_ENV: &str = "AVATAR_CONFIG";

/// Configuration loading errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Generation ramp and capture settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    /// Progress increment per ramp step (percent)
    pub progress_step: u8,
    /// Delay between ramp steps
    pub step_delay_ms: u64,
    /// Length of an export
    pub capture_duration_ms: u64,
    /// Frames per second requested from the capture sink
    pub capture_fps: u32,
    /// Bits per second requested from the capture sink
    pub capture_bitrate: u64,
    /// Container/codec of the exported artifact
    pub capture_media_type: String,
    /// Artifact file name prefix; the unix-ms timestamp and extension follow
    pub file_prefix: String,
    pub file_extension: String,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        PlaybackConfig {
            progress_step: 5,
            step_delay_ms: 100,
            capture_duration_ms: 10_000,
            capture_fps: 30,
            capture_bitrate: 8_000_000,
            capture_media_type: "video/webm;codecs=vp9".to_string(),
            file_prefix: "avatar-animation".to_string(),
            file_extension: "webm".to_string(),
        }
    }
}

impl PlaybackConfig {
    pub fn step_delay(&self) -> Duration {
        Duration::from_millis(self.step_delay_ms)
    }

    pub fn capture_duration(&self) -> Duration {
        Duration::from_millis(self.capture_duration_ms)
    }

    /// Progress step, never zero so the ramp always terminates
    pub fn effective_step(&self) -> u8 {
        self.progress_step.clamp(1, 100)
    }

    /// Artifact name for an export started at `unix_ms`
    pub fn file_name(&self, unix_ms: u128) -> String {
        format!("{}-{}.{}", self.file_prefix, unix_ms, self.file_extension)
    }
}

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    pub animation: AnimationConfig,
    pub playback: PlaybackConfig,
    /// Driver tick interval
    pub frame_interval_ms: u64,
    /// Clamp for a single measured frame delta
    pub max_frame_delta_ms: u64,
    /// Default `EnvFilter` directive when `RUST_LOG` is unset
    pub log_filter: String,
    /// Emit JSON log lines instead of human-readable ones
    pub json_logs: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        RuntimeConfig {
            animation: AnimationConfig::default(),
            playback: PlaybackConfig::default(),
            frame_interval_ms: 16,
            max_frame_delta_ms: 100,
            log_filter: "info".to_string(),
            json_logs: false,
        }
    }
}

impl RuntimeConfig {
    /// Read a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        info!(path = %path.display(), "Loaded config");
        Ok(config)
    }

    /// Load from `AVATAR_CONFIG` when set, defaults otherwise
    pub fn from_env() -> Result<Self, ConfigError> {
        match std::env::var_os(CONFIG_ENV) {
            Some(path) if !path.is_empty() => Self::load(PathBuf::from(path)),
            _ => Ok(Self::default()),
        }
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms.max(1))
    }

    pub fn max_frame_delta(&self) -> Duration {
        Duration::from_millis(self.max_frame_delta_ms)
    }
}
