//! Driver configuration, read from an optional JSON file.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};
use wordplay_sim::SessionConfig;

/// Frames per second when the config does not say otherwise.
pub const DEFAULT_FRAME_RATE: u32 = 60;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub session: SessionConfig,
    /// Loop rate in frames per second. Clamped to 1..=240.
    pub frame_rate: u32,
    /// Word to load before the first frame.
    pub initial_word: Option<String>,
    pub initial_meaning: Option<String>,
    /// Start the first game as soon as the word is set.
    pub autostart: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            session: SessionConfig::default(),
            frame_rate: DEFAULT_FRAME_RATE,
            initial_word: None,
            initial_meaning: None,
            autostart: false,
        }
    }
}

impl AppConfig {
    pub fn from_json(json: &str) -> Result<Self, AppError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self, AppError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Load `path` if given. Unreadable or malformed files fall back to
    /// defaults with a warning.
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return Self::default();
        };
        match Self::load(path) {
            Ok(config) => {
                log::info!("loaded config from {}", path.display());
                config
            }
            Err(err) => {
                log::warn!("using default config, {}: {}", path.display(), err);
                Self::default()
            }
        }
    }

    pub fn effective_frame_rate(&self) -> u32 {
        self.frame_rate.clamp(1, 240)
    }
}

#[derive(Debug)]
pub enum AppError {
    Io(std::io::Error),
    Config(serde_json::Error),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Io(e) => write!(f, "I/O error: {}", e),
            AppError::Config(e) => write!(f, "invalid config: {}", e),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Io(e) => Some(e),
            AppError::Config(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(e: std::io::Error) -> Self {
        AppError::Io(e)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(e: serde_json::Error) -> Self {
        AppError::Config(e)
    }
}
