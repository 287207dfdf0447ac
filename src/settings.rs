//! Runner settings
//!
//! Loaded from an optional JSON file; every field has a default so a partial
//! file (or none at all) is valid.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Frame pacing of the driver loop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Pacing {
    /// One frame per 1/50 s
    #[default]
    Realtime,
    /// As fast as possible (headless runs, tests)
    Unpaced,
}

impl Pacing {
    pub fn as_str(&self) -> &'static str {
        match self {
            Pacing::Realtime => "realtime",
            Pacing::Unpaced => "unpaced",
        }
    }
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings from {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid settings in {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("frame limit must be > 0")]
    ZeroFrameLimit,
}

/// Driver configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// RNG seed for the run
    pub seed: u64,
    /// Stop after this many frames even if the avatar survives
    pub max_frames: Option<u64>,
    pub pacing: Pacing,
    /// Let the demo autopilot play
    pub autopilot: bool,
    /// Write each frame's draw list as one JSON line to this file
    pub trace_path: Option<PathBuf>,
    /// Log a status line every N frames (0 disables)
    pub summary_interval: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: 0,
            max_frames: None,
            pacing: Pacing::Realtime,
            autopilot: true,
            trace_path: None,
            summary_interval: 250,
        }
    }
}

impl Settings {
    /// Load settings from a JSON file
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let json = fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_json(&json).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        settings.validate()?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.max_frames == Some(0) {
            return Err(SettingsError::ZeroFrameLimit);
        }
        Ok(())
    }

    /// Frame limit reached after `frames` frames
    pub fn frame_limit_reached(&self, frames: u64) -> bool {
        self.max_frames.is_some_and(|max| frames >= max)
    }
}
