//! Game tuning
//!
//! Every gameplay constant a designer may want to tweak, loadable from JSON.
//! Values are not validated; odd inputs give odd games.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::SettingsError;

/// Tunable gameplay parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Bird ===
    /// Downward acceleration (pixels/s²)
    pub gravity: f32,
    /// Vertical speed set by a tap (pixels/s)
    pub tap_impulse: f32,

    // === Scrolling ===
    /// Ground and pipe scroll speed (pixels/s)
    pub scroll_speed: f32,

    // === Pipes ===
    /// Number of pipe slots allocated up front
    pub pipe_capacity: usize,
    /// Vertical opening between the two halves
    pub pipe_gap: f32,
    /// Lowest bottom-pipe height
    pub pipe_min_height: f32,
    /// Highest bottom-pipe height
    pub pipe_max_height: f32,
    /// Seconds between spawns
    pub pipe_rate: f32,
    /// Grace period after scrolling starts, before the first spawn
    pub pipe_delay: f32,

    // === Run ===
    /// Fixed seed for reproducible runs (random when absent)
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            tap_impulse: TAP_IMPULSE,

            scroll_speed: SCROLL_VELOCITY,

            pipe_capacity: PIPE_CAPACITY,
            pipe_gap: PIPE_GAP,
            pipe_min_height: PIPE_MIN_HEIGHT,
            pipe_max_height: PIPE_MAX_HEIGHT,
            pipe_rate: PIPE_RATE,
            pipe_delay: PIPE_DELAY,

            seed: None,
        }
    }
}

impl Settings {
    /// Parse settings from a JSON document; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read settings from a JSON file
    pub fn read(path: &Path) -> Result<Self, SettingsError> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Load settings from disk, falling back to defaults on any failure
    pub fn load(path: &Path) -> Self {
        match Self::read(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Using default settings ({}): {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Write settings as pretty JSON
    pub fn save(&self, path: &Path) -> Result<(), SettingsError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }
}
