//! Game settings
//!
//! Loaded from an optional JSON file; any field left out keeps its default.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::consts::{GRID_HEIGHT, GRID_WIDTH, MIN_GRID_SIDE, SIM_DT};
use crate::error::SettingsError;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Grid ===
    /// Grid width in cells
    pub grid_width: i32,
    /// Grid height in cells
    pub grid_height: i32,

    // === Timing ===
    /// Seconds per gameplay step
    pub tick_seconds: f64,

    // === Audio ===
    /// Start with music playing
    pub music_enabled: bool,
    /// Directory holding eat.wav, gameover.wav and music.wav
    pub asset_dir: PathBuf,

    // === Determinism ===
    /// Fixed run seed; `None` seeds from the clock
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            grid_width: GRID_WIDTH,
            grid_height: GRID_HEIGHT,

            tick_seconds: SIM_DT,

            music_enabled: true,
            asset_dir: PathBuf::from("Audio"),

            seed: None,
        }
    }
}

impl Settings {
    /// Check the values the simulation relies on.
    ///
    /// A grid with both sides at least [`MIN_GRID_SIDE`] starts safely, but
    /// nothing bounds a run that grows the snake over every cell: the food
    /// respawn after that last eat never terminates.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.grid_width < MIN_GRID_SIDE || self.grid_height < MIN_GRID_SIDE {
            return Err(SettingsError::Invalid(format!(
                "grid sides must be at least {MIN_GRID_SIDE}, got {}x{}",
                self.grid_width, self.grid_height
            )));
        }
        if !(self.tick_seconds.is_finite() && self.tick_seconds > 0.0) {
            return Err(SettingsError::Invalid(format!(
                "tick_seconds must be positive, got {}",
                self.tick_seconds
            )));
        }
        Ok(())
    }

    /// Parse and validate settings JSON
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Load settings from `path` if given, falling back to defaults on any error
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            log::info!("Using default settings");
            return Self::default();
        };

        match Self::load(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Ignoring settings at {}: {e}", path.display());
                Self::default()
            }
        }
    }
}
