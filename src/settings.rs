//! Race settings
//!
//! Loaded from a JSON file; every field is optional and falls back to the
//! defaults of the stock 800x600 host with 25 px cells.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Failed to read settings file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid settings JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Session and start-grid preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Track width in grid cells
    pub track_width: i32,
    /// Track height in grid cells
    pub track_height: i32,
    /// Number of racers (clamped to 1..=MAX_PLAYERS when used)
    pub player_count: usize,
    /// Color id per player slot
    pub player_colors: Vec<i32>,
    /// Distance between neighbouring cars on the start grid
    pub start_spacing: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            track_width: DEFAULT_TRACK_WIDTH,
            track_height: DEFAULT_TRACK_HEIGHT,
            player_count: 2,
            player_colors: vec![0, 2, 1, 3],
            start_spacing: START_SPACING,
        }
    }
}

impl Settings {
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Player count limited to what the host supports
    pub fn players(&self) -> usize {
        self.player_count.clamp(1, MAX_PLAYERS)
    }

    /// Color id for a player slot; slots without an entry cycle the list
    pub fn color_for(&self, player: usize) -> i32 {
        if self.player_colors.is_empty() {
            return 0;
        }
        self.player_colors[player % self.player_colors.len()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_stock_host() {
        let settings = Settings::default();
        assert_eq!(settings.track_width, 32);
        assert_eq!(settings.track_height, 24);
        assert_eq!(settings.players(), 2);
        assert_eq!(settings.color_for(1), 2);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings = Settings::from_json(r#"{ "player_count": 3 }"#).unwrap();
        assert_eq!(settings.player_count, 3);
        assert_eq!(settings.track_width, DEFAULT_TRACK_WIDTH);
        assert_eq!(settings.player_colors, vec![0, 2, 1, 3]);
    }

    #[test]
    fn test_player_count_is_clamped() {
        let mut settings = Settings::default();
        settings.player_count = 0;
        assert_eq!(settings.players(), 1);
        settings.player_count = 9;
        assert_eq!(settings.players(), MAX_PLAYERS);
    }

    #[test]
    fn test_color_for_cycles_and_handles_empty() {
        let mut settings = Settings::default();
        settings.player_colors = vec![5, 6];
        assert_eq!(settings.color_for(2), 5);
        settings.player_colors.clear();
        assert_eq!(settings.color_for(0), 0);
    }

    #[test]
    fn test_bad_json_is_an_error() {
        assert!(matches!(
            Settings::from_json("{ not json"),
            Err(SettingsError::Json(_))
        ));
    }

    #[test]
    fn test_missing_file_is_an_error() {
        assert!(matches!(
            Settings::load("/nonexistent/racetrack/settings.json"),
            Err(SettingsError::Io(_))
        ));
    }
}
