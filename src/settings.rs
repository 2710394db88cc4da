//! Board defaults shared by every level
//!
//! Layout, countdown and safe button tuning. Unlike `GameboardData` these do
//! not change per level; they are loaded once from a settings file.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::BoardError;

/// Per-game board settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct BoardSettings {
    /// Distance between neighbouring buttons (world units)
    pub button_spacing: f32,
    /// Height of the button faces above the board origin
    pub button_height: f32,
    /// Seconds the player has to press the safe button after cycling stops
    pub countdown_seconds: u32,
    /// How many previous safe buttons are avoided when choosing the next one
    pub safe_button_cycle_bias: u32,
    /// Maximum draws when choosing a safe button
    pub safe_button_choice_iterations: u32,
    /// Seconds the safe button is shown before cycling starts (before time scale)
    pub reveal_seconds: f32,
}

impl Default for BoardSettings {
    fn default() -> Self {
        Self {
            button_spacing: 120.0,
            button_height: 20.0,
            countdown_seconds: 5,
            safe_button_cycle_bias: 2,
            safe_button_choice_iterations: 8,
            reveal_seconds: 1.5,
        }
    }
}

impl BoardSettings {
    pub fn validate(&self) -> Result<(), BoardError> {
        if !self.button_spacing.is_finite() || self.button_spacing <= 0.0 {
            return Err(BoardError::InvalidConfig {
                field: "ButtonSpacing",
                reason: "must be a positive finite number",
            });
        }
        if !self.button_height.is_finite() {
            return Err(BoardError::InvalidConfig {
                field: "ButtonHeight",
                reason: "must be finite",
            });
        }
        if self.countdown_seconds == 0 {
            return Err(BoardError::InvalidConfig {
                field: "CountdownSeconds",
                reason: "must be positive",
            });
        }
        if self.safe_button_choice_iterations == 0 {
            return Err(BoardError::InvalidConfig {
                field: "SafeButtonChoiceIterations",
                reason: "must be positive",
            });
        }
        if !self.reveal_seconds.is_finite() || self.reveal_seconds < 0.0 {
            return Err(BoardError::InvalidConfig {
                field: "RevealSeconds",
                reason: "must be zero or a positive finite number",
            });
        }
        Ok(())
    }

    pub fn from_json(json: &str) -> Result<Self, BoardError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from disk. A missing file falls back to defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, BoardError> {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(json) => {
                let settings = Self::from_json(&json)?;
                log::info!("Loaded board settings from {}", path.display());
                Ok(settings)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::warn!("No settings at {}, using defaults", path.display());
                Ok(Self::default())
            }
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let settings = BoardSettings::from_json(r#"{"CountdownSeconds": 9}"#).unwrap();
        assert_eq!(settings.countdown_seconds, 9);
        assert_eq!(settings.button_spacing, BoardSettings::default().button_spacing);
    }

    #[test]
    fn test_rejects_zero_countdown_and_iterations() {
        let result = BoardSettings::from_json(r#"{"CountdownSeconds": 0}"#);
        assert!(matches!(
            result,
            Err(BoardError::InvalidConfig { field: "CountdownSeconds", .. })
        ));
        let result = BoardSettings::from_json(r#"{"SafeButtonChoiceIterations": 0}"#);
        assert!(matches!(
            result,
            Err(BoardError::InvalidConfig { field: "SafeButtonChoiceIterations", .. })
        ));
    }

    #[test]
    fn test_zero_reveal_is_allowed() {
        let settings = BoardSettings {
            reveal_seconds: 0.0,
            ..Default::default()
        };
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let settings = BoardSettings::load("/nonexistent/tick-tick-boom/settings.json").unwrap();
        assert_eq!(settings, BoardSettings::default());
    }
}
