//! Game configuration: code length and turn budget.

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

/// Digits in a code unless configured otherwise.
pub const DEFAULT_CODE_LENGTH: usize = 4;

/// Longest code a game accepts.
pub const MAX_CODE_LENGTH: usize = 32;

/// Guesses allowed per game unless configured otherwise.
pub const DEFAULT_MAX_TURNS: u32 = 20;

/// Validated parameters of one game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters, Serialize, Deserialize)]
#[serde(try_from = "GameConfigFile")]
pub struct GameConfig {
    /// Number of digits in the secret and in every guess.
    code_length: usize,
    /// Maximum number of accepted guesses.
    max_turns: u32,
}

impl GameConfig {
    /// Creates a configuration, rejecting zero budgets and code lengths
    /// outside `1..=MAX_CODE_LENGTH`.
    #[instrument]
    pub fn new(code_length: usize, max_turns: u32) -> Result<Self, ConfigError> {
        if code_length == 0 {
            warn!("Rejected zero code length");
            return Err(ConfigError::new("code_length must be at least 1"));
        }
        if code_length > MAX_CODE_LENGTH {
            warn!(code_length, "Rejected oversized code length");
            return Err(ConfigError::new(format!(
                "code_length must be at most {}, got {}",
                MAX_CODE_LENGTH, code_length
            )));
        }
        if max_turns == 0 {
            warn!("Rejected zero turn budget");
            return Err(ConfigError::new("max_turns must be at least 1"));
        }
        debug!("Game config accepted");
        Ok(Self {
            code_length,
            max_turns,
        })
    }

    /// Returns a copy with any provided field replaced, re-validated.
    #[instrument(skip(self))]
    pub fn with_overrides(
        self,
        code_length: Option<usize>,
        max_turns: Option<u32>,
    ) -> Result<Self, ConfigError> {
        Self::new(
            code_length.unwrap_or(self.code_length),
            max_turns.unwrap_or(self.max_turns),
        )
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            code_length: DEFAULT_CODE_LENGTH,
            max_turns: DEFAULT_MAX_TURNS,
        }
    }
}

/// Unvalidated on-disk form; missing fields take defaults.
#[derive(Debug, Deserialize)]
struct GameConfigFile {
    #[serde(default = "default_code_length")]
    code_length: usize,
    #[serde(default = "default_max_turns")]
    max_turns: u32,
}

fn default_code_length() -> usize {
    DEFAULT_CODE_LENGTH
}

fn default_max_turns() -> u32 {
    DEFAULT_MAX_TURNS
}

impl TryFrom<GameConfigFile> for GameConfig {
    type Error = ConfigError;

    #[track_caller]
    fn try_from(file: GameConfigFile) -> Result<Self, Self::Error> {
        GameConfig::new(file.code_length, file.max_turns)
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_reference_game() {
        let config = GameConfig::default();
        assert_eq!(*config.code_length(), 4);
        assert_eq!(*config.max_turns(), 20);
    }

    #[test]
    fn test_zero_values_rejected() {
        assert!(GameConfig::new(0, 10).is_err());
        assert!(GameConfig::new(4, 0).is_err());
        assert!(GameConfig::new(1, 1).is_ok());
    }

    #[test]
    fn test_code_length_upper_bound() {
        assert!(GameConfig::new(MAX_CODE_LENGTH, 10).is_ok());
        let err = GameConfig::new(MAX_CODE_LENGTH + 1, 10).unwrap_err();
        assert!(err.message.contains("at most"));
        assert!(GameConfig::default()
            .with_overrides(Some(usize::MAX), None)
            .is_err());
    }

    #[test]
    fn test_overrides_keep_unset_fields() {
        let config = GameConfig::default()
            .with_overrides(None, Some(8))
            .unwrap();
        assert_eq!(*config.code_length(), 4);
        assert_eq!(*config.max_turns(), 8);
    }

    #[test]
    fn test_deserialize_fills_defaults_and_validates() {
        let config: GameConfig = serde_json::from_str(r#"{"max_turns": 5}"#).unwrap();
        assert_eq!(config, GameConfig::new(4, 5).unwrap());

        let err = serde_json::from_str::<GameConfig>(r#"{"code_length": 0}"#);
        assert!(err.is_err());
    }
}
