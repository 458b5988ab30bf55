//! Application configuration: TOML file with environment overrides.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::path::Path;
use strictly_mastermind::{ConfigError, GameConfig};
use tracing::{debug, info, instrument};

/// Complete application configuration.
#[derive(Debug, Clone, Default, PartialEq, Getters, Serialize, Deserialize)]
pub struct AppConfig {
    /// Parameters for new games.
    #[serde(default)]
    game: GameConfig,

    /// HTTP listener settings.
    #[serde(default)]
    server: ServerConfig,
}

/// HTTP listener settings.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    host: String,

    /// Port to bind to.
    #[serde(default = "default_port")]
    port: u16,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        info!(
            code_length = config.game.code_length(),
            max_turns = config.game.max_turns(),
            "Config loaded successfully"
        );
        Ok(config)
    }

    /// Loads the file if it exists (defaults otherwise), then applies
    /// `MASTERMIND_*` environment overrides.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let config = if path.as_ref().exists() {
            Self::from_file(path)?
        } else {
            info!("Config file not found, using defaults");
            Self::default()
        };
        config.with_env_overrides(|key| std::env::var(key).ok())
    }

    /// Applies overrides from `lookup`, keyed by environment variable name.
    ///
    /// Recognized keys: `MASTERMIND_CODE_LENGTH`, `MASTERMIND_MAX_TURNS`,
    /// `MASTERMIND_HOST`, `MASTERMIND_PORT`.
    #[instrument(skip(self, lookup))]
    pub fn with_env_overrides(
        self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let code_length = parse_var::<usize>(&lookup, "MASTERMIND_CODE_LENGTH")?;
        let max_turns = parse_var::<u32>(&lookup, "MASTERMIND_MAX_TURNS")?;
        let port = parse_var::<u16>(&lookup, "MASTERMIND_PORT")?;
        let host = lookup("MASTERMIND_HOST");

        Ok(Self {
            game: self.game.with_overrides(code_length, max_turns)?,
            server: ServerConfig {
                host: host.unwrap_or(self.server.host),
                port: port.unwrap_or(self.server.port),
            },
        })
    }

    /// Replaces any provided listener settings.
    pub fn with_server(self, host: Option<String>, port: Option<u16>) -> Self {
        Self {
            server: ServerConfig {
                host: host.unwrap_or(self.server.host),
                port: port.unwrap_or(self.server.port),
            },
            ..self
        }
    }
}

fn parse_var<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
) -> Result<Option<T>, ConfigError>
where
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|e| ConfigError::new(format!("Invalid {}={:?}: {}", key, raw, e))),
    }
}
