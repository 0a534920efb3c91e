use std::path::Path;

use tracing::warn;

use crate::error::ConfigError;
use crate::game::{Player, DEFAULT_COLS, DEFAULT_ROWS};

/// Board dimensions. Every encoding handed to the engine must match them.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    pub rows: usize,
    pub columns: usize,
}

impl Default for BoardConfig {
    fn default() -> Self {
        BoardConfig {
            rows: DEFAULT_ROWS,
            columns: DEFAULT_COLS,
        }
    }
}

/// Which side the engine plays.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct BotConfig {
    /// 1 moves first, 2 moves second.
    pub player_id: u8,
}

impl Default for BotConfig {
    fn default() -> Self {
        BotConfig { player_id: 1 }
    }
}

/// Top-level engine configuration, loadable from TOML.
#[derive(Debug, Clone, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub board: BoardConfig,
    pub bot: BotConfig,
}

impl EngineConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: EngineConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            warn!(path = %path.display(), "config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.board.rows == 0 {
            return Err(ConfigError::Validation("board.rows must be >= 1".into()));
        }
        if self.board.columns == 0 {
            return Err(ConfigError::Validation(
                "board.columns must be >= 1".into(),
            ));
        }
        self.player()?;
        Ok(())
    }

    /// The side named by `bot.player_id`.
    pub fn player(&self) -> Result<Player, ConfigError> {
        Player::from_id(self.bot.player_id).ok_or_else(|| {
            ConfigError::Validation(format!(
                "bot.player_id must be 1 or 2, got {}",
                self.bot.player_id
            ))
        })
    }

    /// Generate a TOML string with all default values (useful for creating
    /// example config files).
    pub fn default_toml() -> String {
        toml::to_string_pretty(&EngineConfig::default()).unwrap_or_default()
    }
}
