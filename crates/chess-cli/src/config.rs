//! Configuration file loading.
//!
//! Settings come from `chess.toml` in the current directory (or a path given
//! on the command line). Every field has a default, so a missing file or an
//! empty one is a valid configuration.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur when loading configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("Failed to read config file: {0}")]
    Read(#[from] std::io::Error),
    /// Failed to parse the configuration file as valid TOML.
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Search settings.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct SearchConfig {
    /// Search depth in plies. Defaults to 3.
    #[serde(default = "default_depth")]
    pub depth: u32,
}

fn default_depth() -> u32 {
    3
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            depth: default_depth(),
        }
    }
}

/// Logging settings.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    /// Maximum log level (`error`, `warn`, `info`, `debug` or `trace`).
    /// Defaults to "info".
    #[serde(default = "default_level")]
    pub level: String,
}

fn default_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: default_level(),
        }
    }
}

/// Self-play settings.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct SelfPlayConfig {
    /// Plies after which a self-play game is abandoned. Defaults to 200.
    #[serde(default = "default_max_plies")]
    pub max_plies: u32,
}

fn default_max_plies() -> u32 {
    200
}

impl Default for SelfPlayConfig {
    fn default() -> Self {
        SelfPlayConfig {
            max_plies: default_max_plies(),
        }
    }
}

/// Top-level configuration.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq, Eq)]
pub struct ChessConfig {
    /// Start position used when no FEN is given on the command line.
    #[serde(default)]
    pub fen: Option<String>,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub selfplay: SelfPlayConfig,
}

impl ChessConfig {
    /// Loads the configuration from the default path.
    ///
    /// Returns the defaults if the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Read`] if the file exists but cannot be read,
    /// or [`ConfigError::Parse`] if it contains invalid TOML.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path())
    }

    /// Loads the configuration from `path`, falling back to the defaults
    /// when the file does not exist.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            Ok(toml::from_str(&content)?)
        } else {
            Ok(Self::default())
        }
    }

    /// Returns the default configuration path: `chess.toml` in the working
    /// directory.
    pub fn config_path() -> PathBuf {
        PathBuf::from("chess.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_full_config() {
        let toml_content = r#"
fen = "4k3/8/8/8/8/8/8/4K3 w - - 0 1"

[search]
depth = 5

[logging]
level = "debug"

[selfplay]
max_plies = 40
"#;

        let config: ChessConfig = toml::from_str(toml_content).unwrap();

        assert_eq!(config.fen.as_deref(), Some("4k3/8/8/8/8/8/8/4K3 w - - 0 1"));
        assert_eq!(config.search.depth, 5);
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.selfplay.max_plies, 40);
    }

    #[test]
    fn missing_fields_use_defaults() {
        let toml_content = r#"
[search]

[selfplay]
max_plies = 10
"#;

        let config: ChessConfig = toml::from_str(toml_content).unwrap();

        assert_eq!(config.fen, None);
        assert_eq!(config.search.depth, 3);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.selfplay.max_plies, 10);
    }

    #[test]
    fn empty_config_is_default() {
        let config: ChessConfig = toml::from_str("").unwrap();
        assert_eq!(config, ChessConfig::default());
    }

    #[test]
    fn invalid_toml_is_a_parse_error() {
        let result: Result<ChessConfig, _> = toml::from_str("[search]\ndepth = \"deep\"");
        assert!(result.is_err());
    }

    #[test]
    fn load_from_missing_file_returns_defaults() {
        let path = std::env::temp_dir().join("chess-cli-config-that-does-not-exist.toml");
        let config = ChessConfig::load_from(&path).unwrap();
        assert_eq!(config, ChessConfig::default());
    }

    #[test]
    fn load_from_reports_parse_errors() {
        let path = std::env::temp_dir().join(format!(
            "chess-cli-invalid-config-{}.toml",
            std::process::id()
        ));
        std::fs::write(&path, "[search\n").unwrap();

        let result = ChessConfig::load_from(&path);
        std::fs::remove_file(&path).ok();

        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn config_path_returns_expected_path() {
        assert_eq!(ChessConfig::config_path(), PathBuf::from("chess.toml"));
    }
}
