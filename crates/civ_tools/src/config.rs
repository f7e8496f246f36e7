//! Game configuration files.
//!
//! Configs are [`GameConfig`] values written in RON. Missing fields take
//! their defaults, so a file only needs the values it changes:
//!
//! ```ron
//! (map_width: 30, map_height: 20, seed: 7)
//! ```

use std::path::Path;

use civ_core::config::GameConfig;
use civ_core::error::GameError;
use thiserror::Error;

/// Error type for config loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// File not found.
    #[error("Config file not found: {0}")]
    FileNotFound(String),
    /// Failed to read file.
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    /// Failed to parse RON.
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] ron::error::SpannedError),
    /// Parsed but unusable.
    #[error("Invalid config: {0}")]
    Invalid(#[from] GameError),
}

/// Load and validate a config from a RON file.
///
/// # Errors
///
/// Returns an error if the file is missing, unreadable, malformed, or
/// describes a game that cannot be built.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<GameConfig, ConfigError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.display().to_string()));
    }
    let contents = std::fs::read_to_string(path)?;
    let config = config_from_ron_str(&contents)?;
    tracing::debug!(path = %path.display(), seed = config.seed, "Config loaded");
    Ok(config)
}

/// Parse and validate a config from a RON string.
///
/// # Errors
///
/// Returns an error if the text is malformed or the config is invalid.
pub fn config_from_ron_str(ron: &str) -> Result<GameConfig, ConfigError> {
    let config: GameConfig = ron::from_str(ron)?;
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_uses_defaults() {
        let config = config_from_ron_str("(map_width: 30, map_height: 20, seed: 7)").unwrap();
        assert_eq!((config.map_width, config.map_height), (30, 20));
        assert_eq!(config.seed, 7);
        assert_eq!(config.starting_civilizations, GameConfig::default().starting_civilizations);
    }

    #[test]
    fn test_empty_config_is_default() {
        assert_eq!(config_from_ron_str("()").unwrap(), GameConfig::default());
    }

    #[test]
    fn test_malformed_config() {
        assert!(matches!(
            config_from_ron_str("(map_width: \"wide\")"),
            Err(ConfigError::ParseError(_))
        ));
    }

    #[test]
    fn test_invalid_config() {
        assert!(matches!(
            config_from_ron_str("(map_width: 0)"),
            Err(ConfigError::Invalid(GameError::InvalidConfig(_)))
        ));
        assert!(matches!(
            config_from_ron_str("(starting_civilizations: 4294967295)"),
            Err(ConfigError::Invalid(GameError::InvalidConfig(_)))
        ));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            load_config("/nonexistent/civ-config.ron"),
            Err(ConfigError::FileNotFound(_))
        ));
    }

    #[test]
    fn test_bundled_config_loads() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/configs/default.ron");
        let config = load_config(path).unwrap();
        assert_eq!(config.seed, 42);
    }
}
