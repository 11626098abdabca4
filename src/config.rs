use std::path::PathBuf;

use config::{Config, Environment, File};
use serde::Deserialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Unable to read the configuration: {0}")]
    UnableToReadConfig(#[from] config::ConfigError),
}

/// Configuration of a game session.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Maximum number of moves that can be undone. Unbounded when absent.
    pub history_limit: Option<usize>,

    /// Log filter used when `RUST_LOG` is not set.
    pub log_filter: String,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self { history_limit: None, log_filter: String::from("info") }
    }
}

/// Loads the configuration from an optional file, overridden by `NEON_CHESS_*` environment variables.
pub fn load(path: Option<PathBuf>) -> Result<GameConfig, ConfigError> {
    let mut builder = Config::builder();
    if let Some(path) = path {
        builder = builder.add_source(File::from(path));
    }
    let settings = builder.add_source(Environment::with_prefix("NEON_CHESS").try_parsing(true)).build()?;
    Ok(settings.try_deserialize()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = load(None).unwrap();
        assert_eq!(config.history_limit, None);
        assert_eq!(config.log_filter, "info");
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!("neon_chess_config_{}.toml", std::process::id()));
        std::fs::write(&path, "history_limit = 32\nlog_filter = \"debug\"\n").unwrap();

        let config = load(Some(path.clone())).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(config.history_limit, Some(32));
        assert_eq!(config.log_filter, "debug");
    }

    #[test]
    fn test_missing_file() {
        let path = std::env::temp_dir().join("neon_chess_config_that_does_not_exist.toml");
        assert!(matches!(load(Some(path)), Err(ConfigError::UnableToReadConfig(_))));
    }
}
