//! Configuration types for the simulation.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Environment variable naming an optional JSON runner config file
pub const CONFIG_PATH_ENV: &str = "HEXLIFE_CONFIG";

/// Board configuration parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    /// Number of columns
    pub width: i32,
    /// Number of rows
    pub height: i32,
    /// Random seed for the initial layout
    pub seed: u64,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            width: 60,
            height: 40,
            seed: 0,
        }
    }
}

impl BoardConfig {
    pub fn validate(&self) -> Result<()> {
        if self.width <= 0 || self.height <= 0 {
            return Err(Error::Validation(format!(
                "board dimensions must be positive, got {}x{}",
                self.width, self.height
            )));
        }
        if self.width.checked_mul(self.height).is_none() {
            return Err(Error::Validation(format!(
                "board of {}x{} cells is too large",
                self.width, self.height
            )));
        }
        Ok(())
    }
}

/// Headless runner configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RunnerConfig {
    /// Board to simulate
    pub board: BoardConfig,
    /// Delay between ticks (milliseconds)
    pub tick_interval_ms: u64,
    /// Stop after this many ticks; run until shutdown when unset
    pub max_ticks: Option<u64>,
    /// Emit a census summary every N ticks
    pub census_interval: u64,
    /// OpenTelemetry endpoint
    pub otel_endpoint: Option<String>,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            board: BoardConfig::default(),
            tick_interval_ms: 150,
            max_ticks: None,
            census_interval: 100,
            otel_endpoint: None,
        }
    }
}

impl RunnerConfig {
    /// Read a config from a JSON file. Missing fields take their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("failed to read {}: {}", path.display(), e))
        })?;
        let config: Self = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Defaults, overridden by the file named in `HEXLIFE_CONFIG` if set.
    pub fn load() -> Result<Self> {
        match std::env::var_os(CONFIG_PATH_ENV) {
            Some(path) => Self::from_json_file(path),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.board.validate()?;
        if self.census_interval == 0 {
            return Err(Error::Validation(
                "census_interval must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_configs() {
        let board = BoardConfig::default();
        assert_eq!(board.width, 60);
        assert_eq!(board.height, 40);

        let runner = RunnerConfig::default();
        assert_eq!(runner.tick_interval_ms, 150);
        assert!(runner.max_ticks.is_none());
        assert!(runner.validate().is_ok());
    }

    #[test]
    fn test_board_validation() {
        let zero_width = BoardConfig {
            width: 0,
            ..Default::default()
        };
        assert!(matches!(zero_width.validate(), Err(Error::Validation(_))));

        let negative_height = BoardConfig {
            height: -3,
            ..Default::default()
        };
        assert!(negative_height.validate().is_err());

        let huge = BoardConfig {
            width: i32::MAX,
            height: 2,
            seed: 0,
        };
        assert!(huge.validate().is_err());
    }

    #[test]
    fn test_runner_rejects_zero_census_interval() {
        let config = RunnerConfig {
            census_interval: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let json = r#"{ "board": { "width": 8 }, "max_ticks": 25 }"#;
        let config: RunnerConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.board.width, 8);
        assert_eq!(config.board.height, 40);
        assert_eq!(config.max_ticks, Some(25));
        assert_eq!(config.tick_interval_ms, 150);
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let result = RunnerConfig::from_json_file("/nonexistent/hexlife.json");
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_json_file_round_trip() {
        let path = std::env::temp_dir().join(format!(
            "hexlife-config-{}.json",
            std::process::id()
        ));
        let config = RunnerConfig {
            board: BoardConfig {
                width: 12,
                height: 9,
                seed: 7,
            },
            max_ticks: Some(3),
            ..Default::default()
        };
        std::fs::write(&path, serde_json::to_string(&config).unwrap()).unwrap();

        let loaded = RunnerConfig::from_json_file(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(loaded.board, config.board);
        assert_eq!(loaded.max_ticks, Some(3));
    }
}
