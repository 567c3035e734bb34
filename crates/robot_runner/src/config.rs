//! Robot configuration loaded from TOML.
//!
//! Every field has a default, so an empty file (or no file at all) gives a
//! working setup:
//!
//! ```
//! use robot_runner::RobotConfig;
//!
//! let config = RobotConfig::from_toml_str(r#"
//!     home = "d4"
//!     settle_ms = 250
//! "#).unwrap();
//!
//! assert_eq!(config.home.notation(), "d4");
//! assert_eq!(config.parking_depth, 2);
//! ```

use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use robot_core::{ControllerConfig, Coord, DEFAULT_PARKING_DEPTH};

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RobotConfig {
    /// Square the robot rests on between maneuvers.
    pub home: Coord,
    /// Pause after every command, in milliseconds.
    pub settle_ms: u64,
    /// How many steps a blocker may be pushed away.
    pub parking_depth: usize,
    /// Abort a maneuver (between legs) once it has run this long.
    pub max_maneuver_secs: Option<u64>,
    /// Actuator device or file that receives one command per line.
    /// Without one the runner only reports the commands.
    pub device: Option<PathBuf>,
    /// Where the journal of the last request is written.
    pub journal_path: Option<PathBuf>,
    /// `tracing` filter directive, used when `RUST_LOG` is not set.
    pub log_filter: Option<String>,
}

impl Default for RobotConfig {
    fn default() -> Self {
        Self {
            home: Coord::E4,
            settle_ms: 500,
            parking_depth: DEFAULT_PARKING_DEPTH,
            max_maneuver_secs: None,
            device: None,
            journal_path: None,
            log_filter: None,
        }
    }
}

impl RobotConfig {
    /// Loads configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Like [`load`](Self::load), but a missing file yields the defaults.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(contents) => Self::from_toml_str(&contents),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e.into()),
        }
    }

    /// Parses and validates configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: RobotConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.parking_depth == 0 {
            return Err(ConfigError::Invalid(
                "parking_depth must be at least 1".to_string(),
            ));
        }
        if self.max_maneuver_secs == Some(0) {
            return Err(ConfigError::Invalid(
                "max_maneuver_secs must be positive when set".to_string(),
            ));
        }
        Ok(())
    }

    pub fn settle(&self) -> Duration {
        Duration::from_millis(self.settle_ms)
    }

    pub fn maneuver_budget(&self) -> Option<Duration> {
        self.max_maneuver_secs.map(Duration::from_secs)
    }

    pub fn controller_config(&self) -> ControllerConfig {
        ControllerConfig {
            home: self.home,
            settle: self.settle(),
            parking_depth: self.parking_depth,
            maneuver_budget: self.maneuver_budget(),
        }
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;
