// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Simulator timing configuration
//!
//! Loaded from TOML; every key is optional:
//!
//! ```toml
//! tick_interval = "150ms"
//! settle_delay = "500ms"
//! start_delay = "1s"
//! max_increment = 15.0
//! display_cap = 99.0
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Errors loading a config file
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Longest delay a config may ask for
pub const MAX_DELAY: Duration = Duration::from_secs(24 * 60 * 60);

/// Timing and randomness knobs for a pipeline run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulatorConfig {
    /// Interval between progress ticks of the processing stage
    #[serde(with = "humantime_serde")]
    pub tick_interval: Duration,
    /// Pause after a stage completes before the next one begins
    #[serde(with = "humantime_serde")]
    pub settle_delay: Duration,
    /// Pause between `start` and the first stage beginning
    #[serde(with = "humantime_serde")]
    pub start_delay: Duration,
    /// Upper bound (exclusive) of a single tick's increment
    pub max_increment: f64,
    /// Highest progress shown while a stage is still processing
    pub display_cap: f64,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_millis(150),
            settle_delay: Duration::from_millis(500),
            start_delay: Duration::from_secs(1),
            max_increment: 15.0,
            display_cap: 99.0,
        }
    }
}

impl SimulatorConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: SimulatorConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "read config file");
        Self::from_toml_str(&content)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_interval.is_zero() {
            return Err(ConfigError::Invalid(
                "tick_interval must be greater than zero".to_string(),
            ));
        }
        for (key, delay) in [
            ("tick_interval", self.tick_interval),
            ("settle_delay", self.settle_delay),
            ("start_delay", self.start_delay),
        ] {
            if delay > MAX_DELAY {
                return Err(ConfigError::Invalid(format!(
                    "{key} must be at most {MAX_DELAY:?}, got {delay:?}"
                )));
            }
        }
        if !(self.max_increment.is_finite() && self.max_increment > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "max_increment must be a positive number, got {}",
                self.max_increment
            )));
        }
        if !(0.0..100.0).contains(&self.display_cap) {
            return Err(ConfigError::Invalid(format!(
                "display_cap must be in [0, 100), got {}",
                self.display_cap
            )));
        }
        Ok(())
    }

    /// Same settings with every delay replaced (handy for fast demos and tests)
    pub fn with_delays(mut self, tick: Duration, settle: Duration, start: Duration) -> Self {
        self.tick_interval = tick;
        self.settle_delay = settle;
        self.start_delay = start;
        self
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
