//! Configuration loading and management
//!
//! Handles parsing of the optional `dayplan.toml` file in the store root.
//! It carries default schedule parameters used when `create` omits them.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Schedule defaults
    #[serde(default)]
    pub schedule: ScheduleConfig,
}

/// Default schedule parameters for new projects
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleConfig {
    /// Hours available per working day
    #[serde(default = "default_daily_hours")]
    pub daily_hours: u32,

    /// How many weekdays, counted from Monday, are working days
    #[serde(default = "default_working_days")]
    pub working_days_per_week: u32,
}

fn default_daily_hours() -> u32 {
    8
}

fn default_working_days() -> u32 {
    5
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            daily_hours: default_daily_hours(),
            working_days_per_week: default_working_days(),
        }
    }
}

impl Config {
    /// Load configuration from a file, falling back to defaults when the
    /// file does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Write configuration to a file
    pub fn save(&self, path: &Path) -> Result<()> {
        let contents = toml::to_string_pretty(self)
            .map_err(|e| crate::error::Error::OperationFailed(e.to_string()))?;
        crate::lock::write_atomic(path, contents.as_bytes())?;
        Ok(())
    }
}
