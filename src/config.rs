//! Configuration loading and management
//!
//! Handles parsing of `taskdeck.toml` configuration files.

use std::path::{Path, PathBuf};

use chrono::Weekday;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Config file name inside the data directory
pub const CONFIG_FILENAME: &str = "taskdeck.toml";

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Data directory for blob files; platform default when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,

    /// First day of the calendar week, for "this week" bucketing
    #[serde(default = "default_week_start")]
    pub week_start: String,

    /// Seed first-time owners with sample tasks
    #[serde(default = "default_seed_sample_tasks")]
    pub seed_sample_tasks: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: None,
            week_start: default_week_start(),
            seed_sample_tasks: default_seed_sample_tasks(),
        }
    }
}

fn default_week_start() -> String {
    // Matches the original app's week convention
    "sunday".to_string()
}

fn default_seed_sample_tasks() -> bool {
    true
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load `taskdeck.toml` from a directory, falling back to defaults when
    /// the file is missing or malformed.
    pub fn load_from_dir(dir: &Path) -> Self {
        let config_path = dir.join(CONFIG_FILENAME);
        if config_path.exists() {
            Self::load(&config_path).unwrap_or_else(|err| {
                tracing::warn!(path = %config_path.display(), %err, "ignoring invalid config");
                Self::default()
            })
        } else {
            Self::default()
        }
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Resolved data directory: explicit override, else the platform
    /// per-user data dir, else `.taskdeck` under the working directory.
    pub fn data_root(&self) -> PathBuf {
        if let Some(dir) = &self.data_dir {
            return dir.clone();
        }
        directories::ProjectDirs::from("", "", "taskdeck")
            .map(|dirs| dirs.data_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from(".taskdeck"))
    }

    /// Week start as a `chrono` weekday; unknown names fall back to Sunday.
    pub fn week_start_day(&self) -> Weekday {
        match self.week_start.trim().to_ascii_lowercase().as_str() {
            "monday" | "mon" => Weekday::Mon,
            "tuesday" | "tue" => Weekday::Tue,
            "wednesday" | "wed" => Weekday::Wed,
            "thursday" | "thu" => Weekday::Thu,
            "friday" | "fri" => Weekday::Fri,
            "saturday" | "sat" => Weekday::Sat,
            "sunday" | "sun" => Weekday::Sun,
            other => {
                tracing::warn!(week_start = other, "unknown week_start, using sunday");
                Weekday::Sun
            }
        }
    }
}
