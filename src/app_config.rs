use anyhow::{Context, Result, anyhow};
use log::{LevelFilter, warn};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::editing::ReplaceMode;
use crate::formats::SubtitleFormat;

/// Application configuration module
/// This module handles loading, validating and saving the settings used by
/// the command-line front end. The engine itself takes every value as an
/// explicit argument.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Editing defaults
    #[serde(default)]
    pub editing: EditingConfig,

    /// Export defaults
    #[serde(default)]
    pub export: ExportConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Defaults for bulk edit commands
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct EditingConfig {
    /// Characters per second used by reading-speed recalculation
    #[serde(default = "default_reading_speed_cps")]
    pub reading_speed_cps: f64,

    /// How find/replace interprets the find string
    #[serde(default)]
    pub replace_mode: ReplaceMode,
}

impl Default for EditingConfig {
    fn default() -> Self {
        Self {
            reading_speed_cps: default_reading_speed_cps(),
            replace_mode: ReplaceMode::default(),
        }
    }
}

/// Defaults for written subtitle files
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct ExportConfig {
    /// Format used when a command does not name one
    #[serde(default)]
    pub default_format: SubtitleFormat,

    /// Reorder cues chronologically before writing
    #[serde(default)]
    pub sort_before_export: bool,
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_level_filter(self) -> LevelFilter {
        match self {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

fn default_reading_speed_cps() -> f64 {
    15.0
}

impl Config {
    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        let cps = self.editing.reading_speed_cps;
        if !cps.is_finite() || cps <= 0.0 {
            return Err(anyhow!("Reading speed must be a positive number of characters per second, got {}", cps));
        }

        Ok(())
    }

    /// Load the configuration from a JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).with_context(|| format!("Failed to open config file: {:?}", path))?;

        let reader = BufReader::new(file);
        serde_json::from_reader(reader).with_context(|| format!("Failed to parse config file: {:?}", path))
    }

    /// Load the configuration, writing the defaults first if the file is missing
    pub fn load_or_create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            return Self::load(path);
        }

        warn!("Config file not found at {:?}, creating default config.", path);
        let config = Config::default();
        config.save(path)?;
        Ok(config)
    }

    /// Save the configuration as pretty-printed JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let config_json = serde_json::to_string_pretty(self).context("Failed to serialize config to JSON")?;

        std::fs::write(path, config_json).with_context(|| format!("Failed to write config to file: {:?}", path))
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            editing: EditingConfig::default(),
            export: ExportConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}
