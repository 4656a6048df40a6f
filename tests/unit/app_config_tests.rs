/*!
 * Tests for application configuration functionality
 */

use anyhow::Result;

use subedit::app_config::{Config, LogLevel};
use subedit::{ReplaceMode, SubtitleFormat};
use crate::common;

/// Test default configuration values
#[test]
fn test_default_config_withNoParameters_shouldHaveCorrectDefaults() {
    let config = Config::default();

    assert_eq!(config.editing.reading_speed_cps, 15.0);
    assert_eq!(config.editing.replace_mode, ReplaceMode::Literal);
    assert_eq!(config.export.default_format, SubtitleFormat::Srt);
    assert!(!config.export.sort_before_export);
    assert_eq!(config.log_level, LogLevel::Info);
}

/// Test configuration validation
#[test]
fn test_config_validation_withVariousReadingSpeeds_shouldValidateCorrectly() {
    let mut config = Config::default();
    assert!(config.validate().is_ok());

    config.editing.reading_speed_cps = 0.0;
    assert!(config.validate().is_err());

    config.editing.reading_speed_cps = -3.0;
    assert!(config.validate().is_err());

    config.editing.reading_speed_cps = f64::NAN;
    assert!(config.validate().is_err());

    config.editing.reading_speed_cps = 21.5;
    assert!(config.validate().is_ok());
}

/// Missing sections fall back to their defaults
#[test]
fn test_config_deserialization_withPartialJson_shouldFillDefaults() -> Result<()> {
    let json = r#"{
        "editing": { "replace_mode": "pattern" },
        "export": { "default_format": "vtt" },
        "log_level": "debug"
    }"#;

    let config: Config = serde_json::from_str(json)?;

    assert_eq!(config.editing.reading_speed_cps, 15.0);
    assert_eq!(config.editing.replace_mode, ReplaceMode::Pattern);
    assert_eq!(config.export.default_format, SubtitleFormat::Vtt);
    assert_eq!(config.log_level, LogLevel::Debug);
    Ok(())
}

#[test]
fn test_config_deserialization_withEmptyObject_shouldEqualDefault() -> Result<()> {
    let config: Config = serde_json::from_str("{}")?;
    assert_eq!(config, Config::default());
    Ok(())
}

/// A missing config file is created with defaults
#[test]
fn test_loadOrCreate_withMissingFile_shouldWriteDefaults() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("conf.json");

    let config = Config::load_or_create(&path)?;

    assert!(path.exists());
    assert_eq!(config, Config::default());
    assert_eq!(Config::load(&path)?, config);
    Ok(())
}

#[test]
fn test_save_thenLoad_shouldPreserveValues() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("custom.json");

    let mut config = Config::default();
    config.editing.reading_speed_cps = 18.0;
    config.export.default_format = SubtitleFormat::Ass;
    config.export.sort_before_export = true;
    config.log_level = LogLevel::Warn;
    config.save(&path)?;

    let loaded = Config::load_or_create(&path)?;

    assert_eq!(loaded, config);
    let raw = std::fs::read_to_string(&path)?;
    assert!(raw.contains("\"default_format\": \"ASS\""));
    Ok(())
}

#[test]
fn test_load_withMalformedJson_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "bad.json", "{ not json")?;

    assert!(Config::load(&path).is_err());
    Ok(())
}

#[test]
fn test_logLevel_toLevelFilter_shouldMapEveryLevel() {
    assert_eq!(LogLevel::Error.to_level_filter(), log::LevelFilter::Error);
    assert_eq!(LogLevel::Trace.to_level_filter(), log::LevelFilter::Trace);
    assert_eq!(LogLevel::default().to_level_filter(), log::LevelFilter::Info);
}
