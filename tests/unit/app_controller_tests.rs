/*!
 * Tests for the application controller
 */

use anyhow::Result;
use std::path::Path;

use subedit::app_config::Config;
use subedit::app_controller::Controller;
use subedit::{ReplaceMode, SubtitleFormat};
use crate::common;

/// Test controller creation with default config
#[test]
fn test_controller_creation_withDefaultConfig_shouldSucceed() -> Result<()> {
    let controller = Controller::new_for_test()?;
    assert_eq!(controller.config(), &Config::default());
    Ok(())
}

/// Invalid configuration is rejected up front
#[test]
fn test_controller_creation_withInvalidConfig_shouldFail() {
    let mut config = Config::default();
    config.editing.reading_speed_cps = 0.0;

    assert!(Controller::with_config(config).is_err());
}

#[test]
fn test_loadSession_shouldNameSessionAfterFile() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let file = common::create_test_subtitle(temp_dir.path(), "pilot.srt")?;
    let controller = Controller::new_for_test()?;

    let session = controller.load_session(&file)?;

    assert_eq!(session.name, "pilot");
    assert_eq!(session.source_format, Some(SubtitleFormat::Srt));
    assert_eq!(session.cues().len(), 2);
    Ok(())
}

#[test]
fn test_loadSession_withMissingOrAssFile_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let ass = common::create_test_file(temp_dir.path(), "styled.ass", "[Script Info]\n")?;
    let controller = Controller::new_for_test()?;

    assert!(controller.load_session(temp_dir.path().join("none.srt")).is_err());
    assert!(controller.load_session(&ass).is_err());
    Ok(())
}

#[test]
fn test_editedOutputPath_shouldSitNextToInput() {
    let path = Controller::edited_output_path(Path::new("/subs/movie.srt"), SubtitleFormat::Srt);
    assert_eq!(path, Path::new("/subs/movie.edited.srt"));
}

/// Without an explicit mode the configured one applies
#[test]
fn test_replace_withConfiguredPatternMode_shouldUseRegex() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let file = common::create_test_subtitle(temp_dir.path(), "a.srt")?;
    let mut config = Config::default();
    config.editing.replace_mode = ReplaceMode::Pattern;
    let controller = Controller::with_config(config)?;

    let (output, modified) = controller.replace(&file, r"\bline\b", "row", None, None)?;

    assert_eq!(modified, 1);
    let written = std::fs::read_to_string(output)?;
    assert!(written.contains("Second row"));
    Ok(())
}

/// Sorting before export reorders cues written out of order
#[test]
fn test_saveSession_withSortBeforeExport_shouldWriteChronologically() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let content = "1\n00:00:05,000 --> 00:00:06,000\nLater\n\n2\n00:00:01,000 --> 00:00:02,000\nEarlier\n";
    let file = common::create_test_file(temp_dir.path(), "unordered.srt", content)?;
    let mut config = Config::default();
    config.export.sort_before_export = true;
    let controller = Controller::with_config(config)?;

    let session = controller.load_session(&file)?;
    let output = temp_dir.path().join("sorted.srt");
    controller.save_session(&session, SubtitleFormat::Srt, &output)?;

    assert_eq!(
        std::fs::read_to_string(&output)?,
        "1\n00:00:01,000 --> 00:00:02,000\nEarlier\n\n2\n00:00:05,000 --> 00:00:06,000\nLater\n"
    );
    // The session itself keeps file order
    assert_eq!(session.cues().as_slice()[0].text, "Later");
    Ok(())
}
