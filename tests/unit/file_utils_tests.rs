/*!
 * Tests for file utility functions
 */

use anyhow::Result;
use std::path::Path;

use subedit::file_utils::FileManager;
use subedit::SubtitleFormat;
use crate::common;

/// Test existence checks for files and directories
#[test]
fn test_exists_withFileAndDir_shouldDistinguish() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let file = common::create_test_subtitle(temp_dir.path(), "a.srt")?;

    assert!(FileManager::file_exists(&file));
    assert!(!FileManager::dir_exists(&file));
    assert!(FileManager::dir_exists(temp_dir.path()));
    assert!(!FileManager::file_exists(temp_dir.path().join("missing.srt")));
    Ok(())
}

/// Test writing creates missing parent directories
#[test]
fn test_writeToFile_withNestedPath_shouldCreateParents() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("nested").join("deeper").join("out.vtt");

    FileManager::write_to_file(&path, "WEBVTT\n\n")?;

    assert_eq!(FileManager::read_to_string(&path)?, "WEBVTT\n\n");
    Ok(())
}

#[test]
fn test_readToString_withMissingFile_shouldFail() {
    assert!(FileManager::read_to_string("/definitely/not/here.srt").is_err());
}

/// Test output path generation
#[test]
fn test_generateOutputPath_shouldSwapExtension() {
    let path = FileManager::generate_output_path("/videos/movie.en.srt", "/out", SubtitleFormat::Vtt);
    assert_eq!(path, Path::new("/out/movie.en.vtt"));

    let path = FileManager::generate_output_path("clip", "dir", SubtitleFormat::Ass);
    assert_eq!(path, Path::new("dir/clip.ass"));
}

/// Test recursive file discovery
#[test]
fn test_findFiles_shouldWalkSubdirectoriesCaseInsensitively() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    common::create_test_subtitle(temp_dir.path(), "one.srt")?;
    common::create_test_subtitle(temp_dir.path(), "season1/two.SRT")?;
    common::create_test_file(temp_dir.path(), "three.vtt", common::SAMPLE_VTT)?;
    common::create_test_file(temp_dir.path(), "notes.txt", "hello")?;

    let srt_files = FileManager::find_files(temp_dir.path(), ".srt")?;
    assert_eq!(srt_files.len(), 2);

    let subtitle_files = FileManager::find_subtitle_files(temp_dir.path())?;
    assert_eq!(subtitle_files.len(), 3);
    assert!(subtitle_files.iter().all(|p| !p.ends_with("notes.txt")));
    Ok(())
}

/// Test format detection by extension and by content
#[test]
fn test_detectSubtitleFormat_shouldUseExtensionThenContent() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let srt = common::create_test_subtitle(temp_dir.path(), "a.srt")?;
    let vtt_no_ext = common::create_test_file(temp_dir.path(), "b.txt", common::SAMPLE_VTT)?;
    let srt_no_ext = common::create_test_file(temp_dir.path(), "c.sub", common::SAMPLE_SRT)?;
    let unknown = common::create_test_file(temp_dir.path(), "d.txt", "just some text")?;

    assert_eq!(FileManager::detect_subtitle_format(&srt)?, SubtitleFormat::Srt);
    assert_eq!(FileManager::detect_subtitle_format(&vtt_no_ext)?, SubtitleFormat::Vtt);
    assert_eq!(FileManager::detect_subtitle_format(&srt_no_ext)?, SubtitleFormat::Srt);
    assert!(FileManager::detect_subtitle_format(&unknown).is_err());
    assert!(FileManager::detect_subtitle_format(temp_dir.path().join("missing.srt")).is_err());
    Ok(())
}

#[test]
fn test_sniffFormat_withBomAndAssHeader_shouldDetect() {
    assert_eq!(FileManager::sniff_format("\u{feff}WEBVTT\n\n"), Some(SubtitleFormat::Vtt));
    assert_eq!(FileManager::sniff_format("[Script Info]\nTitle: x\n"), Some(SubtitleFormat::Ass));
    assert_eq!(FileManager::sniff_format("1\r\n00:00:01,000 --> 00:00:02,000\r\nHi\r\n"), Some(SubtitleFormat::Srt));
    assert_eq!(FileManager::sniff_format(""), None);
}
