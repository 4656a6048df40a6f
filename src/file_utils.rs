use anyhow::{Context, Result, anyhow};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::formats::SubtitleFormat;

// @module: File and directory utilities

// @const: Sequence number line followed by an SRT time range
static SRT_SIGNATURE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^\d+\s*\r?\n\d{2,}:\d{2}:\d{2},\d{3}\s*-->").unwrap());

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().is_file()
    }

    // @checks: Directory existence
    pub fn dir_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().is_dir()
    }

    // @creates: Directory and parents if needed
    pub fn ensure_dir<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        if !path.exists() {
            fs::create_dir_all(path).with_context(|| format!("Failed to create directory: {:?}", path))?;
        }
        Ok(())
    }

    // @generates: Output path for a converted subtitle
    // @params: input_file, output_dir, format
    pub fn generate_output_path<P1: AsRef<Path>, P2: AsRef<Path>>(
        input_file: P1,
        output_dir: P2,
        format: SubtitleFormat,
    ) -> PathBuf {
        output_dir
            .as_ref()
            .join(format!("{}.{}", Self::file_stem(input_file), format.extension()))
    }

    /// File name without its extension, or "subtitles" when there is none
    pub fn file_stem<P: AsRef<Path>>(path: P) -> String {
        path.as_ref()
            .file_stem()
            .map(|stem| stem.to_string_lossy().to_string())
            .filter(|stem| !stem.is_empty())
            .unwrap_or_else(|| "subtitles".to_string())
    }

    /// Find files with a specific extension in a directory
    pub fn find_files<P: AsRef<Path>>(dir: P, extension: &str) -> Result<Vec<PathBuf>> {
        let wanted = extension.trim_start_matches('.');
        let mut result = Vec::new();

        for entry in WalkDir::new(dir.as_ref()).follow_links(true).sort_by_file_name() {
            let entry = entry.context("Failed to read directory entry")?;
            let path = entry.path();

            if path.is_file()
                && path
                    .extension()
                    .is_some_and(|ext| ext.to_string_lossy().eq_ignore_ascii_case(wanted))
            {
                result.push(path.to_path_buf());
            }
        }

        Ok(result)
    }

    /// Find every readable subtitle file (SRT or VTT) under a directory
    pub fn find_subtitle_files<P: AsRef<Path>>(dir: P) -> Result<Vec<PathBuf>> {
        let mut result = Vec::new();
        for format in SubtitleFormat::ALL.iter().filter(|f| f.is_importable()) {
            result.extend(Self::find_files(dir.as_ref(), format.extension())?);
        }
        result.sort();
        Ok(result)
    }

    /// Read a file to a string
    pub fn read_to_string<P: AsRef<Path>>(path: P) -> Result<String> {
        fs::read_to_string(&path).with_context(|| format!("Failed to read file: {:?}", path.as_ref()))
    }

    /// Write a string to a file
    pub fn write_to_file<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
        // Ensure the parent directory exists
        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                Self::ensure_dir(parent)?;
            }
        }

        fs::write(&path, content).with_context(|| format!("Failed to write to file: {:?}", path.as_ref()))
    }

    /// Detect the subtitle format of a file, by extension first and by
    /// content when the extension is unknown
    pub fn detect_subtitle_format<P: AsRef<Path>>(path: P) -> Result<SubtitleFormat> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(anyhow!("File does not exist: {:?}", path));
        }

        if let Some(format) = SubtitleFormat::from_path(path) {
            return Ok(format);
        }

        let content = Self::read_to_string(path)?;
        Self::sniff_format(&content).ok_or_else(|| anyhow!("Could not detect subtitle format of {:?}", path))
    }

    /// Guess the format from file content
    pub fn sniff_format(content: &str) -> Option<SubtitleFormat> {
        let content = content.trim_start_matches('\u{feff}').trim_start();

        if content.starts_with("WEBVTT") {
            Some(SubtitleFormat::Vtt)
        } else if content.starts_with("[Script Info]") {
            Some(SubtitleFormat::Ass)
        } else if SRT_SIGNATURE.is_match(content) {
            Some(SubtitleFormat::Srt)
        } else {
            None
        }
    }
}
