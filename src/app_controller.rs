use anyhow::{Context, Result, anyhow};
use log::{debug, error, info, warn};
use std::path::{Path, PathBuf};

use crate::app_config::Config;
use crate::cue::Cue;
use crate::editing::ReplaceMode;
use crate::file_utils::FileManager;
use crate::formats::SubtitleFormat;
use crate::remote::LineEditBatch;
use crate::session::EditSession;

// @module: Application controller for subtitle files

/// Outcome of converting every subtitle file in a directory
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConversionSummary {
    pub converted: usize,
    pub skipped: usize,
    pub failed: usize,
}

/// Main application controller: reads files into editing sessions, runs the
/// requested edit on every cue and writes the result back out
pub struct Controller {
    // @field: App configuration
    config: Config,
}

impl Controller {
    /// Create a new controller for test purposes with default configuration
    pub fn new_for_test() -> Result<Self> {
        Self::with_config(Config::default())
    }

    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate().context("Configuration validation failed")?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Read a subtitle file into a session named after the file
    pub fn load_session<P: AsRef<Path>>(&self, input_file: P) -> Result<EditSession> {
        let input_file = input_file.as_ref();
        if !FileManager::file_exists(input_file) {
            return Err(anyhow!("Input file does not exist: {:?}", input_file));
        }

        let format = FileManager::detect_subtitle_format(input_file)?;
        let content = FileManager::read_to_string(input_file)?;
        let session = EditSession::load(FileManager::file_stem(input_file), &content, format)
            .with_context(|| format!("Failed to load subtitles from {:?}", input_file))?;

        if session.cues().is_empty() {
            warn!("No subtitles found in {:?}", input_file);
        }
        Ok(session)
    }

    /// Write a session to `output_file` in the given format
    pub fn save_session<P: AsRef<Path>>(&self, session: &EditSession, format: SubtitleFormat, output_file: P) -> Result<()> {
        let output_file = output_file.as_ref();
        let exported = if self.config.export.sort_before_export {
            let mut sorted = session.clone();
            sorted.sort_by_start_time();
            sorted.export(format, None)
        } else {
            session.export(format, None)
        };

        FileManager::write_to_file(output_file, &exported.content)?;
        debug!("Wrote {} ({}) to {:?}", exported.filename, exported.mime_type, output_file);
        Ok(())
    }

    /// Convert one file. Returns the written path, or `None` when the output
    /// already exists and `force_overwrite` is off.
    pub fn convert_file<P1: AsRef<Path>, P2: AsRef<Path>>(
        &self,
        input_file: P1,
        output_dir: P2,
        format: Option<SubtitleFormat>,
        force_overwrite: bool,
    ) -> Result<Option<PathBuf>> {
        let input_file = input_file.as_ref();
        let format = format.unwrap_or(self.config.export.default_format);
        let output_path = FileManager::generate_output_path(input_file, output_dir.as_ref(), format);

        if output_path == input_file {
            return Err(anyhow!("Refusing to overwrite the input file {:?}", input_file));
        }
        if output_path.exists() && !force_overwrite {
            warn!("Skipping {:?}, output already exists (use -f to force overwrite)", output_path);
            return Ok(None);
        }

        let session = self.load_session(input_file)?;
        self.save_session(&session, format, &output_path)?;
        info!("Converted {} subtitles: {:?}", session.cues().len(), output_path);
        Ok(Some(output_path))
    }

    /// Convert every SRT/VTT file under `input_dir`. Outputs go next to each
    /// input unless `output_dir` is given.
    pub fn convert_folder<P: AsRef<Path>>(
        &self,
        input_dir: P,
        output_dir: Option<&Path>,
        format: Option<SubtitleFormat>,
        force_overwrite: bool,
    ) -> Result<ConversionSummary> {
        let input_dir = input_dir.as_ref();
        if !FileManager::dir_exists(input_dir) {
            return Err(anyhow!("Input directory does not exist: {:?}", input_dir));
        }

        let files = FileManager::find_subtitle_files(input_dir)?;
        info!("Found {} subtitle files in {:?}", files.len(), input_dir);

        let mut summary = ConversionSummary::default();
        for file in files {
            let target_dir = match output_dir {
                Some(dir) => dir.to_path_buf(),
                None => file.parent().unwrap_or(Path::new(".")).to_path_buf(),
            };

            match self.convert_file(&file, &target_dir, format, force_overwrite) {
                Ok(Some(_)) => summary.converted += 1,
                Ok(None) => summary.skipped += 1,
                Err(e) => {
                    error!("Error processing {:?}: {:#}", file, e);
                    summary.failed += 1;
                }
            }
        }

        info!(
            "Finished: {} converted, {} skipped, {} failed",
            summary.converted, summary.skipped, summary.failed
        );
        Ok(summary)
    }

    /// Shift every cue by `offset` seconds
    pub fn shift<P: AsRef<Path>>(&self, input_file: P, offset: f64, output_file: Option<PathBuf>) -> Result<PathBuf> {
        let mut session = self.load_session(&input_file)?;
        session.select_all();
        let shifted = session.apply_offset(offset)?;
        info!("Shifted {} subtitles by {}s", shifted, offset);

        self.write_edited(&session, input_file.as_ref(), output_file)
    }

    /// Find/replace in every cue; returns the output path and the number of
    /// cues changed
    pub fn replace<P: AsRef<Path>>(
        &self,
        input_file: P,
        find: &str,
        replace: &str,
        mode: Option<ReplaceMode>,
        output_file: Option<PathBuf>,
    ) -> Result<(PathBuf, usize)> {
        let mode = mode.unwrap_or(self.config.editing.replace_mode);
        let mut session = self.load_session(&input_file)?;
        session.select_all();
        let modified = session.find_replace(find, replace, mode)?;
        info!("Replaced text in {} subtitles", modified);

        let path = self.write_edited(&session, input_file.as_ref(), output_file)?;
        Ok((path, modified))
    }

    /// Recompute every cue's duration from a reading speed
    pub fn reading_speed<P: AsRef<Path>>(
        &self,
        input_file: P,
        chars_per_second: Option<f64>,
        output_file: Option<PathBuf>,
    ) -> Result<PathBuf> {
        let cps = chars_per_second.unwrap_or(self.config.editing.reading_speed_cps);
        let mut session = self.load_session(&input_file)?;
        session.select_all();
        let resized = session.apply_reading_speed(cps)?;
        info!("Resized {} subtitles at {} chars/sec", resized, cps);

        self.write_edited(&session, input_file.as_ref(), output_file)
    }

    /// Cues that overlap at least one other cue, in file order
    pub fn overlaps<P: AsRef<Path>>(&self, input_file: P) -> Result<Vec<Cue>> {
        let session = self.load_session(input_file)?;
        Ok(session.overlapping().into_iter().cloned().collect())
    }

    /// Line edits for every cue of a file
    pub fn line_edits<P: AsRef<Path>>(&self, input_file: P, note: Option<String>) -> Result<LineEditBatch> {
        let session = self.load_session(input_file)?;
        Ok(LineEditBatch::from_collection(session.cues(), note))
    }

    /// Output for edit commands: the explicit path, or `<stem>.edited.<ext>`
    /// next to the input, in the input's format
    pub fn edited_output_path(input_file: &Path, format: SubtitleFormat) -> PathBuf {
        let dir = input_file.parent().unwrap_or(Path::new("."));
        dir.join(format!("{}.edited.{}", FileManager::file_stem(input_file), format.extension()))
    }

    fn write_edited(&self, session: &EditSession, input_file: &Path, output_file: Option<PathBuf>) -> Result<PathBuf> {
        let output_file = output_file.unwrap_or_else(|| {
            let format = session.source_format.unwrap_or(self.config.export.default_format);
            Self::edited_output_path(input_file, format)
        });
        let format = SubtitleFormat::from_path(&output_file)
            .or(session.source_format)
            .unwrap_or(self.config.export.default_format);

        self.save_session(session, format, &output_file)?;
        info!("Success: {:?}", output_file);
        Ok(output_file)
    }
}
