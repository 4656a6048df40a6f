/*!
 * Subtitle wire formats.
 *
 * SRT and VTT can be read and written; ASS is export-only. Parsing is
 * tolerant (bad blocks are skipped) and serialization never fails.
 */

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::cue::CueCollection;
use crate::errors::SubtitleError;
use crate::timecode::Notation;

pub mod ass;
pub mod srt;
pub mod vtt;

/// Supported subtitle formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SubtitleFormat {
    /// SubRip
    #[default]
    #[serde(alias = "srt")]
    Srt,
    /// WebVTT
    #[serde(alias = "vtt")]
    Vtt,
    /// Advanced SubStation Alpha
    #[serde(alias = "ass")]
    Ass,
}

impl SubtitleFormat {
    /// All formats, in menu order
    pub const ALL: [SubtitleFormat; 3] = [SubtitleFormat::Srt, SubtitleFormat::Vtt, SubtitleFormat::Ass];

    /// File extension without the dot
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Srt => "srt",
            Self::Vtt => "vtt",
            Self::Ass => "ass",
        }
    }

    /// MIME type used when handing the buffer to a download or upload
    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Srt => "application/x-subrip",
            Self::Vtt => "text/vtt",
            Self::Ass => "text/x-ssa",
        }
    }

    /// Time-code notation written by this format
    pub fn notation(&self) -> Notation {
        match self {
            Self::Srt => Notation::Srt,
            Self::Vtt => Notation::Vtt,
            Self::Ass => Notation::Ass,
        }
    }

    /// Whether the engine can parse this format
    pub fn is_importable(&self) -> bool {
        matches!(self, Self::Srt | Self::Vtt)
    }

    /// Match a file extension, case-insensitively, with or without the dot
    pub fn from_extension(extension: &str) -> Option<Self> {
        let ext = extension.trim().trim_start_matches('.');
        Self::ALL.into_iter().find(|f| f.extension().eq_ignore_ascii_case(ext))
    }

    /// Detect the format from a path's extension
    pub fn from_path<P: AsRef<Path>>(path: P) -> Option<Self> {
        path.as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }
}

impl fmt::Display for SubtitleFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.extension().to_uppercase())
    }
}

impl FromStr for SubtitleFormat {
    type Err = SubtitleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "srt" | "subrip" => Ok(Self::Srt),
            "vtt" | "webvtt" => Ok(Self::Vtt),
            "ass" => Ok(Self::Ass),
            _ => Err(SubtitleError::UnsupportedFormat(s.to_string())),
        }
    }
}

/// Serialized subtitle ready to hand to a file-saving collaborator
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportedSubtitle {
    /// Text content
    pub content: String,
    /// `{stem}.{extension}`
    pub filename: String,
    /// MIME type of the content
    pub mime_type: String,
    /// Format the content was written in
    pub format: SubtitleFormat,
}

/// Parse a text buffer in the given format
pub fn parse(content: &str, format: SubtitleFormat) -> Result<CueCollection, SubtitleError> {
    match format {
        SubtitleFormat::Srt => Ok(srt::parse(content)),
        SubtitleFormat::Vtt => Ok(vtt::parse(content)),
        SubtitleFormat::Ass => Err(SubtitleError::UnsupportedInputFormat(format)),
    }
}

/// Serialize a collection in storage order
pub fn serialize(collection: &CueCollection, format: SubtitleFormat) -> String {
    match format {
        SubtitleFormat::Srt => srt::write(collection),
        SubtitleFormat::Vtt => vtt::write(collection),
        SubtitleFormat::Ass => ass::write(collection),
    }
}

/// Serialize a collection and attach the filename and MIME type
pub fn export(collection: &CueCollection, format: SubtitleFormat, stem: &str) -> ExportedSubtitle {
    ExportedSubtitle {
        content: serialize(collection, format),
        filename: format!("{}.{}", stem, format.extension()),
        mime_type: format.mime_type().to_string(),
        format,
    }
}

/// Strip a UTF-8 BOM and normalize line endings to `\n`
pub(crate) fn normalize_input(content: &str) -> String {
    content
        .strip_prefix('\u{feff}')
        .unwrap_or(content)
        .replace("\r\n", "\n")
        .replace('\r', "\n")
}
