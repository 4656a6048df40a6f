/*!
 * Error types for the subedit crate.
 *
 * Library-level failures are modelled with thiserror enums so callers can
 * match on the condition; application code wraps them in anyhow.
 */

use thiserror::Error;

use crate::cue::CueId;
use crate::formats::SubtitleFormat;

/// Errors raised while decoding time codes or choosing a wire format
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SubtitleError {
    /// A time code did not have the `H:MM:SS[,.]fff` shape
    #[error("Invalid timecode: {0}")]
    InvalidTimecode(String),

    /// A format name or file extension is not known
    #[error("Unsupported subtitle format: {0}")]
    UnsupportedFormat(String),

    /// The format is known but can only be written, not read
    #[error("Cannot import {0} subtitles, only SRT and VTT are readable")]
    UnsupportedInputFormat(SubtitleFormat),
}

/// Errors raised by edit operations. The collection is never modified when
/// one of these is returned.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EditError {
    /// A structural precondition was violated
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    /// The operation named a cue that is not in the collection
    #[error("Cue not found: {0}")]
    CueNotFound(CueId),

    /// Reading speed must be a finite, positive number of characters per second
    #[error("Invalid reading speed: {0} chars/sec")]
    InvalidReadingSpeed(f64),

    /// Time offset must be finite
    #[error("Invalid time offset: {0}s")]
    InvalidOffset(f64),

    /// Find/replace needs something to find
    #[error("Find text must not be empty")]
    EmptyFindString,

    /// Pattern-mode find/replace was given an invalid regular expression
    #[error("Invalid pattern: {0}")]
    InvalidPattern(String),
}

/// Errors raised by the persisted-subtitle collaborator
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RemoteError {
    /// No subtitle stored under the given id
    #[error("Subtitle not found: {0}")]
    NotFound(String),

    /// Upload carried a language that is not an ISO 639 code
    #[error("Invalid language code: {0}")]
    InvalidLanguage(String),

    /// A line edit referenced a line that does not exist or had bad timing
    #[error("Invalid line edit: {0}")]
    InvalidEdit(String),

    /// Stored content could not be handled in its format
    #[error("Subtitle error: {0}")]
    Subtitle(#[from] SubtitleError),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from parsing or formatting
    #[error("Subtitle error: {0}")]
    Subtitle(#[from] SubtitleError),

    /// Error from an edit operation
    #[error("Edit error: {0}")]
    Edit(#[from] EditError),

    /// Error from the remote collaborator
    #[error("Remote error: {0}")]
    Remote(#[from] RemoteError),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}

impl AppError {
    /// Recover the most specific error from an application-level failure
    pub fn classify(error: anyhow::Error) -> Self {
        for cause in error.chain() {
            if let Some(e) = cause.downcast_ref::<EditError>() {
                return Self::Edit(e.clone());
            }
            if let Some(e) = cause.downcast_ref::<SubtitleError>() {
                return Self::Subtitle(e.clone());
            }
            if let Some(e) = cause.downcast_ref::<RemoteError>() {
                return Self::Remote(e.clone());
            }
            if cause.downcast_ref::<std::io::Error>().is_some() {
                return Self::File(format!("{:#}", error));
            }
        }
        Self::Unknown(format!("{:#}", error))
    }

    /// Process exit code for the command-line front end
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Unknown(_) => 1,
            Self::Config(_) => 2,
            Self::File(_) => 3,
            Self::Subtitle(_) => 4,
            Self::Edit(_) => 5,
            Self::Remote(_) => 6,
        }
    }
}
