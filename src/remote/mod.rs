/*!
 * Contract for the persisted-subtitle service.
 *
 * The engine does not talk to the network. This module defines what the
 * collaborator that does must offer, the payloads exchanged with it, and the
 * conversion between a cue collection and the line-edit shape it accepts:
 * - `line_edits`: 1-based, millisecond line edits
 * - `memory`: an in-process implementation of the service
 */

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::errors::RemoteError;
use crate::formats::SubtitleFormat;
use crate::language_utils;
use crate::session::EditSession;

pub mod line_edits;
pub mod memory;

pub use line_edits::{from_line_edits, to_line_edits, LineEdit, LineEditBatch};
pub use memory::InMemorySubtitleService;

/// A subtitle as stored by the service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteSubtitle {
    pub id: String,
    #[serde(default)]
    pub media_id: Option<String>,
    /// Episode the subtitle belongs to, for series
    #[serde(default)]
    pub media_segment_id: Option<String>,
    pub language: String,
    pub title: String,
    pub format: SubtitleFormat,
    pub content: String,
}

/// Metadata and file bytes for a new subtitle
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubtitleUpload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media_segment_id: Option<String>,
    pub language: String,
    pub title: String,
    pub format: SubtitleFormat,
    pub content: String,
}

impl SubtitleUpload {
    /// Create an upload, rejecting languages that are not ISO 639 codes
    pub fn new(
        language: &str,
        title: impl Into<String>,
        format: SubtitleFormat,
        content: impl Into<String>,
    ) -> Result<Self, RemoteError> {
        language_utils::validate_language_code(language)
            .map_err(|_| RemoteError::InvalidLanguage(language.to_string()))?;

        Ok(Self {
            media_id: None,
            media_segment_id: None,
            language: language.trim().to_lowercase(),
            title: title.into(),
            format,
            content: content.into(),
        })
    }

    /// Serialize a session's cues into an upload
    pub fn from_session(session: &EditSession, language: &str, format: SubtitleFormat) -> Result<Self, RemoteError> {
        let exported = session.export(format, None);
        Self::new(language, session.name.clone(), format, exported.content)
    }

    /// Attach the upload to a movie
    pub fn for_media(mut self, media_id: impl Into<String>) -> Self {
        self.media_id = Some(media_id.into());
        self
    }

    /// Attach the upload to an episode
    pub fn for_episode(mut self, media_segment_id: impl Into<String>) -> Self {
        self.media_segment_id = Some(media_segment_id.into());
        self
    }
}

/// Persisted-subtitle collaborator
///
/// Implementations own transport, authentication and storage; the engine
/// only produces and consumes the payloads.
#[async_trait]
pub trait SubtitleService: Send + Sync {
    /// Fetch subtitle metadata and content
    async fn fetch(&self, id: &str) -> Result<RemoteSubtitle, RemoteError>;

    /// List subtitles attached to a movie or episode
    async fn list_for_media(&self, media_id: &str) -> Result<Vec<RemoteSubtitle>, RemoteError>;

    /// Store a new subtitle
    async fn upload(&self, upload: SubtitleUpload) -> Result<RemoteSubtitle, RemoteError>;

    /// Apply line edits plus a change note to a stored subtitle
    async fn update_lines(&self, id: &str, batch: &LineEditBatch) -> Result<RemoteSubtitle, RemoteError>;

    /// Remove a stored subtitle
    async fn delete(&self, id: &str) -> Result<(), RemoteError>;
}

/// Fetch a stored subtitle and open it as an editing session
pub async fn open_session(service: &dyn SubtitleService, id: &str) -> Result<EditSession, RemoteError> {
    let subtitle = service.fetch(id).await?;
    let session = EditSession::load(subtitle.title, &subtitle.content, subtitle.format)?;
    Ok(session)
}
