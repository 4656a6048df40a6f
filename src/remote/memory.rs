/*!
 * In-process implementation of the subtitle service.
 *
 * Subtitles live in a map guarded by a mutex. Line edits are applied by
 * parsing the stored content, editing the addressed lines and writing it back
 * in the stored format, all against a copy so a bad batch changes nothing.
 */

use std::collections::HashMap;

use async_trait::async_trait;
use log::{debug, info, warn};
use parking_lot::Mutex;
use uuid::Uuid;

use super::{LineEditBatch, RemoteSubtitle, SubtitleService, SubtitleUpload};
use crate::editing;
use crate::errors::{RemoteError, SubtitleError};
use crate::formats;
use crate::timecode;

/// Subtitle service backed by a map in memory
#[derive(Debug, Default)]
pub struct InMemorySubtitleService {
    subtitles: Mutex<HashMap<String, RemoteSubtitle>>,
}

impl InMemorySubtitleService {
    /// Create an empty service
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored subtitles
    pub fn len(&self) -> usize {
        self.subtitles.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.subtitles.lock().is_empty()
    }

    fn apply_batch(subtitle: &RemoteSubtitle, batch: &LineEditBatch) -> Result<String, RemoteError> {
        let mut cues = formats::parse(&subtitle.content, subtitle.format)?;

        for edit in &batch.edits {
            let id = edit
                .index
                .checked_sub(1)
                .and_then(|position| cues.as_slice().get(position))
                .map(|cue| cue.id.clone())
                .ok_or_else(|| RemoteError::InvalidEdit(format!("line {} does not exist", edit.index)))?;

            cues = editing::update(
                &cues,
                &id,
                timecode::ms_to_seconds(edit.start_ms),
                timecode::ms_to_seconds(edit.end_ms),
                &edit.text,
            )
            .map_err(|e| RemoteError::InvalidEdit(format!("line {}: {}", edit.index, e)))?;
        }

        Ok(formats::serialize(&cues, subtitle.format))
    }
}

#[async_trait]
impl SubtitleService for InMemorySubtitleService {
    async fn fetch(&self, id: &str) -> Result<RemoteSubtitle, RemoteError> {
        self.subtitles
            .lock()
            .get(id)
            .cloned()
            .ok_or_else(|| RemoteError::NotFound(id.to_string()))
    }

    async fn list_for_media(&self, media_id: &str) -> Result<Vec<RemoteSubtitle>, RemoteError> {
        let subtitles = self.subtitles.lock();
        let mut found: Vec<RemoteSubtitle> = subtitles
            .values()
            .filter(|s| s.media_id.as_deref() == Some(media_id) || s.media_segment_id.as_deref() == Some(media_id))
            .cloned()
            .collect();
        found.sort_by(|a, b| a.language.cmp(&b.language).then_with(|| a.title.cmp(&b.title)));
        Ok(found)
    }

    /// Store a new subtitle. Only formats that can be parsed back are
    /// accepted, since line edits re-read the stored content.
    async fn upload(&self, upload: SubtitleUpload) -> Result<RemoteSubtitle, RemoteError> {
        if !upload.format.is_importable() {
            warn!("Rejected upload '{}' in {} format", upload.title, upload.format);
            return Err(SubtitleError::UnsupportedInputFormat(upload.format).into());
        }

        let subtitle = RemoteSubtitle {
            id: Uuid::new_v4().to_string(),
            media_id: upload.media_id,
            media_segment_id: upload.media_segment_id,
            language: upload.language,
            title: upload.title,
            format: upload.format,
            content: upload.content,
        };

        info!("Stored subtitle '{}' ({}, {})", subtitle.title, subtitle.language, subtitle.format);
        self.subtitles.lock().insert(subtitle.id.clone(), subtitle.clone());
        Ok(subtitle)
    }

    async fn update_lines(&self, id: &str, batch: &LineEditBatch) -> Result<RemoteSubtitle, RemoteError> {
        let mut subtitles = self.subtitles.lock();
        let stored = subtitles.get(id).ok_or_else(|| RemoteError::NotFound(id.to_string()))?;

        let content = Self::apply_batch(stored, batch).inspect_err(|e| warn!("Rejected line edits for {}: {}", id, e))?;

        if let Some(note) = &batch.note {
            debug!("Change note for {}: {}", id, note);
        }

        let mut updated = stored.clone();
        updated.content = content;
        subtitles.insert(id.to_string(), updated.clone());
        Ok(updated)
    }

    async fn delete(&self, id: &str) -> Result<(), RemoteError> {
        match self.subtitles.lock().remove(id) {
            Some(_) => Ok(()),
            None => Err(RemoteError::NotFound(id.to_string())),
        }
    }
}
