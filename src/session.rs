/*!
 * Editing session: the caller-owned document that bundles a cue collection
 * with its selection set.
 *
 * Each edit method runs the matching pure operation from [`crate::editing`]
 * and only swaps in the result when it succeeds.
 */

use log::{debug, info};

use crate::cue::{Cue, CueCollection, CueId};
use crate::editing::{self, ReplaceMode, SelectionSet};
use crate::errors::{EditError, SubtitleError};
use crate::formats::{self, ExportedSubtitle, SubtitleFormat};

/// A subtitle document being edited
#[derive(Debug, Clone, Default)]
pub struct EditSession {
    /// Display name, also the default export file stem
    pub name: String,

    /// Format the cues were imported from, if any
    pub source_format: Option<SubtitleFormat>,

    cues: CueCollection,
    selection: SelectionSet,
}

impl EditSession {
    /// Create an empty session
    pub fn new(name: impl Into<String>) -> Self {
        EditSession {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Create a session from imported content
    pub fn load(name: impl Into<String>, content: &str, format: SubtitleFormat) -> Result<Self, SubtitleError> {
        let cues = formats::parse(content, format)?;
        let session = EditSession {
            name: name.into(),
            source_format: Some(format),
            cues,
            selection: SelectionSet::new(),
        };
        info!("Loaded {} subtitles into '{}'", session.cues.len(), session.name);
        Ok(session)
    }

    /// Create a session around an existing collection
    pub fn from_collection(name: impl Into<String>, cues: CueCollection) -> Self {
        EditSession {
            name: name.into(),
            source_format: None,
            cues,
            selection: SelectionSet::new(),
        }
    }

    pub fn cues(&self) -> &CueCollection {
        &self.cues
    }

    pub fn into_cues(self) -> CueCollection {
        self.cues
    }

    pub fn cue(&self, id: &CueId) -> Option<&Cue> {
        self.cues.get(id)
    }

    // Selection

    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    pub fn selected_count(&self) -> usize {
        self.selection.len()
    }

    pub fn is_selected(&self, id: &CueId) -> bool {
        self.selection.contains(id)
    }

    /// Single-select: the selection becomes exactly `id`.
    /// Returns false (and leaves the selection alone) if the cue is unknown.
    pub fn select(&mut self, id: &CueId) -> bool {
        if self.cues.get(id).is_none() {
            return false;
        }
        self.selection.clear();
        self.selection.insert(id.clone());
        true
    }

    /// Multi-select: add `id` if absent, remove it if present
    pub fn toggle_selection(&mut self, id: &CueId) -> bool {
        if self.selection.remove(id) {
            return true;
        }
        if self.cues.get(id).is_none() {
            return false;
        }
        self.selection.insert(id.clone());
        true
    }

    pub fn select_all(&mut self) {
        self.selection = self.cues.ids().into_iter().collect();
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    // Structural edits

    /// Split a cue; returns the ids of the two halves
    pub fn split_cue(&mut self, id: &CueId, split_time: f64) -> Result<(CueId, CueId), EditError> {
        let result = editing::split(&self.cues, id, split_time)?;
        let position = self.cues.position(id).ok_or_else(|| EditError::CueNotFound(id.clone()))?;
        let first = result.as_slice()[position].id.clone();
        let second = result.as_slice()[position + 1].id.clone();

        self.cues = result;
        self.selection.remove(id);
        Ok((first, second))
    }

    /// Merge two cues
    pub fn merge_cues(&mut self, first: &CueId, second: &CueId) -> Result<(), EditError> {
        self.cues = editing::merge(&self.cues, first, second)?;
        self.selection.remove(second);
        Ok(())
    }

    /// Merge a cue with the one that follows it chronologically.
    ///
    /// "Next" is the next cue by start time (ties in storage order), not the
    /// next storage slot, so out-of-order input merges with the cue shown
    /// after it on the timeline. `Ok(false)` means there is no following cue,
    /// which is not an error.
    pub fn merge_with_next(&mut self, id: &CueId) -> Result<bool, EditError> {
        if self.cues.get(id).is_none() {
            return Err(EditError::CueNotFound(id.clone()));
        }
        let Some(next) = self.cues.next_by_start(id).map(|c| c.id.clone()) else {
            debug!("No cue after {} to merge with", id);
            return Ok(false);
        };
        self.merge_cues(id, &next)?;
        Ok(true)
    }

    /// Delete a cue
    pub fn delete_cue(&mut self, id: &CueId) -> Result<(), EditError> {
        self.cues = editing::delete(&self.cues, id)?;
        self.selection.remove(id);
        Ok(())
    }

    /// Save new times and text for a cue
    pub fn update_cue(&mut self, id: &CueId, start_time: f64, end_time: f64, text: &str) -> Result<(), EditError> {
        self.cues = editing::update(&self.cues, id, start_time, end_time, text)?;
        Ok(())
    }

    /// Append a new cue and return its id
    pub fn add_cue(&mut self, start_time: f64, end_time: f64, text: &str) -> Result<CueId, EditError> {
        let (cues, id) = editing::insert(&self.cues, start_time, end_time, text)?;
        self.cues = cues;
        Ok(id)
    }

    // Bulk edits over the current selection

    /// Shift selected cues by `offset` seconds; returns how many cues moved
    pub fn apply_offset(&mut self, offset: f64) -> Result<usize, EditError> {
        self.cues = editing::bulk_time_offset(&self.cues, &self.selection, offset)?;
        Ok(self.selected_cue_count())
    }

    /// Find/replace in selected cues; returns how many cues changed
    pub fn find_replace(&mut self, find: &str, replace: &str, mode: ReplaceMode) -> Result<usize, EditError> {
        let (cues, modified) = editing::bulk_find_replace(&self.cues, &self.selection, find, replace, mode)?;
        self.cues = cues;
        Ok(modified)
    }

    /// Resize selected cues to a reading speed; returns how many were resized
    pub fn apply_reading_speed(&mut self, chars_per_second: f64) -> Result<usize, EditError> {
        self.cues = editing::bulk_reading_speed(&self.cues, &self.selection, chars_per_second)?;
        Ok(self.selected_cue_count())
    }

    fn selected_cue_count(&self) -> usize {
        self.cues.iter().filter(|cue| self.selection.contains(&cue.id)).count()
    }

    /// Reorder the cues chronologically
    pub fn sort_by_start_time(&mut self) {
        self.cues.sort_by_start_time();
    }

    // Queries and export

    /// Whether a cue overlaps any other cue
    pub fn has_overlap(&self, id: &CueId) -> bool {
        self.cues.get(id).is_some_and(|cue| editing::overlaps(cue, &self.cues))
    }

    /// Every cue that overlaps another, in storage order
    pub fn overlapping(&self) -> Vec<&Cue> {
        self.cues.iter().filter(|cue| editing::overlaps(cue, &self.cues)).collect()
    }

    /// Serialize the cues; `stem` defaults to the session name
    pub fn export(&self, format: SubtitleFormat, stem: Option<&str>) -> ExportedSubtitle {
        let stem = stem.unwrap_or(&self.name);
        formats::export(&self.cues, format, stem)
    }
}
