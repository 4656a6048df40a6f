use serde::{Deserialize, Serialize};

use crate::cue::{Cue, CueCollection};
use crate::timecode;

// @module: Line-edit payloads for the persisted-subtitle service

/// One edited line: 1-based sequential index, millisecond times
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineEdit {
    pub index: usize,
    pub start_ms: u64,
    pub end_ms: u64,
    pub text: String,
}

/// Line edits submitted together with a change note
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LineEditBatch {
    pub edits: Vec<LineEdit>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl LineEditBatch {
    /// Build a batch covering every cue of a collection
    pub fn from_collection(collection: &CueCollection, note: Option<String>) -> Self {
        Self {
            edits: to_line_edits(collection),
            note: note.filter(|n| !n.trim().is_empty()),
        }
    }
}

/// Convert a collection to line edits in storage order.
///
/// Times use `round(seconds * 1000)`; negative times become zero.
pub fn to_line_edits(collection: &CueCollection) -> Vec<LineEdit> {
    collection
        .iter()
        .enumerate()
        .map(|(position, cue)| LineEdit {
            index: position + 1,
            start_ms: timecode::seconds_to_ms(cue.start_time),
            end_ms: timecode::seconds_to_ms(cue.end_time),
            text: cue.text.clone(),
        })
        .collect()
}

/// Build a collection from line edits, ordered by their sequential index
pub fn from_line_edits(edits: &[LineEdit]) -> CueCollection {
    let mut ordered: Vec<&LineEdit> = edits.iter().collect();
    ordered.sort_by_key(|edit| edit.index);

    let cues = ordered
        .into_iter()
        .map(|edit| {
            Cue::new(
                timecode::ms_to_seconds(edit.start_ms),
                timecode::ms_to_seconds(edit.end_ms),
                edit.text.clone(),
            )
        })
        .collect();

    CueCollection::from_cues(cues)
}
