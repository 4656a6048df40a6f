/*!
 * Edit operations over a cue collection.
 *
 * Every operation takes the collection by reference and returns a new,
 * reindexed collection. The input is never touched, so a failed operation
 * leaves the caller's state exactly as it was.
 */

use std::collections::HashSet;

use log::debug;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::cue::{Cue, CueCollection, CueId};
use crate::errors::EditError;

/// Set of cue ids targeted by a bulk operation
pub type SelectionSet = HashSet<CueId>;

/// How bulk find/replace interprets the find text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReplaceMode {
    /// Plain substring match
    #[default]
    Literal,
    /// Regular expression (`regex` crate syntax); `$1`-style group
    /// references are expanded in the replacement
    Pattern,
}

/// Split a cue in two at `split_time`.
///
/// Both halves get new ids and the full original text. `split_time` must lie
/// strictly inside the cue.
pub fn split(collection: &CueCollection, id: &CueId, split_time: f64) -> Result<CueCollection, EditError> {
    let position = collection.position(id).ok_or_else(|| EditError::CueNotFound(id.clone()))?;
    let cue = &collection.as_slice()[position];

    if !(cue.start_time < split_time && split_time < cue.end_time) {
        return Err(EditError::InvalidOperation(format!(
            "split time {}s is outside cue {} ({}s - {}s)",
            split_time, id, cue.start_time, cue.end_time
        )));
    }

    let first = Cue::new(cue.start_time, split_time, cue.text.clone());
    let second = Cue::new(split_time, cue.end_time, cue.text.clone());
    debug!("Split cue {} at {}s into {} and {}", id, split_time, first.id, second.id);

    let mut result = collection.clone();
    result.replace_at(position, vec![first, second]);
    result.reindex();
    Ok(result)
}

/// Merge two cues into one spanning `[first.start, second.end)`.
///
/// The merged cue keeps `first`'s id and takes the earlier storage position
/// of the two. Adjacency is not checked.
pub fn merge(collection: &CueCollection, first_id: &CueId, second_id: &CueId) -> Result<CueCollection, EditError> {
    if first_id == second_id {
        return Err(EditError::InvalidOperation(format!("cannot merge cue {} with itself", first_id)));
    }

    let first_pos = collection.position(first_id).ok_or_else(|| EditError::CueNotFound(first_id.clone()))?;
    let second_pos = collection.position(second_id).ok_or_else(|| EditError::CueNotFound(second_id.clone()))?;

    let first = &collection.as_slice()[first_pos];
    let second = &collection.as_slice()[second_pos];
    let merged = Cue::with_id(
        first.id.clone(),
        first.start_time,
        second.end_time,
        format!("{}\n{}", first.text, second.text),
    );

    let mut cues = collection.clone().into_vec();
    cues.remove(first_pos.max(second_pos));
    cues[first_pos.min(second_pos)] = merged;

    let mut result = CueCollection::from_cues(cues);
    result.reindex();
    debug!("Merged cue {} into {}", second_id, first_id);
    Ok(result)
}

/// Remove a cue
pub fn delete(collection: &CueCollection, id: &CueId) -> Result<CueCollection, EditError> {
    let mut result = collection.clone();
    result.remove(id).ok_or_else(|| EditError::CueNotFound(id.clone()))?;
    Ok(result)
}

/// Replace a cue's times and text, keeping its id
pub fn update(
    collection: &CueCollection,
    id: &CueId,
    start_time: f64,
    end_time: f64,
    text: &str,
) -> Result<CueCollection, EditError> {
    check_times(start_time, end_time)?;

    let mut result = collection.clone();
    let cue = result.get_mut(id).ok_or_else(|| EditError::CueNotFound(id.clone()))?;
    cue.start_time = start_time;
    cue.end_time = end_time;
    cue.text = text.to_string();
    result.reindex();
    Ok(result)
}

/// Append a new cue, returning the collection and the new cue's id
pub fn insert(
    collection: &CueCollection,
    start_time: f64,
    end_time: f64,
    text: &str,
) -> Result<(CueCollection, CueId), EditError> {
    check_times(start_time, end_time)?;

    let cue = Cue::new(start_time, end_time, text);
    let id = cue.id.clone();
    let mut result = collection.clone();
    result.push(cue);
    Ok((result, id))
}

/// Shift targeted cues by `offset` seconds. Start times are clamped at zero;
/// end times are not.
pub fn bulk_time_offset(
    collection: &CueCollection,
    ids: &SelectionSet,
    offset: f64,
) -> Result<CueCollection, EditError> {
    if !offset.is_finite() {
        return Err(EditError::InvalidOffset(offset));
    }

    let mut result = collection.clone();
    let mut shifted = 0;
    for cue in result.cues_mut().iter_mut().filter(|c| ids.contains(&c.id)) {
        cue.start_time = (cue.start_time + offset).max(0.0);
        cue.end_time += offset;
        shifted += 1;
    }
    result.reindex();

    debug!("Shifted {} cues by {}s", shifted, offset);
    Ok(result)
}

/// Replace every match of `find` in targeted cues.
///
/// Returns the new collection and the number of cues that contained a match.
pub fn bulk_find_replace(
    collection: &CueCollection,
    ids: &SelectionSet,
    find: &str,
    replace: &str,
    mode: ReplaceMode,
) -> Result<(CueCollection, usize), EditError> {
    if find.is_empty() {
        return Err(EditError::EmptyFindString);
    }

    let pattern = match mode {
        ReplaceMode::Literal => None,
        ReplaceMode::Pattern => Some(Regex::new(find).map_err(|e| EditError::InvalidPattern(e.to_string()))?),
    };

    let mut result = collection.clone();
    let mut modified = 0;
    for cue in result.cues_mut().iter_mut().filter(|c| ids.contains(&c.id)) {
        let replaced = match &pattern {
            None if cue.text.contains(find) => Some(cue.text.replace(find, replace)),
            Some(regex) if regex.is_match(&cue.text) => Some(regex.replace_all(&cue.text, replace).into_owned()),
            _ => None,
        };

        if let Some(text) = replaced {
            cue.text = text;
            modified += 1;
        }
    }
    result.reindex();

    debug!("Find/replace modified {} of {} targeted cues", modified, ids.len());
    Ok((result, modified))
}

/// Recompute targeted cues' end times from their text length:
/// `end = start + chars / chars_per_second`.
pub fn bulk_reading_speed(
    collection: &CueCollection,
    ids: &SelectionSet,
    chars_per_second: f64,
) -> Result<CueCollection, EditError> {
    if !chars_per_second.is_finite() || chars_per_second <= 0.0 {
        return Err(EditError::InvalidReadingSpeed(chars_per_second));
    }

    let mut result = collection.clone();
    for cue in result.cues_mut().iter_mut().filter(|c| ids.contains(&c.id)) {
        let chars = cue.text.chars().count() as f64;
        cue.end_time = cue.start_time + chars / chars_per_second;
    }
    result.reindex();
    Ok(result)
}

/// Whether any other cue in the collection overlaps `cue`
pub fn overlaps(cue: &Cue, collection: &CueCollection) -> bool {
    collection.overlaps(cue)
}

/// Ids of every overlapping cue, in storage order
pub fn overlapping_ids(collection: &CueCollection) -> Vec<CueId> {
    collection.overlapping_ids()
}

fn check_times(start_time: f64, end_time: f64) -> Result<(), EditError> {
    if !start_time.is_finite() || !end_time.is_finite() || start_time < 0.0 || end_time < start_time {
        return Err(EditError::InvalidOperation(format!(
            "invalid cue timing {}s - {}s",
            start_time, end_time
        )));
    }
    Ok(())
}
