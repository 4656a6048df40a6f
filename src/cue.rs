/*!
 * Cue store: timed text entries and the ordered collection that owns them.
 *
 * A cue's `index` is a derived sequence position, never its identity. After
 * an import it mirrors file order; after any edit it is the cue's rank in a
 * stable sort by start time. Storage order itself is only changed by an
 * explicit [`CueCollection::sort_by_start_time`].
 */

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::timecode::{self, Notation};

/// Opaque unique identifier of a cue
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CueId(String);

impl CueId {
    /// Generate a fresh identifier
    pub fn generate() -> Self {
        CueId(format!("sub-{}", Uuid::new_v4().simple()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for CueId {
    fn from(value: &str) -> Self {
        CueId(value.to_string())
    }
}

impl From<String> for CueId {
    fn from(value: String) -> Self {
        CueId(value)
    }
}

impl fmt::Display for CueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Single timed text entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cue {
    /// Stable identity
    pub id: CueId,

    /// Start time in seconds
    pub start_time: f64,

    /// End time in seconds
    pub end_time: f64,

    /// Display text, lines separated by `\n`
    pub text: String,

    /// Derived zero-based sequence position
    pub index: usize,
}

impl Cue {
    /// Create a cue with a freshly generated id
    pub fn new(start_time: f64, end_time: f64, text: impl Into<String>) -> Self {
        Self::with_id(CueId::generate(), start_time, end_time, text)
    }

    /// Create a cue with a caller-provided id
    pub fn with_id(id: CueId, start_time: f64, end_time: f64, text: impl Into<String>) -> Self {
        Cue {
            id,
            start_time,
            end_time,
            text: text.into(),
            index: 0,
        }
    }

    /// Display duration in seconds
    pub fn duration(&self) -> f64 {
        self.end_time - self.start_time
    }

    /// Whether this cue's range intersects `other`'s.
    ///
    /// A range starting exactly where another ends does not intersect it.
    pub fn intersects(&self, other: &Cue) -> bool {
        (self.start_time >= other.start_time && self.start_time < other.end_time)
            || (self.end_time > other.start_time && self.end_time <= other.end_time)
            || (self.start_time <= other.start_time && self.end_time >= other.end_time)
    }
}

impl fmt::Display for Cue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "#{} {} --> {} {:?}",
            self.index,
            timecode::encode(self.start_time, Notation::Srt),
            timecode::encode(self.end_time, Notation::Srt),
            self.text
        )
    }
}

/// Ordered collection of cues
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CueCollection {
    cues: Vec<Cue>,
}

impl CueCollection {
    /// Create an empty collection
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a collection in the given order, assigning `index` by position
    pub fn from_cues(cues: Vec<Cue>) -> Self {
        let mut collection = CueCollection { cues };
        collection.reindex_by_position();
        collection
    }

    pub fn len(&self) -> usize {
        self.cues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cues.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Cue> {
        self.cues.iter()
    }

    pub fn as_slice(&self) -> &[Cue] {
        &self.cues
    }

    pub fn into_vec(self) -> Vec<Cue> {
        self.cues
    }

    /// Ids in storage order
    pub fn ids(&self) -> Vec<CueId> {
        self.cues.iter().map(|c| c.id.clone()).collect()
    }

    /// Look up a cue by id
    pub fn get(&self, id: &CueId) -> Option<&Cue> {
        self.cues.iter().find(|c| &c.id == id)
    }

    pub(crate) fn get_mut(&mut self, id: &CueId) -> Option<&mut Cue> {
        self.cues.iter_mut().find(|c| &c.id == id)
    }

    /// Storage position of a cue
    pub fn position(&self, id: &CueId) -> Option<usize> {
        self.cues.iter().position(|c| &c.id == id)
    }

    /// The cue ranked right after `id` in start-time order.
    ///
    /// `None` when `id` is unknown or already the last cue.
    pub fn next_by_start(&self, id: &CueId) -> Option<&Cue> {
        let order = self.start_order();
        let rank = order.iter().position(|&i| &self.cues[i].id == id)?;
        order.get(rank + 1).map(|&i| &self.cues[i])
    }

    /// Append a cue and reindex
    pub fn push(&mut self, cue: Cue) {
        self.cues.push(cue);
        self.reindex();
    }

    /// Insert a cue at a storage position and reindex
    pub fn insert(&mut self, position: usize, cue: Cue) {
        let position = position.min(self.cues.len());
        self.cues.insert(position, cue);
        self.reindex();
    }

    /// Remove a cue by id, reindexing the survivors
    pub fn remove(&mut self, id: &CueId) -> Option<Cue> {
        let position = self.position(id)?;
        let removed = self.cues.remove(position);
        self.reindex();
        Some(removed)
    }

    pub(crate) fn replace_at(&mut self, position: usize, replacement: Vec<Cue>) {
        self.cues.splice(position..=position, replacement);
    }

    pub(crate) fn cues_mut(&mut self) -> &mut [Cue] {
        &mut self.cues
    }

    /// Set every `index` to the cue's rank in a stable start-time sort
    pub fn reindex(&mut self) {
        let order = self.start_order();
        for (rank, &position) in order.iter().enumerate() {
            self.cues[position].index = rank;
        }
    }

    /// Set every `index` to the cue's storage position
    pub fn reindex_by_position(&mut self) {
        for (position, cue) in self.cues.iter_mut().enumerate() {
            cue.index = position;
        }
    }

    /// Reorder storage chronologically (stable) and reindex
    pub fn sort_by_start_time(&mut self) {
        self.cues.sort_by(|a, b| a.start_time.total_cmp(&b.start_time));
        self.reindex_by_position();
    }

    /// Whether any other cue intersects `cue`'s time range
    pub fn overlaps(&self, cue: &Cue) -> bool {
        self.cues.iter().any(|other| other.id != cue.id && cue.intersects(other))
    }

    /// Ids of every cue that overlaps another, in storage order
    pub fn overlapping_ids(&self) -> Vec<CueId> {
        self.cues
            .iter()
            .filter(|cue| self.overlaps(cue))
            .map(|cue| cue.id.clone())
            .collect()
    }

    fn start_order(&self) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.cues.len()).collect();
        order.sort_by(|&a, &b| self.cues[a].start_time.total_cmp(&self.cues[b].start_time));
        order
    }
}

impl<'a> IntoIterator for &'a CueCollection {
    type Item = &'a Cue;
    type IntoIter = std::slice::Iter<'a, Cue>;

    fn into_iter(self) -> Self::IntoIter {
        self.cues.iter()
    }
}

impl fmt::Display for CueCollection {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Cue Collection")?;
        writeln!(f, "Cues: {}", self.cues.len())?;
        Ok(())
    }
}
