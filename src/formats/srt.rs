use once_cell::sync::Lazy;
use regex::Regex;
use log::debug;

use crate::cue::{Cue, CueCollection};
use crate::timecode::{self, Notation};

// @module: SubRip reader and writer

// @const: One or more blank lines between blocks
static BLOCK_SEPARATOR: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n\s*\n").unwrap());

/// Parse SRT content.
///
/// Each block needs an index line, a time range and at least one text line.
/// Anything else is skipped; the source index number is never reused.
pub fn parse(content: &str) -> CueCollection {
    let normalized = super::normalize_input(content);
    let mut cues = Vec::new();

    for (block_no, block) in BLOCK_SEPARATOR.split(normalized.trim()).enumerate() {
        let lines: Vec<&str> = block.trim().lines().collect();
        if lines.len() < 3 {
            if !block.trim().is_empty() {
                debug!("Skipping SRT block {}: expected at least 3 lines, got {}", block_no + 1, lines.len());
            }
            continue;
        }

        let Some((start, end)) = timecode::parse_time_range(lines[1], Notation::Srt) else {
            debug!("Skipping SRT block {}: no valid time range in '{}'", block_no + 1, lines[1]);
            continue;
        };

        cues.push(Cue::new(start, end, lines[2..].join("\n")));
    }

    debug!("Parsed {} SRT cues", cues.len());
    CueCollection::from_cues(cues)
}

/// Write cues as SRT, numbering blocks by output position
pub fn write(collection: &CueCollection) -> String {
    collection
        .iter()
        .enumerate()
        .map(|(i, cue)| {
            format!(
                "{}\n{} --> {}\n{}\n",
                i + 1,
                timecode::encode(cue.start_time, Notation::Srt),
                timecode::encode(cue.end_time, Notation::Srt),
                cue.text
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
