use log::debug;

use crate::cue::{Cue, CueCollection};
use crate::timecode::{self, Notation};

// @module: WebVTT reader and writer

const HEADER: &str = "WEBVTT\n\n";

// @struct: Cue being accumulated by the line scanner
struct PendingCue {
    start: f64,
    end: f64,
    lines: Vec<String>,
}

/// Parse WebVTT content in a single pass.
///
/// A time-range line opens a cue; the following non-blank lines are its text
/// up to a blank line or the next range. A `-->` inside text is just text. Lines outside a cue (the signature,
/// NOTE/STYLE/REGION blocks, cue identifiers) are ignored, and cues without
/// text are dropped.
pub fn parse(content: &str) -> CueCollection {
    let normalized = super::normalize_input(content);
    let mut cues = Vec::new();
    let mut pending: Option<PendingCue> = None;

    for raw_line in normalized.lines() {
        let line = raw_line.trim();

        if line.is_empty() {
            flush(&mut pending, &mut cues);
            continue;
        }

        if let Some((start, end)) = timecode::parse_time_range(line, Notation::Vtt) {
            flush(&mut pending, &mut cues);
            pending = Some(PendingCue { start, end, lines: Vec::new() });
            continue;
        }

        if timecode::is_time_range(line, Notation::Vtt) {
            flush(&mut pending, &mut cues);
            debug!("Skipping VTT cue with invalid timing '{}'", line);
            continue;
        }

        if let Some(cue) = pending.as_mut() {
            cue.lines.push(line.to_string());
        }
    }
    flush(&mut pending, &mut cues);

    debug!("Parsed {} VTT cues", cues.len());
    CueCollection::from_cues(cues)
}

fn flush(pending: &mut Option<PendingCue>, cues: &mut Vec<Cue>) {
    if let Some(cue) = pending.take() {
        if cue.lines.is_empty() {
            debug!("Dropping VTT cue at {}s without text", cue.start);
        } else {
            cues.push(Cue::new(cue.start, cue.end, cue.lines.join("\n")));
        }
    }
}

/// Write cues as WebVTT
pub fn write(collection: &CueCollection) -> String {
    let body = collection
        .iter()
        .map(|cue| {
            format!(
                "{} --> {}\n{}\n",
                timecode::encode(cue.start_time, Notation::Vtt),
                timecode::encode(cue.end_time, Notation::Vtt),
                cue.text
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!("{}{}", HEADER, body)
}
