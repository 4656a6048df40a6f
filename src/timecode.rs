use once_cell::sync::Lazy;
use regex::Regex;
use log::debug;

use crate::errors::SubtitleError;

// @module: Time codec for subtitle notations

// @const: SRT time range regex (comma millisecond separator)
static SRT_RANGE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\d{2,}:\d{2}:\d{2},\d{3})\s*-->\s*(\d{2,}:\d{2}:\d{2},\d{3})").unwrap()
});

// @const: VTT time range regex (period millisecond separator)
static VTT_RANGE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\d{2,}:\d{2}:\d{2}\.\d{3})\s*-->\s*(\d{2,}:\d{2}:\d{2}\.\d{3})").unwrap()
});

/// Textual time-code notation used by a subtitle format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notation {
    /// `HH:MM:SS,mmm`
    Srt,
    /// `HH:MM:SS.mmm`
    Vtt,
    /// `H:MM:SS.cc`
    Ass,
}

/// Encode seconds in the given notation.
///
/// The value is snapped to the nearest millisecond first; ASS then truncates
/// that to centiseconds. Negative and non-finite input encodes as zero.
pub fn encode(seconds: f64, notation: Notation) -> String {
    let total_ms = seconds_to_ms(seconds);

    let hours = total_ms / 3_600_000;
    let minutes = (total_ms % 3_600_000) / 60_000;
    let secs = (total_ms % 60_000) / 1_000;
    let millis = total_ms % 1_000;

    match notation {
        Notation::Srt => format!("{:02}:{:02}:{:02},{:03}", hours, minutes, secs, millis),
        Notation::Vtt => format!("{:02}:{:02}:{:02}.{:03}", hours, minutes, secs, millis),
        Notation::Ass => format!("{}:{:02}:{:02}.{:02}", hours, minutes, secs, millis / 10),
    }
}

/// Decode an `H:MM:SS[,.]fff` time code into seconds.
///
/// Either separator is accepted before the fraction. Fractions longer than
/// three digits are truncated to milliseconds.
pub fn decode(timecode: &str) -> Result<f64, SubtitleError> {
    let trimmed = timecode.trim();
    let invalid = || SubtitleError::InvalidTimecode(trimmed.to_string());

    let parts: Vec<&str> = trimmed.split(':').collect();
    if parts.len() != 3 {
        return Err(invalid());
    }

    let (whole, fraction) = match parts[2].split_once([',', '.']) {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (parts[2], None),
    };

    let hours = parse_digits(parts[0]).ok_or_else(invalid)?;
    let minutes = parse_digits(parts[1]).ok_or_else(invalid)?;
    let seconds = parse_digits(whole).ok_or_else(invalid)?;

    if minutes >= 60 || seconds >= 60 {
        return Err(invalid());
    }

    let millis = match fraction {
        Some(digits) => {
            let mut padded: String = digits.chars().take(3).collect();
            while padded.len() < 3 {
                padded.push('0');
            }
            parse_digits(&padded).filter(|_| !digits.is_empty()).ok_or_else(invalid)?
        }
        None => 0,
    };

    let total_ms = hours
        .checked_mul(60)
        .and_then(|m| m.checked_add(minutes))
        .and_then(|m| m.checked_mul(60))
        .and_then(|s| s.checked_add(seconds))
        .and_then(|s| s.checked_mul(1_000))
        .and_then(|ms| ms.checked_add(millis))
        .ok_or_else(invalid)?;
    Ok(ms_to_seconds(total_ms))
}

/// Decode a time code, falling back to zero when it is malformed.
/// Parsers use [`decode`] and drop the cue instead.
pub fn decode_lenient(timecode: &str) -> f64 {
    decode(timecode).unwrap_or(0.0)
}

/// Convert seconds to whole milliseconds, `round(seconds * 1000)`
pub fn seconds_to_ms(seconds: f64) -> u64 {
    if !seconds.is_finite() || seconds <= 0.0 {
        return 0;
    }
    (seconds * 1000.0).round() as u64
}

/// Convert whole milliseconds back to seconds
pub fn ms_to_seconds(ms: u64) -> f64 {
    ms as f64 / 1000.0
}

/// Find a `start --> end` time range in a line using the separator of the
/// given notation. Trailing cue settings are ignored.
///
/// Returns `None` when the line has no range or either side fails strict
/// decoding.
pub fn parse_time_range(line: &str, notation: Notation) -> Option<(f64, f64)> {
    let caps = range_regex(notation)?.captures(line)?;
    let start = decode(&caps[1]);
    let end = decode(&caps[2]);

    match (start, end) {
        (Ok(start), Ok(end)) => Some((start, end)),
        (Err(e), _) | (_, Err(e)) => {
            debug!("Discarding time range '{}': {}", line.trim(), e);
            None
        }
    }
}

/// Whether a line has the shape of a time range, whether or not its fields
/// decode
pub fn is_time_range(line: &str, notation: Notation) -> bool {
    range_regex(notation).is_some_and(|regex| regex.is_match(line))
}

fn range_regex(notation: Notation) -> Option<&'static Regex> {
    match notation {
        Notation::Srt => Some(&*SRT_RANGE_REGEX),
        Notation::Vtt => Some(&*VTT_RANGE_REGEX),
        Notation::Ass => None,
    }
}

fn parse_digits(field: &str) -> Option<u64> {
    if field.is_empty() || !field.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    field.parse().ok()
}
