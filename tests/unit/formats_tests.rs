/*!
 * Tests for subtitle parsing and serialization through the public API
 */

use subedit::formats::{self, SubtitleFormat};
use subedit::timecode::{self, Notation};
use subedit::{Cue, CueCollection, SubtitleError};
use crate::common;

/// The reference two-cue SRT sample parses to exact values
#[test]
fn test_parse_srt_withReferenceSample_shouldYieldExactCues() {
    let cues = formats::parse(common::SAMPLE_SRT, SubtitleFormat::Srt).unwrap();

    assert_eq!(cues.len(), 2);
    let first = &cues.as_slice()[0];
    assert_eq!((first.start_time, first.end_time, first.text.as_str(), first.index), (1.0, 3.5, "Hello world", 0));
    let second = &cues.as_slice()[1];
    assert_eq!((second.start_time, second.end_time, second.text.as_str(), second.index), (4.0, 6.0, "Second line", 1));
}

/// A single cue serializes to the exact VTT text
#[test]
fn test_serialize_vtt_withSingleCue_shouldMatchExactly() {
    let collection = CueCollection::from_cues(vec![Cue::new(0.0, 1.5, "Hi")]);

    assert_eq!(
        formats::serialize(&collection, SubtitleFormat::Vtt),
        "WEBVTT\n\n00:00:00.000 --> 00:00:01.500\nHi\n"
    );
}

/// SRT round trip keeps count, text and millisecond timing
#[test]
fn test_srt_roundTrip_shouldPreserveCuesToTheMillisecond() {
    let collection = CueCollection::from_cues(vec![
        Cue::new(0.0, 0.999, "Zero"),
        Cue::new(1.001, 2.5, "Two lines\nof text"),
        Cue::new(59.75, 61.125, "Across a minute"),
        Cue::new(3599.5, 3723.456, "Across an hour"),
    ]);

    let reparsed = formats::parse(&formats::serialize(&collection, SubtitleFormat::Srt), SubtitleFormat::Srt).unwrap();

    assert_eq!(reparsed.len(), collection.len());
    for (original, parsed) in collection.iter().zip(reparsed.iter()) {
        assert_eq!(parsed.text, original.text);
        assert_eq!(timecode::seconds_to_ms(parsed.start_time), timecode::seconds_to_ms(original.start_time));
        assert_eq!(timecode::seconds_to_ms(parsed.end_time), timecode::seconds_to_ms(original.end_time));
    }
}

/// Encoding then decoding millisecond-aligned values is lossless for SRT and VTT
#[test]
fn test_timecode_inverse_forSrtAndVtt_shouldBeExact() {
    for ms in [0u64, 1, 999, 1_000, 61_001, 3_599_999, 3_600_000, 86_399_999] {
        let seconds = timecode::ms_to_seconds(ms);
        for notation in [Notation::Srt, Notation::Vtt] {
            let decoded = timecode::decode(&timecode::encode(seconds, notation)).unwrap();
            assert_eq!(timecode::seconds_to_ms(decoded), ms, "{:?} {}", notation, ms);
        }
    }
}

/// ASS notation truncates to centiseconds
#[test]
fn test_timecode_ass_shouldTruncateToCentiseconds() {
    assert_eq!(timecode::encode(1.239, Notation::Ass), "0:00:01.23");
    assert_eq!(timecode::encode(3661.999, Notation::Ass), "1:01:01.99");
}

/// Malformed blocks are skipped, not fatal
#[test]
fn test_parse_srt_withMalformedBlocks_shouldSkipThem() {
    let content = "1\n00:00:01,000 --> 00:00:02,000\nKept\n\n\
                   2\nnot a time range\nDropped\n\n\
                   3\n00:00:03,000 --> 00:00:04,000\n\n\
                   4\n00:00:05,000 --> 00:00:06,000\nAlso kept\n";

    let cues = formats::parse(content, SubtitleFormat::Srt).unwrap();
    let texts: Vec<&str> = cues.iter().map(|c| c.text.as_str()).collect();

    assert_eq!(texts, vec!["Kept", "Also kept"]);
    assert_eq!(cues.as_slice()[1].index, 1);
}

/// Windows line endings and a byte-order mark are accepted
#[test]
fn test_parse_withCrlfAndBom_shouldMatchUnixInput() {
    let windows = format!("\u{feff}{}", common::SAMPLE_SRT.replace('\n', "\r\n"));

    let from_windows = formats::parse(&windows, SubtitleFormat::Srt).unwrap();
    let from_unix = formats::parse(common::SAMPLE_SRT, SubtitleFormat::Srt).unwrap();

    assert_eq!(from_windows.len(), 2);
    for (a, b) in from_windows.iter().zip(from_unix.iter()) {
        assert_eq!((a.start_time, a.end_time, &a.text), (b.start_time, b.end_time, &b.text));
    }
}

/// VTT metadata blocks and cue identifiers are ignored
#[test]
fn test_parse_vtt_withNotesAndIdentifiers_shouldKeepOnlyCueText() {
    let content = "WEBVTT - with title\n\nNOTE this is a comment\nspanning lines\n\nintro\n00:00:01.000 --> 00:00:02.000 align:start\nFirst\nline two\n\n00:00:03.000 --> 00:00:04.000\nSecond\n";

    let cues = formats::parse(content, SubtitleFormat::Vtt).unwrap();

    assert_eq!(cues.len(), 2);
    assert_eq!(cues.as_slice()[0].text, "First\nline two");
    assert_eq!(cues.as_slice()[1].start_time, 3.0);
}

/// ASS is export-only
#[test]
fn test_parse_ass_shouldBeRejected() {
    assert_eq!(
        formats::parse("[Script Info]\n", SubtitleFormat::Ass),
        Err(SubtitleError::UnsupportedInputFormat(SubtitleFormat::Ass))
    );
}

/// Export attaches filename and MIME type
#[test]
fn test_export_shouldDescribeOutput() {
    let collection = formats::parse(common::SAMPLE_SRT, SubtitleFormat::Srt).unwrap();

    let exported = formats::export(&collection, SubtitleFormat::Ass, "episode-01");

    assert_eq!(exported.filename, "episode-01.ass");
    assert_eq!(exported.mime_type, "text/x-ssa");
    assert_eq!(exported.format, SubtitleFormat::Ass);
    assert!(exported.content.contains("Dialogue: 0,0:00:01.00,0:00:03.50,Default,,0,0,0,,Hello world"));
}

/// VTT content converts to SRT with renumbered blocks
#[test]
fn test_vttToSrt_shouldProduceReferenceSrt() {
    let cues = formats::parse(common::SAMPLE_VTT, SubtitleFormat::Vtt).unwrap();
    assert_eq!(formats::serialize(&cues, SubtitleFormat::Srt), common::SAMPLE_SRT);
}
