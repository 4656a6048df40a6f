use crate::cue::CueCollection;
use crate::timecode::{self, Notation};

// @module: Advanced SubStation Alpha writer

// @const: Script info and the single default style
const PREAMBLE: &str = "[Script Info]
Title: Subtitle Export
ScriptType: v4.00+

[V4+ Styles]
Format: Name, Fontname, Fontsize, PrimaryColour, SecondaryColour, OutlineColour, BackColour, Bold, Italic, Underline, StrikeOut, ScaleX, ScaleY, Spacing, Angle, BorderStyle, Outline, Shadow, Alignment, MarginL, MarginR, MarginV, Encoding
Style: Default,Arial,20,&H00FFFFFF,&H000000FF,&H00000000,&H00000000,0,0,0,0,100,100,0,0,1,2,0,2,10,10,10,1

[Events]
Format: Layer, Start, End, Style, Name, MarginL, MarginR, MarginV, Effect, Text
";

/// Write cues as an ASS script with one `Dialogue:` line per cue
pub fn write(collection: &CueCollection) -> String {
    let events = collection
        .iter()
        .map(|cue| {
            format!(
                "Dialogue: 0,{},{},Default,,0,0,0,,{}",
                timecode::encode(cue.start_time, Notation::Ass),
                timecode::encode(cue.end_time, Notation::Ass),
                escape_text(&cue.text)
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!("{}{}", PREAMBLE, events)
}

// ASS has no literal newlines inside an event
fn escape_text(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\n', "\\N")
}
