/*!
 * Tests for error types and their classification
 */

use anyhow::{Context, anyhow};

use subedit::errors::{AppError, EditError, RemoteError, SubtitleError};
use subedit::{CueId, SubtitleFormat};

#[test]
fn test_errorMessages_shouldNameTheProblem() {
    assert_eq!(
        SubtitleError::InvalidTimecode("00:61:00,000".to_string()).to_string(),
        "Invalid timecode: 00:61:00,000"
    );
    assert_eq!(
        SubtitleError::UnsupportedInputFormat(SubtitleFormat::Ass).to_string(),
        "Cannot import ASS subtitles, only SRT and VTT are readable"
    );
    assert_eq!(EditError::CueNotFound(CueId::from("sub-1")).to_string(), "Cue not found: sub-1");
    assert_eq!(EditError::EmptyFindString.to_string(), "Find text must not be empty");
}

#[test]
fn test_remoteError_fromSubtitleError_shouldWrap() {
    let error: RemoteError = SubtitleError::UnsupportedFormat("docx".to_string()).into();
    assert!(matches!(error, RemoteError::Subtitle(SubtitleError::UnsupportedFormat(_))));
}

#[test]
fn test_appError_fromIoError_shouldBeFileError() {
    let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
    let error: AppError = io.into();

    assert!(matches!(error, AppError::File(_)));
    assert_eq!(error.exit_code(), 3);
}

#[test]
fn test_classify_withContextWrappedEditError_shouldRecoverIt() {
    let result: anyhow::Result<()> = Err(EditError::InvalidReadingSpeed(0.0)).context("Failed to resize subtitles");

    let error = AppError::classify(result.unwrap_err());

    assert!(matches!(error, AppError::Edit(EditError::InvalidReadingSpeed(_))));
    assert_eq!(error.exit_code(), 5);
}

#[test]
fn test_classify_withSubtitleAndIoErrors_shouldPickSpecificVariant() {
    let subtitle = anyhow::Error::new(SubtitleError::UnsupportedInputFormat(SubtitleFormat::Ass));
    assert!(matches!(AppError::classify(subtitle), AppError::Subtitle(_)));

    let io = anyhow::Error::new(std::io::Error::other("disk full")).context("Failed to write to file");
    let classified = AppError::classify(io);
    assert!(matches!(classified, AppError::File(ref message) if message.contains("disk full")));
}

#[test]
fn test_classify_withPlainMessage_shouldBeUnknown() {
    let error = AppError::classify(anyhow!("something odd"));

    assert!(matches!(error, AppError::Unknown(ref message) if message == "something odd"));
    assert_eq!(error.exit_code(), 1);
    assert_eq!(AppError::Config("bad".to_string()).exit_code(), 2);
}
