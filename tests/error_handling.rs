//! Error handling integration tests.

use std::path::Path;

use framegrab::{GrabError, MediaSession, SessionTable, StreamKind};

/// A short sine tone in an MP4 container, no video.
fn sample_audio_only_path() -> &'static str {
    "tests/fixtures/sample_audio_only.m4a"
}

#[test]
fn open_nonexistent_file() {
    let result = MediaSession::open("this_file_does_not_exist.mp4");
    assert!(result.is_err());

    let error_message = result.unwrap_err().to_string();
    assert!(
        error_message.contains("Failed to open media file"),
        "Error message should mention file open failure: {error_message}",
    );
}

#[test]
fn open_invalid_file() {
    let temporary_directory = tempfile::tempdir().expect("Failed to create temp dir");
    let invalid_file_path = temporary_directory.path().join("invalid.mp4");
    std::fs::write(&invalid_file_path, b"this is not a media file")
        .expect("Failed to write invalid file");

    let result = MediaSession::open(&invalid_file_path);
    assert!(result.is_err(), "Expected error for invalid media file");
}

#[test]
fn audio_only_session_opens_but_has_no_frames() {
    let path = sample_audio_only_path();
    if !Path::new(path).exists() {
        return;
    }

    let mut session = MediaSession::open(path).expect("Audio-only file should open");
    assert!(!session.has_video());
    assert!(session.has_audio());
    assert_eq!(session.dimensions(), None);

    let result = session.next_frame();
    assert!(matches!(result, Err(GrabError::NoVideoStream)));
}

#[test]
fn audio_only_session_still_seeks_on_audio() {
    let path = sample_audio_only_path();
    if !Path::new(path).exists() {
        return;
    }

    let mut session = MediaSession::open(path).expect("Audio-only file should open");
    session
        .seek_by(StreamKind::Audio, 500)
        .expect("Audio seek should succeed");
    assert_eq!(session.position_ms(), 500);

    let result = session.seek_by(StreamKind::Video, 0);
    assert!(matches!(result, Err(GrabError::NoVideoStream)));
}

#[test]
fn session_table_round_trips_real_sessions() {
    let path = "tests/fixtures/sample_2s_25fps.mp4";
    if !Path::new(path).exists() {
        return;
    }

    let mut table = SessionTable::new();
    let handle = table.insert(MediaSession::open(path).expect("Failed to open test video"));

    let frame = table
        .get_mut(handle)
        .expect("Live handle resolves")
        .next_frame()
        .expect("Decode failed")
        .expect("Fixture has frames");
    assert_eq!(frame.width(), 320);

    let session = table.remove(handle).expect("Remove returns the session");
    drop(session);
    assert!(table.get(handle).is_none(), "Handle is stale after removal");
}
