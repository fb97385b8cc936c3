//! Seek controller integration tests.
//!
//! Tests require the synthetic fixtures from
//! `tests/fixtures/generate_fixtures.sh` and skip silently when absent.

use std::path::Path;

use framegrab::{GrabError, MediaSession, SeekMode, StreamKind};

fn sample_video_path() -> &'static str {
    "tests/fixtures/sample_2s_25fps.mp4"
}

/// Poll past any stale pre-roll until a real frame surfaces.
fn next_displayable(session: &mut MediaSession) -> Option<framegrab::RgbFrame> {
    loop {
        match session.next_frame().expect("Decode failed") {
            Some(frame) => return Some(frame),
            None if session.is_exhausted() => return None,
            None => {}
        }
    }
}

#[test]
fn seek_sets_position_to_the_requested_target() {
    let path = sample_video_path();
    if !Path::new(path).exists() {
        return;
    }

    let mut session = MediaSession::open(path).expect("Failed to open test video");
    session
        .seek_to(StreamKind::Video, 1000, SeekMode::Backward)
        .expect("Seek failed");

    // The contract: position becomes the request, not the landed keyframe.
    assert_eq!(session.position_ms(), 1000);
}

#[test]
fn frames_after_a_seek_respect_the_staleness_window() {
    let path = sample_video_path();
    if !Path::new(path).exists() {
        return;
    }

    let mut session = MediaSession::open(path).expect("Failed to open test video");
    session
        .seek_to(StreamKind::Video, 1000, SeekMode::Backward)
        .expect("Seek failed");

    let threshold = session.options().stale_threshold_ms;
    let frame = next_displayable(&mut session).expect("Stream has frames past 1000 ms");
    assert!(
        frame.pts_ms() >= 1000 - threshold,
        "First surfaced frame at {} ms is staler than the {threshold} ms window",
        frame.pts_ms()
    );

    // And everything after it too.
    while let Some(frame) = next_displayable(&mut session) {
        assert!(frame.pts_ms() >= 1000 - threshold);
    }
}

#[test]
fn zero_delta_re_snaps_at_the_current_position() {
    let path = sample_video_path();
    if !Path::new(path).exists() {
        return;
    }

    let mut session = MediaSession::open(path).expect("Failed to open test video");
    let frame = next_displayable(&mut session).expect("Fixture has frames");
    let position = frame.pts_ms();
    assert_eq!(session.position_ms(), position);

    session
        .seek_by(StreamKind::Video, 0)
        .expect("Zero-delta seek failed");
    assert_eq!(session.position_ms(), position);
}

#[test]
fn relative_seek_moves_by_the_delta() {
    let path = sample_video_path();
    if !Path::new(path).exists() {
        return;
    }

    let mut session = MediaSession::open(path).expect("Failed to open test video");
    session
        .seek_to(StreamKind::Video, 400, SeekMode::Backward)
        .expect("Seek failed");
    session
        .seek_by(StreamKind::Video, 600)
        .expect("Relative seek failed");
    assert_eq!(session.position_ms(), 1000);
}

#[test]
fn seeking_an_absent_stream_kind_fails_and_leaves_position_alone() {
    let path = sample_video_path();
    if !Path::new(path).exists() {
        return;
    }

    let mut session = MediaSession::open(path).expect("Failed to open test video");
    let frame = next_displayable(&mut session).expect("Fixture has frames");
    let position = frame.pts_ms();

    // The fixture has no audio track.
    let result = session.seek_to(StreamKind::Audio, 500, SeekMode::Backward);
    assert!(matches!(result, Err(GrabError::NoAudioStream)));
    assert_eq!(session.position_ms(), position, "Position must be untouched");
}

#[test]
fn seeking_back_after_end_of_stream_resumes_decoding() {
    let path = sample_video_path();
    if !Path::new(path).exists() {
        return;
    }

    let mut session = MediaSession::open(path).expect("Failed to open test video");
    while session.next_frame().expect("Decode failed").is_some() {}
    assert!(session.is_exhausted());

    session
        .seek_to(StreamKind::Video, 0, SeekMode::Backward)
        .expect("Seek after EOF failed");
    assert!(!session.is_exhausted());
    assert!(next_displayable(&mut session).is_some());
}
