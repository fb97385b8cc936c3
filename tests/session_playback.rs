//! Sequential playback integration tests.
//!
//! Tests require the synthetic fixtures from
//! `tests/fixtures/generate_fixtures.sh` and skip silently when absent.

use std::path::Path;

use framegrab::MediaSession;

/// 2 seconds of 25 fps 320x240 yuv420p video, no audio.
fn sample_video_path() -> &'static str {
    "tests/fixtures/sample_2s_25fps.mp4"
}

#[test]
fn dimensions_are_fixed_for_the_session_lifetime() {
    let path = sample_video_path();
    if !Path::new(path).exists() {
        return;
    }

    let mut session = MediaSession::open(path).expect("Failed to open test video");
    let dimensions = session.dimensions().expect("Fixture has a video stream");
    assert_eq!(dimensions, (320, 240));

    for _ in 0..10 {
        let _ = session.next_frame().expect("Decode failed");
        assert_eq!(session.dimensions(), Some(dimensions));
    }
}

#[test]
fn every_frame_buffer_is_exactly_packed() {
    let path = sample_video_path();
    if !Path::new(path).exists() {
        return;
    }

    let mut session = MediaSession::open(path).expect("Failed to open test video");
    let (width, height) = session.dimensions().unwrap();
    let expected = (width * height * 3) as usize;

    while let Some(frame) = session.next_frame().expect("Decode failed") {
        assert_eq!(frame.data().len(), expected);
        assert_eq!(frame.width(), width);
        assert_eq!(frame.height(), height);
    }
}

#[test]
fn full_playback_yields_all_frames_in_order() {
    let path = sample_video_path();
    if !Path::new(path).exists() {
        return;
    }

    let mut session = MediaSession::open(path).expect("Failed to open test video");

    let mut timestamps = Vec::new();
    while let Some(frame) = session.next_frame().expect("Decode failed") {
        timestamps.push(frame.pts_ms());
    }

    // 2 s at 25 fps.
    assert_eq!(timestamps.len(), 50, "Expected one result per source frame");
    assert!(
        timestamps.windows(2).all(|pair| pair[0] <= pair[1]),
        "Presentation times must be non-decreasing: {timestamps:?}"
    );
}

#[test]
fn exhausted_stream_keeps_returning_none() {
    let path = sample_video_path();
    if !Path::new(path).exists() {
        return;
    }

    let mut session = MediaSession::open(path).expect("Failed to open test video");
    while session.next_frame().expect("Decode failed").is_some() {}
    assert!(session.is_exhausted());

    for _ in 0..5 {
        let frame = session.next_frame().expect("Past-EOF call must not error");
        assert!(frame.is_none());
    }
}

#[test]
fn metadata_reports_the_synthetic_stream() {
    let path = sample_video_path();
    if !Path::new(path).exists() {
        return;
    }

    let session = MediaSession::open(path).expect("Failed to open test video");
    let metadata = session.metadata();

    let video = metadata.video.as_ref().expect("Fixture has video");
    assert_eq!(video.width, 320);
    assert_eq!(video.height, 240);
    assert!((video.frames_per_second - 25.0).abs() < 0.01);

    assert!(session.has_video());
    assert!(!session.has_audio(), "Fixture is encoded without audio");
}
