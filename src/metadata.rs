//! Stream and container metadata.
//!
//! Metadata is extracted once when a [`MediaSession`](crate::MediaSession)
//! is opened and cached for the session's lifetime; querying it never
//! triggers additional decoding.

use std::time::Duration;

/// Metadata for the selected video stream.
#[derive(Debug, Clone, PartialEq)]
pub struct VideoMetadata {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// Average frames per second, `0.0` if the container does not report one.
    pub frames_per_second: f64,
    /// Codec name (e.g. `h264`), `unknown` if unavailable.
    pub codec: String,
}

/// Metadata for the selected audio stream.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioMetadata {
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Number of channels.
    pub channels: u16,
    /// Codec name (e.g. `aac`), `unknown` if unavailable.
    pub codec: String,
}

/// Cached metadata for an open media session.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionMetadata {
    /// Video stream metadata, if the session has a usable video stream.
    pub video: Option<VideoMetadata>,
    /// Audio stream metadata, if the container has an audio stream.
    pub audio: Option<AudioMetadata>,
    /// Container-level duration, [`Duration::ZERO`] if unreported.
    pub duration: Duration,
    /// Container format name (e.g. `mov,mp4,m4a,3gp,3g2,mj2`).
    pub format: String,
}
