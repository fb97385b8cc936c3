//! Error types for the `framegrab` crate.
//!
//! This module defines [`GrabError`], the unified error type returned by all
//! fallible operations in the crate. Variants carry enough context (paths,
//! timestamps, upstream messages) to diagnose a failure at the call site.

use std::{io::Error as IoError, path::PathBuf};

use ffmpeg_next::Error as FfmpegError;
use image::ImageError;
use thiserror::Error;

/// The unified error type for all `framegrab` operations.
///
/// Every public method that can fail returns `Result<T, GrabError>`. Note
/// that per-packet decode failures are *not* surfaced here: the decode loop
/// logs them and skips the offending packet, so a single corrupt packet never
/// aborts a session.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum GrabError {
    /// The media file could not be opened or its streams could not be probed.
    #[error("Failed to open media file at {path}: {reason}")]
    FileOpen {
        /// Path that was passed to [`crate::MediaSession::open`].
        path: PathBuf,
        /// Underlying reason the open failed.
        reason: String,
    },

    /// The container holds neither a usable video stream nor an audio stream.
    #[error("No usable video or audio stream found in file")]
    NoStreamFound,

    /// The session has no video stream.
    #[error("No video stream found in file")]
    NoVideoStream,

    /// The session has no audio stream.
    #[error("No audio stream found in file")]
    NoAudioStream,

    /// The decoder produced a frame in a layout the pixel converter does not
    /// handle.
    #[error("Unsupported pixel format {0} (only 8-bit planar 4:2:0 is supported)")]
    UnsupportedPixelFormat(String),

    /// A container-level seek was rejected. The session's playback position
    /// is left unchanged.
    #[error("Seek to {target_ms} ms rejected: {reason}")]
    SeekRejected {
        /// The requested target position in milliseconds.
        target_ms: i64,
        /// Underlying reason the seek failed.
        reason: String,
    },

    /// An error originating from the FFmpeg libraries.
    #[error("FFmpeg error: {0}")]
    Ffmpeg(String),

    /// An I/O error occurred while reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] IoError),

    /// An error from the `image` crate while encoding a frame to disk.
    #[error("Image processing error: {0}")]
    Image(#[from] ImageError),
}

impl From<FfmpegError> for GrabError {
    fn from(error: FfmpegError) -> Self {
        GrabError::Ffmpeg(error.to_string())
    }
}
