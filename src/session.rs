//! Core [`MediaSession`] implementation.
//!
//! A `MediaSession` owns one open media container and the decoder for its
//! selected video stream. It is the stateful center of the crate: the decode
//! loop ([`next_frame`](MediaSession::next_frame)) and the seek operations
//! ([`seek_to`](MediaSession::seek_to), [`seek_by`](MediaSession::seek_by))
//! both mutate the session's playback position and packet bookkeeping.
//!
//! Sessions are strictly single-threaded and not reentrant: every operation
//! runs to completion on the caller's thread, and callers must serialize
//! access themselves.

use std::{
    fmt::{Debug, Formatter, Result as FmtResult},
    path::{Path, PathBuf},
    time::Duration,
};

use ffmpeg_next::{
    Rational,
    codec::context::Context as CodecContext,
    decoder::Video as VideoDecoder,
    format::context::Input,
    frame::Video as VideoFrame,
    media::Type,
};

use crate::{
    error::GrabError,
    ffmpeg,
    metadata::{AudioMetadata, SessionMetadata, VideoMetadata},
};

/// Default staleness window for the decode loop's post-seek frame filter, in
/// milliseconds.
///
/// A decoded frame whose presentation time is more than this far behind the
/// session's playback position is treated as pre-roll from a backward
/// keyframe snap and discarded. The value is domain-tuned rather than derived
/// from any stream property, which is why it is configurable via
/// [`SessionOptions`].
pub const DEFAULT_STALE_THRESHOLD_MS: i64 = 250;

/// Tuning knobs for a [`MediaSession`].
#[derive(Debug, Clone)]
pub struct SessionOptions {
    /// Staleness window for the post-seek frame filter, in milliseconds.
    /// See [`DEFAULT_STALE_THRESHOLD_MS`].
    pub stale_threshold_ms: i64,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            stale_threshold_ms: DEFAULT_STALE_THRESHOLD_MS,
        }
    }
}

/// One open media source with its decoder and playback state.
///
/// Created via [`open`](MediaSession::open); released on drop. Dropping is
/// safe at any point, including mid-playback or on a session whose video
/// decoder never opened.
///
/// # Example
///
/// ```no_run
/// use framegrab::MediaSession;
///
/// let mut session = MediaSession::open("input.mp4")?;
/// while let Some(frame) = session.next_frame()? {
///     println!("frame at {} ms ({} bytes)", frame.pts_ms(), frame.data().len());
/// }
/// # Ok::<(), framegrab::GrabError>(())
/// ```
pub struct MediaSession {
    // Field order is the release order: the video decoder goes first, then
    // the demuxer context, then the held frame buffer.
    pub(crate) decoder: Option<VideoDecoder>,
    pub(crate) input: Input,
    pub(crate) decoded: VideoFrame,
    pub(crate) video_stream_index: Option<usize>,
    pub(crate) audio_stream_index: Option<usize>,
    pub(crate) video_time_base: Option<Rational>,
    pub(crate) audio_time_base: Option<Rational>,
    /// Presentation time of the last emitted frame, in milliseconds.
    /// Rewritten wholesale by a successful seek.
    pub(crate) position_ms: i64,
    /// Whether the flush packet has been sent to the decoder.
    pub(crate) eof_sent: bool,
    /// Whether the decoder has been fully drained after the flush pass.
    pub(crate) drained: bool,
    pub(crate) options: SessionOptions,
    metadata: SessionMetadata,
    file_path: PathBuf,
}

impl Debug for MediaSession {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("MediaSession")
            .field("metadata", &self.metadata)
            .field("video_stream_index", &self.video_stream_index)
            .field("audio_stream_index", &self.audio_stream_index)
            .field("position_ms", &self.position_ms)
            .field("eof_sent", &self.eof_sent)
            .field("file_path", &self.file_path)
            .finish_non_exhaustive()
    }
}

impl MediaSession {
    /// Open a media file with default [`SessionOptions`].
    ///
    /// # Errors
    ///
    /// See [`open_with`](MediaSession::open_with).
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, GrabError> {
        Self::open_with(path, SessionOptions::default())
    }

    /// Open a media file for frame extraction.
    ///
    /// Initializes FFmpeg (idempotent), opens the container, probes its
    /// streams, and selects the best video and audio streams. A stream whose
    /// decoder is unavailable is treated as absent rather than failing the
    /// open; the open fails only when *neither* kind is usable.
    ///
    /// # Errors
    ///
    /// - [`GrabError::FileOpen`] if the container cannot be opened or probed.
    /// - [`GrabError::NoStreamFound`] if no usable stream of either kind
    ///   exists. All partially-opened state is released before returning.
    pub fn open_with<P: AsRef<Path>>(
        path: P,
        options: SessionOptions,
    ) -> Result<Self, GrabError> {
        let path = path.as_ref();
        let file_path = path.to_path_buf();

        ffmpeg::init().map_err(|error| GrabError::FileOpen {
            path: file_path.clone(),
            reason: format!("FFmpeg initialization failed: {error}"),
        })?;

        // Opening the input also probes stream metadata.
        let input = ffmpeg_next::format::input(&path).map_err(|error| GrabError::FileOpen {
            path: file_path.clone(),
            reason: error.to_string(),
        })?;

        log::debug!("Opened media file: {}", file_path.display());

        // Select the best video stream and open its decoder.
        let mut decoder = None;
        let mut video_stream_index = None;
        let mut video_time_base = None;
        let mut video_metadata = None;

        if let Some(stream) = input.streams().best(Type::Video) {
            let index = stream.index();
            let time_base = stream.time_base();
            let frames_per_second = stream_frame_rate(&stream);

            match CodecContext::from_parameters(stream.parameters())
                .and_then(|context| context.decoder().video())
            {
                Ok(opened) => {
                    let codec = opened
                        .codec()
                        .map(|codec| codec.name().to_string())
                        .unwrap_or_else(|| "unknown".to_string());

                    video_metadata = Some(VideoMetadata {
                        width: opened.width(),
                        height: opened.height(),
                        frames_per_second,
                        codec,
                    });
                    decoder = Some(opened);
                    video_stream_index = Some(index);
                    video_time_base = Some(time_base);
                }
                Err(error) => {
                    // Stream discovered but not decodable: the session can
                    // still open on the strength of its audio stream.
                    log::warn!("Video decoder for stream {index} failed to open: {error}");
                }
            }
        }

        // Select the best audio stream. No persistent audio decoder is kept
        // (audio decoding is the caller's concern); the stream is recorded so
        // seeks can be resolved against it.
        let mut audio_stream_index = None;
        let mut audio_time_base = None;
        let mut audio_metadata = None;

        if let Some(stream) = input.streams().best(Type::Audio) {
            let index = stream.index();
            match CodecContext::from_parameters(stream.parameters())
                .and_then(|context| context.decoder().audio())
            {
                Ok(opened) => {
                    let codec = opened
                        .codec()
                        .map(|codec| codec.name().to_string())
                        .unwrap_or_else(|| "unknown".to_string());

                    audio_metadata = Some(AudioMetadata {
                        sample_rate: opened.rate(),
                        channels: opened.channels(),
                        codec,
                    });
                    audio_stream_index = Some(index);
                    audio_time_base = Some(stream.time_base());
                }
                Err(error) => {
                    log::warn!("Audio decoder for stream {index} failed to open: {error}");
                }
            }
        }

        if video_stream_index.is_none() && audio_stream_index.is_none() {
            return Err(GrabError::NoStreamFound);
        }

        let duration_microseconds = input.duration();
        let duration = if duration_microseconds > 0 {
            Duration::from_micros(duration_microseconds as u64)
        } else {
            Duration::ZERO
        };

        let metadata = SessionMetadata {
            video: video_metadata,
            audio: audio_metadata,
            duration,
            format: input.format().name().to_string(),
        };

        log::debug!(
            "Session streams: video={video_stream_index:?} audio={audio_stream_index:?}, {metadata:?}"
        );

        Ok(Self {
            decoder,
            input,
            decoded: VideoFrame::empty(),
            video_stream_index,
            audio_stream_index,
            video_time_base,
            audio_time_base,
            position_ms: 0,
            eof_sent: false,
            drained: false,
            options,
            metadata,
            file_path,
        })
    }

    /// Cached metadata for this session's streams and container.
    pub fn metadata(&self) -> &SessionMetadata {
        &self.metadata
    }

    /// Output dimensions in pixels, `None` for audio-only sessions.
    ///
    /// These come from the decoder context, not from individual frames, and
    /// are constant for the lifetime of the session.
    pub fn dimensions(&self) -> Option<(u32, u32)> {
        self.metadata
            .video
            .as_ref()
            .map(|video| (video.width, video.height))
    }

    /// Whether the session has a usable video stream.
    pub fn has_video(&self) -> bool {
        self.video_stream_index.is_some()
    }

    /// Whether the session has a usable audio stream.
    pub fn has_audio(&self) -> bool {
        self.audio_stream_index.is_some()
    }

    /// Current playback position: the presentation time of the last emitted
    /// frame, or the target of the last successful seek, in milliseconds.
    pub fn position_ms(&self) -> i64 {
        self.position_ms
    }

    /// Whether the stream is exhausted.
    ///
    /// `true` once [`next_frame`](MediaSession::next_frame) has hit genuine
    /// end-of-stream and drained the decoder's buffered frames. A successful
    /// seek re-arms the session. Lets callers tell an end-of-stream `None`
    /// apart from a discarded stale frame.
    pub fn is_exhausted(&self) -> bool {
        self.drained
    }

    /// Path the session was opened from.
    pub fn path(&self) -> &Path {
        &self.file_path
    }

    /// The options this session was opened with.
    pub fn options(&self) -> &SessionOptions {
        &self.options
    }
}

/// Average frame rate of a stream, falling back to the raw rate field.
fn stream_frame_rate(stream: &ffmpeg_next::Stream<'_>) -> f64 {
    let average = stream.avg_frame_rate();
    if average.denominator() != 0 {
        return average.numerator() as f64 / average.denominator() as f64;
    }
    let rate = stream.rate();
    if rate.denominator() != 0 {
        rate.numerator() as f64 / rate.denominator() as f64
    } else {
        0.0
    }
}
