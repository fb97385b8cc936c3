//! Seeking: translate millisecond targets into container-level seeks.
//!
//! Seeks go through `av_seek_frame` from `ffmpeg-sys-next` because the safe
//! wrapper's seek operates on the container clock only; the session needs
//! per-stream seeks with an explicit direction flag.

use std::os::raw::c_int;

use ffmpeg_sys_next::{AVSEEK_FLAG_ANY, AVSEEK_FLAG_BACKWARD, av_seek_frame};

use crate::{error::GrabError, session::MediaSession, utilities};

/// Which elementary stream a seek is resolved against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StreamKind {
    /// The session's selected video stream.
    Video,
    /// The session's selected audio stream.
    Audio,
}

/// Direction policy for a container-level seek.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SeekMode {
    /// Snap to the nearest keyframe at or before the target (default).
    #[default]
    Backward,
    /// Land on the nearest position in either direction, keyframe or not.
    Any,
}

impl SeekMode {
    fn flag(self) -> c_int {
        match self {
            SeekMode::Backward => AVSEEK_FLAG_BACKWARD as c_int,
            SeekMode::Any => AVSEEK_FLAG_ANY as c_int,
        }
    }
}

impl MediaSession {
    /// Seek to an absolute position in milliseconds.
    ///
    /// The target is converted into the chosen stream's time base and handed
    /// to the container. With [`SeekMode::Backward`] the demuxer lands on the
    /// nearest keyframe at or before the target; the frames between that
    /// keyframe and the target surface as stale pre-roll that the decode
    /// loop's staleness filter discards.
    ///
    /// On success the playback position is set to `target_ms` **exactly**,
    /// not to the timestamp the seek actually landed on. This is deliberate:
    /// the discrepancy is reconciled by the staleness filter over the next
    /// few [`next_frame`](MediaSession::next_frame) calls.
    ///
    /// # Errors
    ///
    /// - [`GrabError::NoVideoStream`] / [`GrabError::NoAudioStream`] if the
    ///   requested stream kind is not present.
    /// - [`GrabError::SeekRejected`] if the container refused the seek.
    ///
    /// In every failure case the playback position is left unchanged.
    pub fn seek_to(
        &mut self,
        kind: StreamKind,
        target_ms: i64,
        mode: SeekMode,
    ) -> Result<(), GrabError> {
        let (stream_index, time_base) = match kind {
            StreamKind::Video => (
                self.video_stream_index.ok_or(GrabError::NoVideoStream)?,
                self.video_time_base.ok_or(GrabError::NoVideoStream)?,
            ),
            StreamKind::Audio => (
                self.audio_stream_index.ok_or(GrabError::NoAudioStream)?,
                self.audio_time_base.ok_or(GrabError::NoAudioStream)?,
            ),
        };

        let timestamp = utilities::ms_to_stream_timestamp(target_ms, time_base);
        log::debug!(
            "Seeking {kind:?} stream to {target_ms} ms (timestamp {timestamp}, {mode:?})"
        );

        let status = unsafe {
            av_seek_frame(
                self.input.as_mut_ptr(),
                stream_index as c_int,
                timestamp,
                mode.flag(),
            )
        };
        if status < 0 {
            return Err(GrabError::SeekRejected {
                target_ms,
                reason: ffmpeg_next::Error::from(status).to_string(),
            });
        }

        self.position_ms = target_ms;

        // Frames buffered from before the seek belong to the old position;
        // reset the codec and re-arm the decode loop past any EOF latch.
        if let Some(decoder) = self.decoder.as_mut() {
            decoder.flush();
        }
        self.eof_sent = false;
        self.drained = false;

        Ok(())
    }

    /// Seek relative to the current playback position.
    ///
    /// Computes `target = position + delta_ms` and delegates to
    /// [`seek_to`](MediaSession::seek_to). A zero delta re-snaps backward to
    /// the nearest keyframe at the current position; any other delta seeks to
    /// the nearest position in either direction.
    ///
    /// # Errors
    ///
    /// Same as [`seek_to`](MediaSession::seek_to).
    pub fn seek_by(&mut self, kind: StreamKind, delta_ms: i64) -> Result<(), GrabError> {
        let mode = if delta_ms == 0 {
            SeekMode::Backward
        } else {
            SeekMode::Any
        };
        self.seek_to(kind, self.position_ms + delta_ms, mode)
    }
}
