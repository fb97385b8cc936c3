//! The decode loop: drive packet reading and decoding until one displayable
//! frame is produced.

use ffmpeg_next::{Error as FfmpegError, Packet};

use crate::{
    convert::{self, YuvPlanes},
    error::GrabError,
    frame::RgbFrame,
    session::MediaSession,
    utilities,
};

impl MediaSession {
    /// Decode the next displayable video frame.
    ///
    /// Produces at most one frame per call. Returns `Ok(None)` in three
    /// situations, none of which is an error:
    ///
    /// - genuine end-of-stream (and every call thereafter, until a seek);
    /// - the decoded frame was stale pre-roll from an earlier backward seek
    ///   and was discarded — poll again for the next one;
    /// - a read failure ended the stream early.
    ///
    /// Packets belonging to other streams are skipped silently. A packet
    /// that fails to decode is logged and abandoned; it never aborts the
    /// session. The call blocks until a frame is produced or the container
    /// is exhausted, however many packets that takes.
    ///
    /// # Errors
    ///
    /// - [`GrabError::NoVideoStream`] for audio-only sessions.
    /// - [`GrabError::UnsupportedPixelFormat`] if the decoder emits a layout
    ///   other than 8-bit planar 4:2:0.
    pub fn next_frame(&mut self) -> Result<Option<RgbFrame>, GrabError> {
        let video_stream_index = self.video_stream_index.ok_or(GrabError::NoVideoStream)?;
        let time_base = self.video_time_base.ok_or(GrabError::NoVideoStream)?;
        let (width, height) = self.dimensions().ok_or(GrabError::NoVideoStream)?;

        if self.drained {
            return Ok(None);
        }

        loop {
            let decoder = self.decoder.as_mut().ok_or(GrabError::NoVideoStream)?;

            // Drain first: frames the decoder buffered from an earlier packet
            // must come out before the demuxer is asked for more data.
            if decoder.receive_frame(&mut self.decoded).is_ok() {
                let pts = self.decoded.pts().unwrap_or(0);
                let pts_ms = utilities::pts_to_ms(pts, time_base);

                // A frame this far behind the playback position is pre-roll
                // surfaced by a backward keyframe snap after a seek. Discard
                // it and let the caller poll again.
                if pts_ms + self.options.stale_threshold_ms < self.position_ms {
                    log::debug!(
                        "Discarding stale frame at {pts_ms} ms (position {} ms)",
                        self.position_ms
                    );
                    return Ok(None);
                }

                self.position_ms = pts_ms;

                let planes = YuvPlanes::from_frame(&self.decoded)?;
                let data =
                    convert::yuv420_to_rgb24(&planes, width as usize, height as usize);
                log::trace!("Emitting frame at {pts_ms} ms");

                return Ok(Some(RgbFrame {
                    data,
                    width,
                    height,
                    pts_ms,
                }));
            }

            if self.eof_sent {
                // Flush pass already ran and the decoder is empty.
                self.drained = true;
                return Ok(None);
            }

            let mut packet = Packet::empty();
            match packet.read(&mut self.input) {
                Ok(()) => {
                    if packet.stream() != video_stream_index {
                        // Other streams are consumed with no output. This is
                        // where an audio decode branch would attach.
                        continue;
                    }
                    if let Err(error) = decoder.send_packet(&packet) {
                        // One corrupt packet must not end the session.
                        log::warn!(
                            "Dropping undecodable packet at pts {:?}: {error}",
                            packet.pts()
                        );
                    }
                }
                Err(FfmpegError::Eof) => {
                    // Container exhausted: send the flush packet once so the
                    // decoder surfaces any internally buffered frames.
                    if let Err(error) = decoder.send_eof() {
                        log::warn!("Decoder refused flush packet: {error}");
                        self.drained = true;
                        return Ok(None);
                    }
                    self.eof_sent = true;
                }
                Err(error) => {
                    // A read error ends the stream the same way EOF does;
                    // drain whatever the decoder still holds.
                    log::warn!("Packet read failed, flushing decoder: {error}");
                    if decoder.send_eof().is_err() {
                        self.drained = true;
                        return Ok(None);
                    }
                    self.eof_sent = true;
                }
            }
        }
    }
}
