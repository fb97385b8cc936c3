//! Internal timestamp conversions.
//!
//! The session tracks playback position in milliseconds; FFmpeg streams
//! express timestamps in their own rational time base. These helpers convert
//! between the two domains.

use ffmpeg_next::Rational;

/// Convert a stream-domain pts to milliseconds via the stream's time base.
pub(crate) fn pts_to_ms(pts: i64, time_base: Rational) -> i64 {
    (pts as f64 * time_base.numerator() as f64 / time_base.denominator() as f64 * 1000.0) as i64
}

/// Convert a millisecond position to a timestamp in the stream's time base.
///
/// The result is suitable for passing to `av_seek_frame`.
pub(crate) fn ms_to_stream_timestamp(ms: i64, time_base: Rational) -> i64 {
    (ms as f64 * 0.001 * time_base.denominator() as f64 / time_base.numerator() as f64) as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pts_round_trips_through_ms() {
        // 90 kHz clock, one second in.
        let time_base = Rational::new(1, 90_000);
        assert_eq!(pts_to_ms(90_000, time_base), 1000);
        assert_eq!(ms_to_stream_timestamp(1000, time_base), 90_000);
    }

    #[test]
    fn fractional_positions_truncate() {
        // 25 fps stream with a 1/25 time base: pts 1 is 40 ms.
        let time_base = Rational::new(1, 25);
        assert_eq!(pts_to_ms(1, time_base), 40);
        // 39 ms is still within frame 0.
        assert_eq!(ms_to_stream_timestamp(39, time_base), 0);
        assert_eq!(ms_to_stream_timestamp(40, time_base), 1);
    }
}
