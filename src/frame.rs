//! Packed RGB frame buffers.

use image::RgbImage;

/// A decoded video frame as a tightly packed RGB24 buffer.
///
/// The buffer is row-major, three bytes per pixel (red, green, blue), with no
/// row padding: its length is exactly `width * height * 3`. Each call to
/// [`MediaSession::next_frame`](crate::MediaSession::next_frame) allocates a
/// fresh buffer whose ownership moves to the caller.
#[derive(Debug, Clone)]
pub struct RgbFrame {
    pub(crate) data: Vec<u8>,
    pub(crate) width: u32,
    pub(crate) height: u32,
    pub(crate) pts_ms: i64,
}

impl RgbFrame {
    /// Frame width in pixels. Constant for the lifetime of a session.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Frame height in pixels. Constant for the lifetime of a session.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Presentation time of this frame in milliseconds from stream start.
    pub fn pts_ms(&self) -> i64 {
        self.pts_ms
    }

    /// The packed pixel data, `width * height * 3` bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Consume the frame and return the raw pixel buffer.
    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    /// Consume the frame and wrap it as an [`image::RgbImage`].
    pub fn into_image(self) -> RgbImage {
        // Infallible: the converter allocates exactly width * height * 3 bytes.
        RgbImage::from_raw(self.width, self.height, self.data)
            .expect("RgbFrame buffer length matches its dimensions")
    }
}
