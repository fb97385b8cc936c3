//! Planar 4:2:0 to packed RGB24 conversion.
//!
//! [`yuv420_to_rgb24`] is a pure function over borrowed sample planes. It
//! performs the fixed-point BT.601 transform with nearest-neighbor chroma
//! upsampling: each chroma sample serves two adjacent luma columns, and each
//! chroma row serves two luma rows. Per-plane strides are honoured, since
//! decoders routinely pad rows beyond the nominal width for alignment.

use ffmpeg_next::{format::Pixel, frame::Video as VideoFrame};

use crate::error::GrabError;

/// Borrowed view over the three sample planes of a planar 4:2:0 frame.
///
/// `y` is full resolution; `u` and `v` are half resolution both horizontally
/// and vertically. Strides are in bytes and may exceed the nominal row width.
#[derive(Debug, Clone, Copy)]
pub struct YuvPlanes<'a> {
    /// Luma plane.
    pub y: &'a [u8],
    /// Blue-difference chroma plane.
    pub u: &'a [u8],
    /// Red-difference chroma plane.
    pub v: &'a [u8],
    /// Row stride of the luma plane.
    pub y_stride: usize,
    /// Row stride of the U plane.
    pub u_stride: usize,
    /// Row stride of the V plane.
    pub v_stride: usize,
}

impl<'a> YuvPlanes<'a> {
    /// Borrow the planes of a decoded FFmpeg frame.
    ///
    /// # Errors
    ///
    /// Returns [`GrabError::UnsupportedPixelFormat`] unless the frame is
    /// 8-bit planar 4:2:0 (`YUV420P` or its full-range JPEG variant).
    pub fn from_frame(frame: &'a VideoFrame) -> Result<Self, GrabError> {
        match frame.format() {
            Pixel::YUV420P | Pixel::YUVJ420P => {}
            other => {
                return Err(GrabError::UnsupportedPixelFormat(format!("{other:?}")));
            }
        }

        Ok(Self {
            y: frame.data(0),
            u: frame.data(1),
            v: frame.data(2),
            y_stride: frame.stride(0),
            u_stride: frame.stride(1),
            v_stride: frame.stride(2),
        })
    }
}

/// Convert a planar 4:2:0 frame into a packed RGB24 buffer.
///
/// The output is row-major, `width * height * 3` bytes, no padding. The
/// transform is the fixed-point BT.601 matrix:
///
/// ```text
/// c = Y - 16, d = U - 128, e = V - 128
/// R = clip((298c          + 409e + 128) >> 8)
/// G = clip((298c - 100d - 208e + 128) >> 8)
/// B = clip((298c + 516d          + 128) >> 8)
/// ```
///
/// With neutral chroma (`U = V = 128`) all three channels collapse to
/// `clip((298 * (Y - 16) + 128) >> 8)`, expanding studio range (16-235) to
/// full range with black and white levels landing on 0 and 255 exactly.
pub fn yuv420_to_rgb24(planes: &YuvPlanes<'_>, width: usize, height: usize) -> Vec<u8> {
    let mut rgb = vec![0u8; width * height * 3];

    let mut y_row = 0;
    let mut u_row = 0;
    let mut v_row = 0;
    let mut out = 0;

    for j in 0..height {
        for i in 0..width {
            let c = i32::from(planes.y[y_row + i]) - 16;
            let d = i32::from(planes.u[u_row + (i >> 1)]) - 128;
            let e = i32::from(planes.v[v_row + (i >> 1)]) - 128;

            rgb[out] = clip((298 * c + 409 * e + 128) >> 8);
            rgb[out + 1] = clip((298 * c - 100 * d - 208 * e + 128) >> 8);
            rgb[out + 2] = clip((298 * c + 516 * d + 128) >> 8);

            out += 3;
        }

        y_row += planes.y_stride;
        // Chroma rows advance at half the luma rate (4:2:0 geometry).
        if j & 1 == 1 {
            u_row += planes.u_stride;
            v_row += planes.v_stride;
        }
    }

    rgb
}

/// Saturate an intermediate value to the displayable `[0, 255]` range.
fn clip(value: i32) -> u8 {
    value.clamp(0, 255) as u8
}

#[cfg(test)]
mod tests {
    use super::clip;

    #[test]
    fn clip_saturates_both_ends() {
        assert_eq!(clip(-1), 0);
        assert_eq!(clip(0), 0);
        assert_eq!(clip(128), 128);
        assert_eq!(clip(255), 255);
        assert_eq!(clip(256), 255);
        assert_eq!(clip(71350 >> 8), 255);
    }
}
