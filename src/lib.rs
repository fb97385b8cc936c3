//! # framegrab
//!
//! On-demand video frame extraction: sequential playback, millisecond
//! seeking, and packed RGB conversion, powered by FFmpeg via the
//! [`ffmpeg-next`](https://crates.io/crates/ffmpeg-next) crate.
//!
//! The central type is [`MediaSession`]: one open media source, one video
//! decoder, and the playback state connecting them. Each call to
//! [`next_frame`](MediaSession::next_frame) drives packet reading and
//! decoding until exactly one displayable frame is produced, converts its
//! planar 4:2:0 output to a packed [`RgbFrame`], and returns it; `Ok(None)`
//! marks end-of-stream. Seeks resolve millisecond targets into
//! container-level operations and rely on a staleness filter to discard the
//! pre-roll frames a backward keyframe snap surfaces.
//!
//! ## Sequential playback
//!
//! ```no_run
//! use framegrab::MediaSession;
//!
//! let mut session = MediaSession::open("input.mp4")?;
//! let (width, height) = session.dimensions().expect("video stream");
//!
//! while let Some(frame) = session.next_frame()? {
//!     assert_eq!(frame.data().len(), (width * height * 3) as usize);
//!     println!("frame at {} ms", frame.pts_ms());
//! }
//! # Ok::<(), framegrab::GrabError>(())
//! ```
//!
//! ## Seeking
//!
//! ```no_run
//! use framegrab::{MediaSession, SeekMode, StreamKind};
//!
//! let mut session = MediaSession::open("input.mp4")?;
//!
//! // Jump to 1.0 s, snapping back to the nearest keyframe.
//! session.seek_to(StreamKind::Video, 1000, SeekMode::Backward)?;
//! if let Some(frame) = session.next_frame()? {
//!     frame.into_image().save("at_1s.png")?;
//! }
//!
//! // Step 500 ms forward from wherever playback is now.
//! session.seek_by(StreamKind::Video, 500)?;
//! # Ok::<(), framegrab::GrabError>(())
//! ```
//!
//! ## Design notes
//!
//! - Sessions are single-threaded and blocking; callers serialize access.
//! - Every returned buffer is a fresh allocation owned by the caller.
//! - A corrupt packet is logged and skipped, never fatal to the session.
//! - The post-seek staleness window defaults to 250 ms and is configurable
//!   through [`SessionOptions`].
//! - Hosts that pass sessions across an FFI or scripting boundary can use
//!   [`SessionTable`] to exchange owned sessions for typed, generation-checked
//!   handles.
//!
//! ## Requirements
//!
//! FFmpeg development libraries must be installed on the system; see the
//! README for platform specifics.

pub mod convert;
mod decode;
pub mod error;
pub mod ffmpeg;
pub mod frame;
pub mod metadata;
pub mod registry;
pub mod seek;
pub mod session;
mod utilities;

pub use convert::{YuvPlanes, yuv420_to_rgb24};
pub use error::GrabError;
pub use ffmpeg::{FfmpegLogLevel, init, log_level, set_log_level};
pub use frame::RgbFrame;
pub use metadata::{AudioMetadata, SessionMetadata, VideoMetadata};
pub use registry::{Handle, HandleTable, SessionHandle, SessionTable};
pub use seek::{SeekMode, StreamKind};
pub use session::{DEFAULT_STALE_THRESHOLD_MS, MediaSession, SessionOptions};
