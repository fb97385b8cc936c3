//! FFmpeg runtime initialization and log-level control.
//!
//! FFmpeg requires a one-time, process-wide initialization before any
//! container can be opened. [`init`] wraps that in a thread-safe,
//! idempotent guard; [`MediaSession::open`](crate::MediaSession::open) calls
//! it automatically, but hosts that want failures surfaced at startup can
//! call it themselves.
//!
//! FFmpeg also has its own internal logging, separate from the Rust
//! [`log`](https://crates.io/crates/log) facade, and prints warnings to
//! stderr by default. [`set_log_level`] tunes or silences that output
//! without the host importing `ffmpeg-next` directly.

use std::sync::OnceLock;

use ffmpeg_next::util::log::Level;

use crate::error::GrabError;

static INIT: OnceLock<Result<(), String>> = OnceLock::new();

/// Initialize the FFmpeg libraries.
///
/// Safe to call any number of times from any thread; the underlying
/// initialization runs exactly once and its outcome is cached.
///
/// # Errors
///
/// Returns [`GrabError::Ffmpeg`] if FFmpeg failed to initialize. The same
/// error is returned on every subsequent call.
pub fn init() -> Result<(), GrabError> {
    INIT.get_or_init(|| ffmpeg_next::init().map_err(|error| error.to_string()))
        .clone()
        .map_err(GrabError::Ffmpeg)
}

/// FFmpeg internal log verbosity, most quiet to most verbose.
///
/// Maps directly to FFmpeg's `AV_LOG_*` constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FfmpegLogLevel {
    /// Print nothing at all.
    Quiet,
    /// Only conditions that will abort the process.
    Panic,
    /// Unrecoverable errors (the context becomes unusable).
    Fatal,
    /// Recoverable errors.
    Error,
    /// Warnings (FFmpeg's default).
    Warning,
    /// Informational messages.
    Info,
    /// Verbose informational messages.
    Verbose,
    /// Debugging output.
    Debug,
    /// Extremely verbose tracing output.
    Trace,
}

impl FfmpegLogLevel {
    fn to_ffmpeg(self) -> Level {
        match self {
            FfmpegLogLevel::Quiet => Level::Quiet,
            FfmpegLogLevel::Panic => Level::Panic,
            FfmpegLogLevel::Fatal => Level::Fatal,
            FfmpegLogLevel::Error => Level::Error,
            FfmpegLogLevel::Warning => Level::Warning,
            FfmpegLogLevel::Info => Level::Info,
            FfmpegLogLevel::Verbose => Level::Verbose,
            FfmpegLogLevel::Debug => Level::Debug,
            FfmpegLogLevel::Trace => Level::Trace,
        }
    }

    fn from_ffmpeg(level: Level) -> Self {
        match level {
            Level::Quiet => FfmpegLogLevel::Quiet,
            Level::Panic => FfmpegLogLevel::Panic,
            Level::Fatal => FfmpegLogLevel::Fatal,
            Level::Error => FfmpegLogLevel::Error,
            Level::Warning => FfmpegLogLevel::Warning,
            Level::Info => FfmpegLogLevel::Info,
            Level::Verbose => FfmpegLogLevel::Verbose,
            Level::Debug => FfmpegLogLevel::Debug,
            Level::Trace => FfmpegLogLevel::Trace,
        }
    }
}

/// Set FFmpeg's internal log verbosity.
///
/// Controls what FFmpeg itself prints to stderr. Rust-side diagnostics from
/// this crate go through the `log` facade and are unaffected.
pub fn set_log_level(level: FfmpegLogLevel) {
    ffmpeg_next::util::log::set_level(level.to_ffmpeg());
}

/// Get FFmpeg's current internal log verbosity.
///
/// Returns `None` if the current level does not map to a known variant.
pub fn log_level() -> Option<FfmpegLogLevel> {
    ffmpeg_next::util::log::get_level()
        .ok()
        .map(FfmpegLogLevel::from_ffmpeg)
}
