use std::{fs, path::PathBuf, process::ExitCode};

use clap::{Parser, Subcommand};
use framegrab::{FfmpegLogLevel, GrabError, MediaSession, SeekMode, StreamKind};
use serde_json::json;

const CLI_AFTER_HELP: &str = "Examples:\n  framegrab info input.mp4 --json\n  framegrab frames input.mp4 --out frames --count 25\n  framegrab grab input.mp4 --at 1000 --out at_1s.png";

#[derive(Debug, Parser)]
#[command(
    name = "framegrab",
    version,
    about = "Extract video frames with playback and millisecond seeking",
    after_help = CLI_AFTER_HELP
)]
struct Cli {
    /// FFmpeg log level (quiet, panic, fatal, error, warning, info, verbose, debug, trace).
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Print stream and container metadata.
    #[command(visible_alias = "probe")]
    Info {
        /// Input media path.
        input: String,

        /// Output metadata as machine-readable JSON.
        #[arg(long)]
        json: bool,
    },

    /// Decode frames sequentially and write them as images.
    Frames {
        /// Input media path.
        input: String,

        /// Output directory for frame images.
        #[arg(long)]
        out: PathBuf,

        /// Number of frames to extract from the start of the stream.
        #[arg(long, default_value_t = 25)]
        count: u32,

        /// Output image extension (png, jpg, bmp, ...).
        #[arg(long, default_value = "png")]
        ext: String,
    },

    /// Seek to a position and grab one frame.
    Grab {
        /// Input media path.
        input: String,

        /// Target position in milliseconds.
        #[arg(long)]
        at: i64,

        /// Output image path.
        #[arg(long)]
        out: PathBuf,

        /// Land on the nearest position in either direction instead of
        /// snapping back to a keyframe.
        #[arg(long)]
        any: bool,
    },
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    if let Some(level) = cli.log_level.as_deref() {
        match parse_log_level(level) {
            Some(level) => framegrab::set_log_level(level),
            None => {
                eprintln!("Unknown log level: {level}");
                return ExitCode::FAILURE;
            }
        }
    }

    let result = match cli.command {
        Commands::Info { input, json } => run_info(&input, json),
        Commands::Frames {
            input,
            out,
            count,
            ext,
        } => run_frames(&input, &out, count, &ext),
        Commands::Grab {
            input,
            at,
            out,
            any,
        } => run_grab(&input, at, &out, any),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("Error: {error}");
            ExitCode::FAILURE
        }
    }
}

fn parse_log_level(level: &str) -> Option<FfmpegLogLevel> {
    match level.to_ascii_lowercase().as_str() {
        "quiet" => Some(FfmpegLogLevel::Quiet),
        "panic" => Some(FfmpegLogLevel::Panic),
        "fatal" => Some(FfmpegLogLevel::Fatal),
        "error" => Some(FfmpegLogLevel::Error),
        "warning" => Some(FfmpegLogLevel::Warning),
        "info" => Some(FfmpegLogLevel::Info),
        "verbose" => Some(FfmpegLogLevel::Verbose),
        "debug" => Some(FfmpegLogLevel::Debug),
        "trace" => Some(FfmpegLogLevel::Trace),
        _ => None,
    }
}

fn run_info(input: &str, as_json: bool) -> Result<(), GrabError> {
    let session = MediaSession::open(input)?;
    let metadata = session.metadata();

    if as_json {
        let value = json!({
            "format": metadata.format,
            "duration_ms": metadata.duration.as_millis() as u64,
            "video": metadata.video.as_ref().map(|video| json!({
                "width": video.width,
                "height": video.height,
                "fps": video.frames_per_second,
                "codec": video.codec,
            })),
            "audio": metadata.audio.as_ref().map(|audio| json!({
                "sample_rate": audio.sample_rate,
                "channels": audio.channels,
                "codec": audio.codec,
            })),
        });
        println!("{value:#}");
        return Ok(());
    }

    println!("Format:   {}", metadata.format);
    println!("Duration: {:?}", metadata.duration);
    match &metadata.video {
        Some(video) => println!(
            "Video:    {}x{} @ {:.3} fps ({})",
            video.width, video.height, video.frames_per_second, video.codec
        ),
        None => println!("Video:    none"),
    }
    match &metadata.audio {
        Some(audio) => println!(
            "Audio:    {} Hz, {} ch ({})",
            audio.sample_rate, audio.channels, audio.codec
        ),
        None => println!("Audio:    none"),
    }
    Ok(())
}

fn run_frames(input: &str, out: &PathBuf, count: u32, ext: &str) -> Result<(), GrabError> {
    let mut session = MediaSession::open(input)?;
    fs::create_dir_all(out)?;

    let mut written = 0u32;
    while written < count {
        match session.next_frame()? {
            Some(frame) => {
                let path = out.join(format!("frame_{:05}_{}ms.{ext}", written, frame.pts_ms()));
                frame.into_image().save(&path)?;
                written += 1;
            }
            // A None is either end-of-stream or a discarded stale frame;
            // only the former ends the run.
            None if session.is_exhausted() => break,
            None => {}
        }
    }

    println!("Wrote {written} frame(s) to {}", out.display());
    Ok(())
}

fn run_grab(input: &str, at_ms: i64, out: &PathBuf, any: bool) -> Result<(), GrabError> {
    let mut session = MediaSession::open(input)?;
    let mode = if any { SeekMode::Any } else { SeekMode::Backward };
    session.seek_to(StreamKind::Video, at_ms, mode)?;

    // The first few decoded frames after a backward snap may be stale
    // pre-roll, surfaced as None; poll until a real frame comes out.
    loop {
        match session.next_frame()? {
            Some(frame) => {
                println!("Grabbed frame at {} ms", frame.pts_ms());
                frame.into_image().save(out)?;
                return Ok(());
            }
            None if session.is_exhausted() => {
                eprintln!("No frame available at {at_ms} ms");
                return Ok(());
            }
            None => {}
        }
    }
}
