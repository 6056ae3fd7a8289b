use std::{
    fmt,
    fs::File,
    io::BufReader,
    path::Path,
    process::Command,
    sync::Arc,
    thread,
    time::{Duration, Instant},
};

use lofty::config::WriteOptions;
use lofty::prelude::*;
use rodio::{Decoder, OutputStreamBuilder, Sink};

#[derive(Debug)]
pub enum PlaybackError {
    Io(std::io::Error),
    Decode(String),
    Device(String),
    Tag(String),
}

impl From<std::io::Error> for PlaybackError {
    fn from(err: std::io::Error) -> Self {
        PlaybackError::Io(err)
    }
}

impl fmt::Display for PlaybackError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlaybackError::Io(e) => write!(f, "playback i/o error: {e}"),
            PlaybackError::Decode(msg) => write!(f, "cannot decode clip: {msg}"),
            PlaybackError::Device(msg) => write!(f, "no usable audio output: {msg}"),
            PlaybackError::Tag(msg) => write!(f, "cannot rewrite clip tags: {msg}"),
        }
    }
}

impl std::error::Error for PlaybackError {}

/// A mechanism that can render one audio file for a bounded duration.
///
/// Implementations block the calling thread; the controller runs them on a
/// background blocking task. Rendering must stop within a small margin of
/// `duration` even when the file's natural length exceeds it.
pub trait ClipRenderer: Send + Sync {
    fn render(&self, clip: &Path, duration: Duration) -> Result<(), PlaybackError>;
}

/// Picks the rendering mechanism for the host platform.
pub fn platform_renderer() -> Arc<dyn ClipRenderer> {
    if cfg!(target_os = "macos") {
        Arc::new(AfplayRenderer)
    } else {
        Arc::new(RodioRenderer)
    }
}

const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Renders through the system `afplay` command.
///
/// The child is polled until it finishes on its own or the deadline passes,
/// then killed and reaped either way.
pub struct AfplayRenderer;

impl ClipRenderer for AfplayRenderer {
    fn render(&self, clip: &Path, duration: Duration) -> Result<(), PlaybackError> {
        let mut child = Command::new("afplay").arg(clip).spawn()?;

        let deadline = Instant::now() + duration;
        loop {
            if child.try_wait()?.is_some() {
                return Ok(());
            }
            if Instant::now() >= deadline {
                break;
            }
            thread::sleep(POLL_INTERVAL);
        }

        child.kill()?;
        child.wait()?;
        Ok(())
    }
}

/// Decodes and plays the clip in-process through the default output device.
pub struct RodioRenderer;

impl ClipRenderer for RodioRenderer {
    fn render(&self, clip: &Path, duration: Duration) -> Result<(), PlaybackError> {
        // Provider clips ship with ID3v2.4 tags that some decoders choke on;
        // rewrite them as ID3v2.3 once, in place.
        normalize_id3(clip)?;

        let mut stream = OutputStreamBuilder::open_default_stream()
            .map_err(|e| PlaybackError::Device(e.to_string()))?;
        stream.log_on_drop(false);

        let file = File::open(clip)?;
        let source = Decoder::new(BufReader::new(file))
            .map_err(|e| PlaybackError::Decode(e.to_string()))?;

        let sink = Sink::connect_new(stream.mixer());
        sink.append(source);
        sink.play();

        let deadline = Instant::now() + duration;
        while !sink.empty() && Instant::now() < deadline {
            thread::sleep(POLL_INTERVAL);
        }
        sink.stop();

        Ok(())
    }
}

/// Rewrites the file's primary tag in the ID3v2.3 format.
///
/// Idempotent; files without a recognizable tag are left alone.
fn normalize_id3(clip: &Path) -> Result<(), PlaybackError> {
    let Ok(mut tagged) = lofty::read_from_path(clip) else {
        return Ok(());
    };

    if let Some(tag) = tagged.primary_tag_mut() {
        tag.save_to_path(clip, WriteOptions::default().use_id3v23(true))
            .map_err(|e| PlaybackError::Tag(e.to_string()))?;
    }

    Ok(())
}
