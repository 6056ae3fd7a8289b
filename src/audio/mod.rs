//! Bounded, mutually exclusive preview playback.
//!
//! The controller owns the process-wide Idle/Playing state: at most one clip
//! renders at any time, a second request while one is active is silently
//! dropped, and every session ends within the requested duration whether the
//! clip is shorter or longer than that. Rendering failures are absorbed here;
//! the game's turn logic never observes them.

mod renderer;

pub use renderer::{AfplayRenderer, ClipRenderer, PlaybackError, RodioRenderer, platform_renderer};

use std::{
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    time::Duration,
};

use crate::{types::Track, warning};

/// Plays one preview clip at a time.
///
/// `play` never blocks the caller: rendering happens on a background blocking
/// task bounded by the requested duration. Callers schedule their own turn
/// transitions against the same wall-clock duration instead of waiting for
/// the render to finish.
pub struct PlaybackController {
    renderer: Arc<dyn ClipRenderer>,
    playing: Arc<AtomicBool>,
}

impl PlaybackController {
    /// Controller with the rendering mechanism of the host platform.
    pub fn new() -> Self {
        Self::with_renderer(platform_renderer())
    }

    pub fn with_renderer(renderer: Arc<dyn ClipRenderer>) -> Self {
        Self {
            renderer,
            playing: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Starts playing `track` for at most `duration` and returns immediately.
    ///
    /// A no-op when the track is silent or when a session is already active.
    /// The underlying renderer is stopped at the deadline, and the controller
    /// returns to idle afterwards even when rendering failed; errors are
    /// logged, never propagated.
    ///
    /// Rendering is handed to `tokio::task::spawn_blocking`, so this must be
    /// called from within a tokio runtime.
    pub fn play(&self, track: &Track, duration: Duration) {
        let Some(clip) = track.location.clone() else {
            return;
        };

        // Claim the single playback slot; lose the race, drop the request.
        if self.playing.swap(true, Ordering::SeqCst) {
            return;
        }

        let renderer = Arc::clone(&self.renderer);
        let playing = Arc::clone(&self.playing);

        tokio::task::spawn_blocking(move || {
            if let Err(e) = renderer.render(&clip, duration) {
                warning!("Playback failed: {}", e);
            }
            playing.store(false, Ordering::SeqCst);
        });
    }

    pub fn is_playing(&self) -> bool {
        self.playing.load(Ordering::SeqCst)
    }
}

impl Default for PlaybackController {
    fn default() -> Self {
        Self::new()
    }
}
