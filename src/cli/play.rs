use std::time::Duration;

use tokio::time::sleep;

use crate::{audio::PlaybackController, error, info, warning};

/// Plays a single cached preview clip for at most `duration` seconds.
///
/// The wait below is the turn timer, not the playback: the controller
/// returns immediately and both race against the same wall-clock bound.
pub async fn play(playlist_id: String, track: usize, duration: f64) {
    let tracks = match super::playlist::load_playlist(&playlist_id, None).await {
        Ok(tracks) => tracks,
        Err(e) => error!("{}", e),
    };

    let Some(chosen) = tracks.get(track) else {
        error!(
            "Track {} is out of range (playlist has {} tracks)",
            track,
            tracks.len()
        );
    };

    if chosen.is_silent() {
        warning!("\"{}\" has no preview clip; nothing to play", chosen.name);
        return;
    }

    info!(
        "Playing \"{}\" by {} for {:.0} seconds",
        chosen.name,
        chosen.artist_line(),
        duration
    );

    let controller = PlaybackController::new();
    controller.play(chosen, Duration::from_secs_f64(duration));

    sleep(Duration::from_secs_f64(duration)).await;
    while controller.is_playing() {
        sleep(Duration::from_millis(100)).await;
    }
}
