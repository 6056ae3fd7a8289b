use std::{
    io::{self, Write},
    time::Duration,
};

use tokio::time::sleep;

use crate::{
    audio::PlaybackController, error, info, management::ResultManager, success, utils, warning,
};

const POINTS_PER_TRACK: u32 = 10;

/// Runs one guessing round over a playlist and records the aggregate result.
///
/// Per track: show the obscured title and the artists, start the bounded
/// clip playback, take one guess from stdin and compare it against the
/// formatted title. Silent tracks are played "blind" with no clip.
pub async fn game(playlist_id: String, user: String, duration: f64) {
    let tracks = match super::playlist::load_playlist(&playlist_id, None).await {
        Ok(tracks) => tracks,
        Err(e) => error!("{}", e),
    };

    if tracks.is_empty() {
        error!("Playlist is empty, nothing to guess");
    }

    let controller = PlaybackController::new();
    let mut score: u32 = 0;
    let mut correct: u32 = 0;
    let mut incorrect: u32 = 0;

    for (number, track) in tracks.iter().enumerate() {
        println!();
        info!(
            "Track {}/{} by {}",
            number + 1,
            tracks.len(),
            track.artist_line()
        );
        println!("    {}", utils::blank_songname(&track.formatted_name));

        if track.is_silent() {
            warning!("No preview clip for this one; guess blind");
        } else {
            controller.play(track, Duration::from_secs_f64(duration));
        }

        let guess = read_guess();

        if guess.trim().to_lowercase() == track.formatted_name {
            score += POINTS_PER_TRACK;
            correct += 1;
            success!("Correct!");
        } else {
            incorrect += 1;
            warning!("It was \"{}\"", track.formatted_name);
        }

        // Let the current clip hit its bound before the next one starts.
        while controller.is_playing() {
            sleep(Duration::from_millis(100)).await;
        }
    }

    println!();
    success!(
        "Final score for {}: {} ({} correct, {} incorrect)",
        user,
        score,
        correct,
        incorrect
    );

    let mut results = ResultManager::load()
        .await
        .unwrap_or_else(|_| ResultManager::empty());
    if let Err(e) = results.record(&user, score, correct, incorrect).await {
        warning!("Could not save the result: {:?}", e);
    }
}

fn read_guess() -> String {
    print!("  Your guess: ");
    let _ = io::stdout().flush();

    let mut line = String::new();
    let _ = io::stdin().read_line(&mut line);
    line
}
