use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use tabled::Table;

use crate::{
    config, download, error, info, spotify, success,
    types::{Track, TrackTableRow},
    utils,
};

/// Fetches a playlist, fills the clip cache and prints the obscured track
/// listing the game would present.
pub async fn playlist(playlist_id: String, concurrency: Option<usize>) {
    let tracks = match load_playlist(&playlist_id, concurrency).await {
        Ok(tracks) => tracks,
        Err(e) => error!("{}", e),
    };

    let rows: Vec<TrackTableRow> = tracks
        .iter()
        .map(|t| TrackTableRow {
            title: utils::blank_songname(&t.formatted_name),
            artists: t.artist_line(),
            clip: if t.is_silent() { "silent" } else { "cached" }.to_string(),
        })
        .collect();

    println!("{}", Table::new(rows));
}

/// Fetches the playlist's descriptors and populates their local clip
/// locations. Shared by the playlist, play and game commands.
pub(crate) async fn load_playlist(
    playlist_id: &str,
    concurrency: Option<usize>,
) -> Result<Vec<Track>, String> {
    let token = spotify::authenticate()
        .await
        .map_err(|e| format!("Authentication failed: {}", e))?;

    let pb = spinner("Fetching playlist...");
    let tracks = match spotify::get_playlist_tracks(playlist_id, &token).await {
        Ok(tracks) => tracks,
        Err(e) => {
            pb.finish_and_clear();
            return Err(format!("Cannot fetch playlist: {}", e));
        }
    };
    pb.finish_and_clear();
    info!("Playlist has {} tracks", tracks.len());

    let pb = spinner("Downloading preview clips...");
    let concurrency = concurrency.unwrap_or_else(config::download_concurrency);
    let report = match download::download_all(tracks, concurrency).await {
        Ok(report) => report,
        Err(e) => {
            pb.finish_and_clear();
            return Err(format!("Cannot download preview clips: {}", e));
        }
    };
    pb.finish_and_clear();
    success!("Downloaded {} new files", report.downloaded);

    Ok(report.tracks)
}

fn spinner(message: &'static str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );
    pb
}
