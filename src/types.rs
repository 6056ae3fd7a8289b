use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tabled::Tabled;

/// One playlist entry carried through fetch, download and playback.
///
/// `location` is set exactly once, by the downloader, and only when a
/// download attempt succeeded for a track that has a preview URL. A track
/// without a preview URL stays silent for the whole session.
#[derive(Debug, Clone)]
pub struct Track {
    pub id: String,
    /// Title as the provider reports it.
    pub name: String,
    /// Canonical guessing form of the title, see [`crate::utils::format_songname`].
    pub formatted_name: String,
    pub artists: Vec<String>,
    pub preview_url: Option<String>,
    pub location: Option<PathBuf>,
}

impl Track {
    /// Artist names joined for display.
    pub fn artist_line(&self) -> String {
        self.artists.join(" & ")
    }

    /// True when no local clip exists for this track.
    pub fn is_silent(&self) -> bool {
        self.location.is_none()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlaylistResponse {
    pub tracks: TracksPage,
}

/// One page of playlist entries plus the pointer to the next page.
#[derive(Debug, Clone, Deserialize)]
pub struct TracksPage {
    pub items: Vec<PlaylistItem>,
    pub next: Option<String>,
    pub total: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlaylistItem {
    pub track: Option<PlaylistTrack>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlaylistTrack {
    pub id: Option<String>,
    pub name: String,
    pub preview_url: Option<String>,
    pub album: AlbumInfo,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AlbumInfo {
    pub artists: Vec<AlbumArtist>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AlbumArtist {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
}

/// Error envelope the API wraps failed requests in.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorEnvelope {
    pub error: ApiErrorBody,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    pub status: u16,
    pub message: Option<String>,
}

/// Aggregate outcome of one finished quiz round.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameResult {
    pub user: String,
    pub score: u32,
    pub correct: u32,
    pub incorrect: u32,
    pub recorded_at: String,
}

#[derive(Tabled)]
pub struct TrackTableRow {
    pub title: String,
    pub artists: String,
    pub clip: String,
}

#[derive(Tabled)]
pub struct ResultTableRow {
    pub date: String,
    pub user: String,
    pub score: u32,
    pub correct: u32,
    pub incorrect: u32,
}
