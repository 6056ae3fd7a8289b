use std::fmt;

use reqwest::Client;

use crate::{
    config,
    types::{PlaylistItem, PlaylistResponse, Track, TracksPage},
    utils,
};

#[derive(Debug)]
pub enum FetchError {
    Transport(reqwest::Error),
    Malformed(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        FetchError::Transport(err)
    }
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::Transport(e) => write!(f, "transport error: {e}"),
            FetchError::Malformed(msg) => write!(f, "malformed playlist response: {msg}"),
        }
    }
}

impl std::error::Error for FetchError {}

/// Retrieves all tracks of a playlist from the Spotify Web API.
///
/// Requests the playlist's first page and, only when the reported total
/// exceeds what that page carried, follows the `next` pointers until a page
/// reports none, extending the items in their original order. The merged
/// entries are mapped onto [`Track`] descriptors.
///
/// # Errors
///
/// Any transport or HTTP error fails the whole fetch; there is no
/// partial-result fallback. The caller decides whether to abort the flow.
pub async fn get_playlist_tracks(playlist_id: &str, token: &str) -> Result<Vec<Track>, FetchError> {
    let client = Client::new();
    let api_url = format!(
        "{uri}/playlists/{id}",
        uri = &config::spotify_apiurl(),
        id = playlist_id
    );

    let response = client
        .get(&api_url)
        .bearer_auth(token)
        .send()
        .await?
        .error_for_status()?;

    let playlist = response
        .json::<PlaylistResponse>()
        .await
        .map_err(|e| FetchError::Malformed(e.to_string()))?;

    let total = playlist.tracks.total;
    let mut items = playlist.tracks.items;

    // Only page through the rest when the first page was not enough.
    if total > items.len() as u64 {
        let mut next = playlist.tracks.next;

        while let Some(next_url) = next {
            let page = client
                .get(&next_url)
                .bearer_auth(token)
                .send()
                .await?
                .error_for_status()?
                .json::<TracksPage>()
                .await
                .map_err(|e| FetchError::Malformed(e.to_string()))?;

            next = merge_page(&mut items, page);
        }
    }

    Ok(flatten_items(items))
}

/// Folds one follow-up page into the accumulated entries, order preserved.
///
/// Returns the page's `next` pointer; `None` ends the pagination loop.
pub fn merge_page(items: &mut Vec<PlaylistItem>, page: TracksPage) -> Option<String> {
    items.extend(page.items);
    page.next
}

/// Maps merged playlist entries onto track descriptors, order preserved.
///
/// Entries the provider returned without a track object are dropped, as are
/// tracks without an id (local files); the id names the cache file, so two
/// id-less tracks would otherwise collide on the same path. Artist names are
/// taken from the album's artist list and the title is normalized into its
/// guessing form up front.
pub fn flatten_items(items: Vec<PlaylistItem>) -> Vec<Track> {
    items
        .into_iter()
        .filter_map(|item| {
            let mut raw = item.track?;
            let id = raw.id.take()?;
            let formatted_name = utils::format_songname(&raw.name);
            Some(Track {
                id,
                formatted_name,
                artists: raw.album.artists.into_iter().map(|a| a.name).collect(),
                name: raw.name,
                preview_url: raw.preview_url,
                location: None,
            })
        })
        .collect()
}
