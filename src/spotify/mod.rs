//! # Spotify Integration Module
//!
//! This module is the integration layer between the quiz and the Spotify Web
//! API: it obtains and validates bearer tokens and retrieves full playlists,
//! transparently following the provider's pagination.
//!
//! ## Authentication
//!
//! `auth` implements the client-credentials grant. A previously cached
//! token is validated first with a lightweight probe against the API root;
//! the provider answers that probe with a JSON error body whose `status`
//! field distinguishes an accepted credential (400, the endpoint rejects the
//! verb but not the token) from a rejected one (401). Only when no cached
//! token survives the probe are the client credentials exchanged for a fresh
//! token, which is then persisted for future runs.
//!
//! ## Playlist retrieval
//!
//! `playlist` fetches a playlist by ID. When the playlist fits in the
//! provider's first page no further calls are made; otherwise the page's
//! `next` pointers are followed and the items merged in their original order.
//! Raw entries are mapped onto [`crate::types::Track`] descriptors with the
//! title already run through the song name formatter.
//!
//! ## Error handling
//!
//! Both submodules return typed errors ([`AuthError`], [`FetchError`]). Any
//! transport failure during fetch is unrecoverable for the batch; the CLI
//! layer decides to abort, so no partial playlist ever reaches the game.

mod auth;
mod playlist;

pub use auth::{AuthError, authenticate};
pub use playlist::{FetchError, flatten_items, get_playlist_tracks, merge_page};
