//! # CLI Module
//!
//! The user-facing command layer of tunequiz. Each submodule implements one
//! subcommand and coordinates the Spotify client, the downloader, the
//! playback controller and the local caches:
//!
//! - `auth` - obtain or revalidate the bearer token and cache it
//! - `playlist` - fetch a playlist, fill the clip cache, list the tracks
//! - `play` - play one cached preview clip under its duration bound
//! - `game` - run a guessing round over a playlist and record the result
//! - `results` - show previously recorded game results
//!
//! Commands give feedback through the output macros and indicatif spinners.
//! Library errors surface here, where unrecoverable ones abort the run via
//! `error!`; nothing below this layer terminates the process.

mod auth;
mod game;
mod play;
mod playlist;
mod results;

pub use auth::auth;
pub use game::game;
pub use play::play;
pub use playlist::playlist;
pub use results::results;
