//! Configuration management for tunequiz.
//!
//! This module handles loading and accessing configuration values from
//! environment variables and a `.env` file in the local data directory. The
//! Spotify client credentials are mandatory and missing them is a fatal
//! startup error; the API endpoints and cache locations carry defaults.

use dotenv;
use std::{env, path::PathBuf};

/// Loads environment variables from a `.env` file in the local data directory.
///
/// Creates the directory structure if it doesn't exist and, when present,
/// loads `tunequiz/.env` from the platform-specific local data directory:
/// - Linux: `~/.local/share/tunequiz/.env`
/// - macOS: `~/Library/Application Support/tunequiz/.env`
/// - Windows: `%LOCALAPPDATA%/tunequiz/.env`
///
/// A missing `.env` file is not an error; configuration may also come from
/// the process environment directly.
pub async fn load_env() -> Result<(), String> {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("tunequiz/.env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    if path.is_file() {
        dotenv::from_path(path).map_err(|e| e.to_string())?;
    }
    Ok(())
}

/// Returns the Spotify API client ID for authentication.
///
/// # Panics
///
/// Panics if the `SPOTIFY_API_AUTH_CLIENT_ID` environment variable is not set.
pub fn spotify_client_id() -> String {
    env::var("SPOTIFY_API_AUTH_CLIENT_ID").expect("SPOTIFY_API_AUTH_CLIENT_ID must be set")
}

/// Returns the Spotify API client secret for authentication.
///
/// # Panics
///
/// Panics if the `SPOTIFY_API_AUTH_CLIENT_SECRET` environment variable is not set.
pub fn spotify_client_secret() -> String {
    env::var("SPOTIFY_API_AUTH_CLIENT_SECRET").expect("SPOTIFY_API_AUTH_CLIENT_SECRET must be set")
}

/// Returns the Spotify Web API base URL.
///
/// Also the probe target for cached-token validation: a `GET` against the
/// bare base URL answers with a JSON error body whose status tells valid
/// credentials apart from rejected ones.
pub fn spotify_apiurl() -> String {
    env::var("SPOTIFY_API_URL").unwrap_or_else(|_| "https://api.spotify.com/v1".to_string())
}

/// Returns the Spotify token exchange URL used for the client-credentials grant.
pub fn spotify_apitoken_url() -> String {
    env::var("SPOTIFY_API_TOKEN_URL")
        .unwrap_or_else(|_| "https://accounts.spotify.com/api/token".to_string())
}

/// Returns the directory preview clips are cached in.
///
/// Defaults to `tunequiz/assets` under the local data directory; the
/// downloader creates it on demand.
pub fn assets_dir() -> PathBuf {
    match env::var("TUNEQUIZ_ASSETS_DIR") {
        Ok(dir) => PathBuf::from(dir),
        Err(_) => {
            let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
            path.push("tunequiz/assets");
            path
        }
    }
}

/// Returns the download worker pool width, default 8.
pub fn download_concurrency() -> usize {
    env::var("TUNEQUIZ_DOWNLOAD_CONCURRENCY")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(crate::download::DEFAULT_CONCURRENCY)
}
