//! Concurrent preview clip downloader.
//!
//! Given the track descriptors of a playlist, fills the local clip cache
//! using a bounded worker pool and attaches each track's local file location.
//! Tracks without a preview URL are left untouched and files already present
//! in the cache are reused without network access. Any transport or I/O
//! failure fails the whole batch; a partial playlist is never returned.

use std::{
    fmt,
    path::{Path, PathBuf},
    sync::Arc,
};

use reqwest::Client;
use tokio::{sync::Semaphore, task::JoinSet};

use crate::{config, types::Track};

/// Worker pool width used when the configuration does not say otherwise.
pub const DEFAULT_CONCURRENCY: usize = 8;

#[derive(Debug)]
pub enum DownloadError {
    Transport(reqwest::Error),
    Io(std::io::Error),
    Worker(String),
}

impl From<reqwest::Error> for DownloadError {
    fn from(err: reqwest::Error) -> Self {
        DownloadError::Transport(err)
    }
}

impl From<std::io::Error> for DownloadError {
    fn from(err: std::io::Error) -> Self {
        DownloadError::Io(err)
    }
}

impl fmt::Display for DownloadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DownloadError::Transport(e) => write!(f, "transport error: {e}"),
            DownloadError::Io(e) => write!(f, "file error: {e}"),
            DownloadError::Worker(msg) => write!(f, "worker failed: {msg}"),
        }
    }
}

impl std::error::Error for DownloadError {}

/// Descriptors in their original order plus the number of genuine network
/// downloads that happened. Cache hits and silent tracks don't count.
#[derive(Debug)]
pub struct DownloadReport {
    pub tracks: Vec<Track>,
    pub downloaded: usize,
}

/// Downloads all preview clips into the configured assets directory.
pub async fn download_all(
    tracks: Vec<Track>,
    concurrency: usize,
) -> Result<DownloadReport, DownloadError> {
    download_into(tracks, concurrency, &config::assets_dir()).await
}

/// Downloads all preview clips into `assets_dir` with at most `concurrency`
/// transfers in flight.
///
/// Workers share nothing but the read-only input and their own write-once
/// output slot; target paths are keyed by the unique track ID, so no two
/// workers ever write the same file. The pool is fully drained before this
/// function returns. On the first error the remaining workers are abandoned
/// and the error surfaces immediately.
pub async fn download_into(
    tracks: Vec<Track>,
    concurrency: usize,
    assets_dir: &Path,
) -> Result<DownloadReport, DownloadError> {
    async_fs::create_dir_all(assets_dir).await?;

    let client = Client::new();
    let limiter = Arc::new(Semaphore::new(concurrency.max(1)));
    let mut workers: JoinSet<Result<(usize, Track, bool), DownloadError>> = JoinSet::new();

    let total = tracks.len();
    for (index, mut track) in tracks.into_iter().enumerate() {
        let client = client.clone();
        let limiter = Arc::clone(&limiter);
        let target_dir = assets_dir.to_path_buf();

        workers.spawn(async move {
            // The semaphore is never closed while workers hold it.
            let _permit = limiter.acquire_owned().await.expect("semaphore closed");
            let fetched = download_one(&client, &mut track, &target_dir).await?;
            Ok((index, track, fetched))
        });
    }

    let mut slots: Vec<Option<Track>> = (0..total).map(|_| None).collect();
    let mut downloaded = 0;

    while let Some(joined) = workers.join_next().await {
        // Dropping `workers` on the error path aborts everything still pending.
        let (index, track, fetched) = match joined {
            Ok(outcome) => outcome?,
            Err(e) => return Err(DownloadError::Worker(e.to_string())),
        };

        if fetched {
            downloaded += 1;
        }
        slots[index] = Some(track);
    }

    let tracks = slots.into_iter().flatten().collect();
    Ok(DownloadReport { tracks, downloaded })
}

/// Fetches one preview clip unless the track is silent or already cached.
///
/// Returns whether a network download actually happened.
async fn download_one(
    client: &Client,
    track: &mut Track,
    assets_dir: &Path,
) -> Result<bool, DownloadError> {
    let Some(url) = track.preview_url.clone() else {
        return Ok(false);
    };

    let target = clip_path(assets_dir, &track.id);
    if async_fs::metadata(&target).await.is_ok() {
        track.location = Some(target);
        return Ok(false);
    }

    let bytes = client
        .get(&url)
        .send()
        .await?
        .error_for_status()?
        .bytes()
        .await?;
    async_fs::write(&target, &bytes).await?;
    track.location = Some(target);

    Ok(true)
}

/// Deterministic cache location of a track's clip, keyed by its identity.
pub fn clip_path(assets_dir: &Path, track_id: &str) -> PathBuf {
    assets_dir.join(format!("{track_id}.mp3"))
}
