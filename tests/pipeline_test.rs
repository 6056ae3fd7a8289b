use std::{
    path::{Path, PathBuf},
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
    thread,
    time::{Duration, Instant},
};

use tempfile::tempdir;
use tunequiz::audio::{ClipRenderer, PlaybackController, PlaybackError};
use tunequiz::download::{self, clip_path};
use tunequiz::spotify::{flatten_items, merge_page};
use tunequiz::types::{AlbumArtist, AlbumInfo, PlaylistItem, PlaylistTrack, Track, TracksPage};

// Helper to build a track descriptor as the fetcher would
fn test_track(id: &str, preview_url: Option<&str>, location: Option<PathBuf>) -> Track {
    Track {
        id: id.to_string(),
        name: id.to_string(),
        formatted_name: id.to_string(),
        artists: vec!["Artist".to_string()],
        preview_url: preview_url.map(str::to_string),
        location,
    }
}

fn test_item(id: Option<&str>, name: &str, preview_url: Option<&str>) -> PlaylistItem {
    PlaylistItem {
        track: Some(PlaylistTrack {
            id: id.map(str::to_string),
            name: name.to_string(),
            preview_url: preview_url.map(str::to_string),
            album: AlbumInfo {
                artists: vec![
                    AlbumArtist {
                        name: "First".to_string(),
                    },
                    AlbumArtist {
                        name: "Second".to_string(),
                    },
                ],
            },
        }),
    }
}

#[test]
fn test_flatten_preserves_order_and_drops_null_entries() {
    let items = vec![
        test_item(Some("a"), "Alpha", Some("http://example.invalid/a")),
        PlaylistItem { track: None },
        test_item(Some("b"), "Beta", None),
        test_item(Some("c"), "Gamma (Live)", Some("http://example.invalid/c")),
    ];

    let tracks = flatten_items(items);

    // The null entry is gone, everything else keeps its position
    assert_eq!(tracks.len(), 3);
    let ids: Vec<&str> = tracks.iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, vec!["a", "b", "c"]);

    // Titles are normalized up front, artists joined for display
    assert_eq!(tracks[2].formatted_name, "gamma");
    assert_eq!(tracks[0].artist_line(), "First & Second");

    // No track has a location before the downloader ran
    assert!(tracks.iter().all(|t| t.location.is_none()));
}

#[test]
fn test_flatten_drops_tracks_without_an_id() {
    // Local files come back with a null id; they must not reach the
    // downloader, where the id names the cache file
    let items = vec![
        test_item(Some("a"), "Alpha", None),
        test_item(None, "Local File", None),
        test_item(None, "Another Local File", None),
        test_item(Some("b"), "Beta", None),
    ];

    let tracks = flatten_items(items);

    let ids: Vec<&str> = tracks.iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, vec!["a", "b"]);
}

#[test]
fn test_pagination_merges_successive_pages_in_order() {
    let page = |ids: &[&str], next: Option<&str>, total: u64| TracksPage {
        items: ids
            .iter()
            .copied()
            .map(|id| test_item(Some(id), id, None))
            .collect(),
        next: next.map(str::to_string),
        total,
    };

    // First page reports five entries in total, carrying two of them
    let first = page(&["a", "b"], Some("page-2"), 5);
    let mut followups = vec![
        page(&["c", "d"], Some("page-3"), 5),
        page(&["e"], None, 5),
    ]
    .into_iter();

    let total = first.total;
    let mut items = first.items;
    let mut next = first.next;
    while let Some(url) = next {
        assert!(!url.is_empty());
        next = merge_page(&mut items, followups.next().expect("page for every next pointer"));
    }

    // Every page was consumed, the merge covered the reported total and
    // nothing got reordered along the way
    assert!(followups.next().is_none());
    assert_eq!(items.len() as u64, total);
    let ids: Vec<String> = flatten_items(items).into_iter().map(|t| t.id).collect();
    assert_eq!(ids, vec!["a", "b", "c", "d", "e"]);
}

#[tokio::test]
async fn test_download_skips_tracks_without_preview_url() {
    let dir = tempdir().expect("tempdir");

    let tracks = vec![test_track("silent", None, None)];
    let report = download::download_into(tracks, 4, dir.path())
        .await
        .expect("batch should succeed");

    // No URL means no network attempt and no location, ever
    assert_eq!(report.downloaded, 0);
    assert!(report.tracks[0].location.is_none());
}

#[tokio::test]
async fn test_download_reuses_cached_files_and_keeps_order() {
    let dir = tempdir().expect("tempdir");

    // Seed the cache; the URLs would fail instantly if anything fetched them
    for id in ["one", "two", "three"] {
        std::fs::write(clip_path(dir.path(), id), b"mp3").expect("seed cache");
    }

    let tracks = vec![
        test_track("one", Some("http://127.0.0.1:1/one.mp3"), None),
        test_track("silent", None, None),
        test_track("two", Some("http://127.0.0.1:1/two.mp3"), None),
        test_track("three", Some("http://127.0.0.1:1/three.mp3"), None),
    ];

    let report = download::download_into(tracks, 4, dir.path())
        .await
        .expect("batch should succeed");

    assert_eq!(report.downloaded, 0);

    let ids: Vec<&str> = report.tracks.iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, vec!["one", "silent", "two", "three"]);

    assert_eq!(
        report.tracks[0].location.as_deref(),
        Some(clip_path(dir.path(), "one").as_path())
    );
    assert!(report.tracks[1].location.is_none());

    // A second run over the same input is a pure cache walk
    let again = download::download_into(report.tracks.clone(), 4, dir.path())
        .await
        .expect("batch should succeed");
    assert_eq!(again.downloaded, 0);
    assert_eq!(
        again.tracks[3].location.as_deref(),
        Some(clip_path(dir.path(), "three").as_path())
    );
}

#[tokio::test]
async fn test_download_failure_fails_the_whole_batch() {
    let dir = tempdir().expect("tempdir");

    // Nothing listens on this port, so the fetch errors out immediately
    let tracks = vec![test_track(
        "broken",
        Some("http://127.0.0.1:1/broken.mp3"),
        None,
    )];

    let result = download::download_into(tracks, 4, dir.path()).await;
    assert!(result.is_err());
}

struct StubRenderer {
    calls: Arc<AtomicUsize>,
    busy: Duration,
}

impl ClipRenderer for StubRenderer {
    fn render(&self, _clip: &Path, duration: Duration) -> Result<(), PlaybackError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        thread::sleep(self.busy.min(duration));
        Ok(())
    }
}

struct FailingRenderer;

impl ClipRenderer for FailingRenderer {
    fn render(&self, _clip: &Path, _duration: Duration) -> Result<(), PlaybackError> {
        Err(PlaybackError::Decode("not an audio file".to_string()))
    }
}

fn stub_controller(busy: Duration) -> (PlaybackController, Arc<AtomicUsize>) {
    let calls = Arc::new(AtomicUsize::new(0));
    let renderer = StubRenderer {
        calls: Arc::clone(&calls),
        busy,
    };
    (PlaybackController::with_renderer(Arc::new(renderer)), calls)
}

#[tokio::test]
async fn test_play_is_a_noop_for_silent_tracks() {
    let (controller, calls) = stub_controller(Duration::from_millis(100));
    let silent = test_track("silent", None, None);

    controller.play(&silent, Duration::from_secs(1));
    tokio::time::sleep(Duration::from_millis(100)).await;

    assert_eq!(calls.load(Ordering::SeqCst), 0);
    assert!(!controller.is_playing());
}

#[tokio::test]
async fn test_play_returns_immediately() {
    let (controller, _calls) = stub_controller(Duration::from_millis(500));
    let track = test_track("clip", None, Some(PathBuf::from("clip.mp3")));

    let start = Instant::now();
    controller.play(&track, Duration::from_secs(1));
    assert!(start.elapsed() < Duration::from_millis(200));
    assert!(controller.is_playing());
}

#[tokio::test]
async fn test_second_play_is_dropped_while_one_is_active() {
    let (controller, calls) = stub_controller(Duration::from_millis(400));
    let track = test_track("clip", None, Some(PathBuf::from("clip.mp3")));

    controller.play(&track, Duration::from_secs(1));
    controller.play(&track, Duration::from_secs(1));
    controller.play(&track, Duration::from_secs(1));

    tokio::time::sleep(Duration::from_millis(700)).await;

    // Only the first request got a renderer session
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert!(!controller.is_playing());

    // Idle again, so a new request is accepted
    controller.play(&track, Duration::from_secs(1));
    tokio::time::sleep(Duration::from_millis(700)).await;
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_session_is_bounded_by_the_requested_duration() {
    // The stub would stay busy for 10 seconds, the duration caps it
    let (controller, _calls) = stub_controller(Duration::from_secs(10));
    let track = test_track("clip", None, Some(PathBuf::from("clip.mp3")));

    controller.play(&track, Duration::from_millis(200));
    tokio::time::sleep(Duration::from_millis(600)).await;

    assert!(!controller.is_playing());
}

#[tokio::test]
async fn test_renderer_failure_returns_the_controller_to_idle() {
    let controller = PlaybackController::with_renderer(Arc::new(FailingRenderer));
    let track = test_track("clip", None, Some(PathBuf::from("clip.mp3")));

    controller.play(&track, Duration::from_secs(1));
    tokio::time::sleep(Duration::from_millis(300)).await;

    assert!(!controller.is_playing());

    // The failure was absorbed; the controller accepts the next request
    controller.play(&track, Duration::from_secs(1));
    assert!(controller.is_playing());
}
