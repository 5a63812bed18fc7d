//! Integration tests for the local feed cache against the file store

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, Utc};
use futures::future::join_all;
use tempfile::TempDir;
use url::Url;
use uuid::Uuid;

use feedcache::cache::{FeedStore, FileFeedStore, LocalFeedLoader};
use feedcache::feed::FeedImage;

type Clock = Arc<Mutex<DateTime<Utc>>>;

fn make_sut(temp_dir: &TempDir, clock: &Clock) -> LocalFeedLoader<FileFeedStore> {
    let store = FileFeedStore::new(temp_dir.path().join("feed.store"));
    let clock = clock.clone();
    LocalFeedLoader::new(store, move || *clock.lock().unwrap())
}

fn unique_feed(len: usize) -> Vec<FeedImage> {
    (0..len)
        .map(|i| {
            FeedImage::new(
                Uuid::new_v4(),
                Some(format!("description {}", i)),
                None,
                Url::parse(&format!("https://any-url.com/{}.jpg", i)).unwrap(),
            )
        })
        .collect()
}

fn clock() -> Clock {
    Arc::new(Mutex::new(Utc::now()))
}

#[tokio::test]
async fn test_load_delivers_no_items_on_empty_cache() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let sut = make_sut(&temp_dir, &clock());

    let feed = sut.load().await.expect("Expected successful feed result");

    assert!(feed.is_empty(), "Expected empty feed");
}

#[tokio::test]
async fn test_load_delivers_items_saved_on_a_separate_instance() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let clock = clock();
    let sut_to_save = make_sut(&temp_dir, &clock);
    let sut_to_load = make_sut(&temp_dir, &clock);
    let feed = unique_feed(5);

    sut_to_save.save(&feed).await.expect("Save should succeed");

    assert_eq!(sut_to_load.load().await.unwrap(), feed);
}

#[tokio::test]
async fn test_save_overrides_items_saved_on_a_separate_instance() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let clock = clock();
    let first_sut = make_sut(&temp_dir, &clock);
    let last_sut = make_sut(&temp_dir, &clock);
    let latest = unique_feed(2);

    first_sut.save(&unique_feed(3)).await.unwrap();
    last_sut.save(&latest).await.unwrap();

    assert_eq!(make_sut(&temp_dir, &clock).load().await.unwrap(), latest);
}

#[tokio::test]
async fn test_load_after_max_age_delivers_empty_and_removes_record() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let clock = clock();
    let sut = make_sut(&temp_dir, &clock);

    sut.save(&unique_feed(1)).await.unwrap();
    *clock.lock().unwrap() += Duration::days(7) + Duration::seconds(1);

    assert!(sut.load().await.unwrap().is_empty());
    assert!(sut.store().retrieve().await.unwrap().is_none());
}

#[tokio::test]
async fn test_validate_cache_keeps_fresh_and_removes_expired_record() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let clock = clock();
    let sut = make_sut(&temp_dir, &clock);
    let feed = unique_feed(2);

    sut.save(&feed).await.unwrap();
    sut.validate_cache().await.unwrap();
    assert_eq!(sut.load().await.unwrap(), feed);

    *clock.lock().unwrap() += Duration::days(30);
    sut.validate_cache().await.unwrap();

    assert!(sut.store().retrieve().await.unwrap().is_none());
    assert!(sut.load().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_load_fails_on_corrupted_record() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let sut = make_sut(&temp_dir, &clock());
    std::fs::write(temp_dir.path().join("feed.store"), "garbage").unwrap();

    assert!(sut.load().await.is_err(), "Corrupted cache should not load as empty");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_saves_and_loads_never_observe_torn_feeds() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let sut = Arc::new(make_sut(&temp_dir, &clock()));
    let feeds: Vec<Vec<FeedImage>> = (1..=6).map(|n| unique_feed(n * 25)).collect();

    let saves: Vec<_> = feeds
        .clone()
        .into_iter()
        .map(|feed| {
            let sut = sut.clone();
            tokio::spawn(async move { sut.save(&feed).await })
        })
        .collect();
    let loads: Vec<_> = (0..24)
        .map(|_| {
            let sut = sut.clone();
            tokio::spawn(async move { sut.load().await })
        })
        .collect();

    for save in join_all(saves).await {
        save.unwrap().expect("Save should succeed");
    }
    for load in join_all(loads).await {
        let feed = load.unwrap().expect("Load should succeed");
        assert!(
            feed.is_empty() || feeds.contains(&feed),
            "Load observed a feed that was never saved"
        );
    }

    let last = sut.load().await.unwrap();
    assert!(feeds.contains(&last), "A completed save should be observable");
}
