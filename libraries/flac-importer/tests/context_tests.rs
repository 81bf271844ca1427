//! Integration tests for the library context


use flac_importer::{ImportError, LibraryContext, LibraryScanner};
use flac_storage::CacheStore;
use std::fs;
use tempfile::TempDir;
use test_helpers::{init_logging, write_file, StubExtractor};

async fn open(cache_dir: &std::path::Path) -> LibraryContext {
    LibraryContext::open(
        CacheStore::new(cache_dir),
        LibraryScanner::new(StubExtractor::new()),
    )
    .await
}

#[tokio::test]
async fn scan_merges_and_persists() {
    init_logging();
    let music = TempDir::new().unwrap();
    let cache = TempDir::new().unwrap();
    write_file(music.path(), "a.flac", "ok");
    write_file(music.path(), "sub/b.flac", "ok");
    write_file(music.path(), "c.txt", "ok");

    let mut library = open(cache.path()).await;
    assert!(library.is_empty());

    let report = library.scan(music.path()).await.unwrap();
    assert_eq!(report.added, 2);
    assert!(report.save_error.is_none());
    assert!(!library.is_scanning());

    // A fresh context restores the same catalog
    let reopened = open(cache.path()).await;
    assert_eq!(reopened.catalog(), library.catalog());
    assert!(reopened.cache_issue().is_none());
}

#[tokio::test]
async fn rescan_is_idempotent() {
    let music = TempDir::new().unwrap();
    let cache = TempDir::new().unwrap();
    write_file(music.path(), "a.flac", "ok");
    write_file(music.path(), "b.flac", "ok");

    let mut library = open(cache.path()).await;
    library.scan(music.path()).await.unwrap();
    let before = library.catalog().clone();

    let report = library.scan(music.path()).await.unwrap();

    assert_eq!(report.added, 0);
    assert_eq!(report.skipped_existing, 2);
    assert_eq!(library.catalog(), &before);
}

#[tokio::test]
async fn incremental_scan_keeps_existing_entries() {
    let music = TempDir::new().unwrap();
    let cache = TempDir::new().unwrap();
    for name in ["x.flac", "y.flac", "z.flac"] {
        write_file(music.path(), name, "ok");
    }

    let mut library = open(cache.path()).await;
    library.scan(music.path()).await.unwrap();
    let original: Vec<_> = library.tracks().to_vec();

    let w = write_file(music.path(), "w.flac", "ok");
    let report = library.scan(music.path()).await.unwrap();

    assert_eq!(report.added, 1);
    assert_eq!(library.len(), 4);
    assert_eq!(&library.tracks()[..3], &original[..]);
    assert!(library.find_by_path(&w).is_some());
}

#[tokio::test]
async fn failed_scan_leaves_catalog_untouched() {
    let music = TempDir::new().unwrap();
    let cache = TempDir::new().unwrap();
    write_file(music.path(), "a.flac", "ok");

    let mut library = open(cache.path()).await;
    library.scan(music.path()).await.unwrap();

    let result = library.scan(&music.path().join("gone")).await;

    assert!(matches!(result, Err(ImportError::ScanFailure { .. })));
    assert_eq!(library.len(), 1);
    assert!(!library.is_scanning());
}

#[tokio::test]
async fn save_failure_keeps_tracks_in_memory() {
    let music = TempDir::new().unwrap();
    let cache = TempDir::new().unwrap();
    write_file(music.path(), "a.flac", "ok");
    let blocker = cache.path().join("blocker");
    fs::write(&blocker, b"x").unwrap();

    let mut library = open(&blocker.join("flac-player")).await;
    let report = library.scan(music.path()).await.unwrap();

    assert_eq!(report.added, 1);
    assert!(report.save_error.is_some());
    assert_eq!(library.len(), 1);
}

#[tokio::test]
async fn invalid_cache_opens_empty() {
    let cache = TempDir::new().unwrap();
    fs::write(cache.path().join("library.json"), "{ not json").unwrap();

    let library = open(cache.path()).await;

    assert!(library.is_empty());
    assert!(library.cache_issue().is_some());
}

#[tokio::test]
async fn clear_empties_catalog_and_cache() {
    let music = TempDir::new().unwrap();
    let cache = TempDir::new().unwrap();
    write_file(music.path(), "a.flac", "ok");

    let mut library = open(cache.path()).await;
    library.scan(music.path()).await.unwrap();
    library.clear().await.unwrap();

    assert!(library.is_empty());
    assert!(!library.store().file_path().exists());
    assert!(open(cache.path()).await.is_empty());

    // Clearing twice is fine
    library.clear().await.unwrap();
}

#[tokio::test]
async fn rescan_through_dot_dot_adds_nothing() {
    let music = TempDir::new().unwrap();
    let cache = TempDir::new().unwrap();
    write_file(music.path(), "a.flac", "ok");
    fs::create_dir(music.path().join("sub")).unwrap();

    let mut library = open(cache.path()).await;
    library.scan(music.path()).await.unwrap();

    let report = library
        .scan(&music.path().join("sub").join(".."))
        .await
        .unwrap();

    assert_eq!(report.added, 0);
    assert_eq!(report.skipped_existing, 1);
    assert_eq!(library.len(), 1);
}

#[cfg(unix)]
#[tokio::test]
async fn non_utf8_file_name_stays_a_local_failure() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    init_logging();
    let music = TempDir::new().unwrap();
    let other = TempDir::new().unwrap();
    let cache = TempDir::new().unwrap();
    write_file(music.path(), "a.flac", "ok");
    write_file(other.path(), "c.flac", "ok");
    let odd = music.path().join(OsStr::from_bytes(b"\xffbad.flac"));
    if fs::write(&odd, "ok").is_err() {
        // Filesystem refuses non-UTF-8 names
        return;
    }

    let mut library = open(cache.path()).await;
    let first = library.scan(music.path()).await.unwrap();

    assert_eq!(first.added, 1);
    assert_eq!(first.errors.len(), 1);
    assert_eq!(first.errors[0].path.file_name(), odd.file_name());
    assert!(first.save_error.is_none());

    let second = library.scan(other.path()).await.unwrap();
    assert_eq!(second.added, 1);
    assert!(second.save_error.is_none());

    let reopened = open(cache.path()).await;
    assert!(reopened.cache_issue().is_none());
    assert_eq!(reopened.len(), 2);
    assert_eq!(reopened.catalog(), library.catalog());
}
