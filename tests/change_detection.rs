// tests/change_detection.rs

mod common;
use crate::common::init_tracing;

use std::error::Error;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use watchdo::errors::WatchdoError;
use watchdo::fs::mock::MockFileSystem;
use watchdo::fs::RealFileSystem;
use watchdo::types::WatchMethod;
use watchdo::watch::{compute_file_hash, modification_time, FileWatcher};

type TestResult = Result<(), Box<dyn Error>>;

#[test]
fn first_check_never_reports_a_change() -> TestResult {
    init_tracing();
    let fs = MockFileSystem::new();
    fs.add_file("a.txt", "Hello");

    for method in WatchMethod::ALL {
        let mut watcher = FileWatcher::new(Arc::new(fs.clone()), method, "a.txt");
        assert!(!watcher.has_changed()?, "{method} reported a change on first check");
        assert!(watcher.last_value().is_some());
    }
    Ok(())
}

#[test]
fn first_check_of_a_missing_file_is_quiet() -> TestResult {
    let fs = Arc::new(MockFileSystem::new());

    let mut watcher = FileWatcher::new(fs, WatchMethod::Hash, "ghost.txt");

    assert!(!watcher.has_changed()?);
    assert_eq!(watcher.last_value(), None);
    Ok(())
}

#[test]
fn hash_watcher_reports_content_changes_once() -> TestResult {
    let fs = MockFileSystem::new();
    fs.add_file("a.txt", "Hello");
    let mut watcher = FileWatcher::new(Arc::new(fs.clone()), WatchMethod::Hash, "a.txt");

    assert!(!watcher.has_changed()?);
    fs.add_file("a.txt", "World");
    assert!(watcher.has_changed()?);
    assert!(!watcher.has_changed()?);
    Ok(())
}

#[test]
fn hash_watcher_ignores_rewrites_with_identical_content() -> TestResult {
    let fs = MockFileSystem::new();
    fs.add_file("a.txt", "same");
    let mut hash = FileWatcher::new(Arc::new(fs.clone()), WatchMethod::Hash, "a.txt");
    let mut mtime =
        FileWatcher::new(Arc::new(fs.clone()), WatchMethod::ModificationTime, "a.txt");
    hash.has_changed()?;
    mtime.has_changed()?;

    fs.add_file("a.txt", "same");

    assert!(!hash.has_changed()?);
    assert!(mtime.has_changed()?);
    Ok(())
}

#[test]
fn mtime_watcher_reports_touches() -> TestResult {
    let fs = MockFileSystem::new();
    fs.add_file("a.txt", "x");
    let mut watcher =
        FileWatcher::new(Arc::new(fs.clone()), WatchMethod::ModificationTime, "a.txt");

    assert!(!watcher.has_changed()?);
    assert!(!watcher.has_changed()?);
    fs.touch("a.txt");
    assert!(watcher.has_changed()?);
    Ok(())
}

#[test]
fn vanished_file_is_file_not_found_after_first_check() -> TestResult {
    let fs = MockFileSystem::new();
    fs.add_file("a.txt", "x");
    let mut watcher = FileWatcher::new(Arc::new(fs.clone()), WatchMethod::Hash, "a.txt");
    watcher.has_changed()?;

    fs.remove("a.txt");

    match watcher.has_changed() {
        Err(WatchdoError::FileNotFound { path }) => assert_eq!(path, watcher.file_name()),
        other => panic!("expected FileNotFound, got {other:?}"),
    }
    assert_eq!(watcher.last_value(), None);

    // Coming back counts as a change.
    fs.add_file("a.txt", "x");
    assert!(watcher.has_changed()?);
    Ok(())
}

#[test]
fn blake3_digest_of_known_content() -> TestResult {
    let fs = MockFileSystem::new();
    fs.add_file("test.txt", b"hello world".to_vec());

    let hash = compute_file_hash(&fs, Path::new("test.txt"))?;

    assert_eq!(
        hash,
        "d74981efa70a0c880b8d8c1985d075dbcbf679b99a5f9914e5aaf96b831a9e24"
    );
    Ok(())
}

#[test]
fn modification_time_round_trips_through_a_string() -> TestResult {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("file.txt");
    fs::write(&path, "content")?;

    let observed = modification_time(&RealFileSystem, &path)?;
    let expected = fs::metadata(&path)?
        .modified()?
        .duration_since(UNIX_EPOCH)?
        .as_secs_f64();

    assert_eq!(observed.parse::<f64>()?, expected);
    Ok(())
}

#[test]
fn real_file_mtime_change_is_detected() -> TestResult {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("file.txt");
    fs::write(&path, "content")?;

    let mut watcher = FileWatcher::new(
        Arc::new(RealFileSystem),
        WatchMethod::ModificationTime,
        path.clone(),
    );
    assert!(!watcher.has_changed()?);

    let file = fs::File::options().write(true).open(&path)?;
    file.set_modified(SystemTime::now() + Duration::from_secs(60))?;
    drop(file);

    assert!(watcher.has_changed()?);
    assert!(!watcher.has_changed()?);
    Ok(())
}
