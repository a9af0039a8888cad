//! Integration tests for the strmforge engine
//!
//! These tests drive full run cycles over real temporary trees and verify
//! the generated destination against the source library.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use strmforge_config::{FormatTable, Profile, SourceRoot};
use strmforge_engine::{SyncEngine, SyncOrchestrator};
use strmforge_sync::RunLock;

fn profile(temp_dir: &TempDir, roots: &[&str]) -> Profile {
    Profile {
        server: "http://media.local:5244".to_string(),
        paths: roots.iter().map(|r| SourceRoot::new(*r)).collect(),
        formats: FormatTable {
            video: vec!["mkv".to_string(), "mp4".to_string()],
            image: vec!["jpg".to_string(), "png".to_string()],
            other: vec!["srt".to_string(), "nfo".to_string()],
        },
        dest_path: temp_dir.path().join("strm"),
        snapshot_path: temp_dir.path().join("strm/.snapshot"),
        source_path: temp_dir.path().join("media"),
        ..Profile::default()
    }
}

fn write_file(path: &Path, content: &[u8]) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

/// Snapshot a tree as a map of relative path to file content
fn tree_contents(root: &Path) -> BTreeMap<PathBuf, Vec<u8>> {
    let mut contents = BTreeMap::new();
    let mut stack = vec![root.to_path_buf()];
    while let Some(dir) = stack.pop() {
        for entry in fs::read_dir(&dir).unwrap() {
            let entry = entry.unwrap();
            let path = entry.path();
            if path.is_dir() {
                stack.push(path);
            } else {
                let rel = path.strip_prefix(root).unwrap().to_path_buf();
                contents.insert(rel, fs::read(&path).unwrap());
            }
        }
    }
    contents
}

#[tokio::test]
async fn test_full_run_generates_proxies_and_copies_assets() {
    let temp_dir = TempDir::new().unwrap();
    let media = temp_dir.path().join("media");
    write_file(
        &media.join("shows/Show/Season 01/ep1.mkv"),
        b"video payload",
    );
    write_file(&media.join("shows/Show/Season 01/ep1.srt"), b"subtitles");
    write_file(&media.join("shows/Show/Season 01/cover.jpg"), b"jpeg bytes");

    let engine = SyncEngine::new(profile(&temp_dir, &["shows"]));
    let stats = engine.run().await.unwrap().expect("flush should run");

    assert_eq!(stats.proxies_created, 1);
    assert_eq!(stats.files_copied, 2);
    assert_eq!(stats.errors, 0);

    let strm = temp_dir.path().join("strm/shows/Show/Season 01/ep1.strm");
    let url = fs::read_to_string(&strm).unwrap();
    assert_eq!(url, "http://media.local:5244/shows/Show/Season%2001/ep1.mkv");

    let cover = temp_dir.path().join("strm/shows/Show/Season 01/cover.jpg");
    assert_eq!(fs::read(&cover).unwrap(), b"jpeg bytes");

    assert!(RunLock::new(temp_dir.path().join("strm")).exists());
}

#[tokio::test]
async fn test_double_flush_produces_identical_tree() {
    let temp_dir = TempDir::new().unwrap();
    let media = temp_dir.path().join("media");
    write_file(&media.join("movies/Film (2020)/film.mkv"), b"payload");
    write_file(&media.join("movies/Film (2020)/poster.png"), b"png bytes");
    write_file(&media.join("movies/Other: Film/other.mp4"), b"payload");

    let orchestrator =
        SyncOrchestrator::new(std::sync::Arc::new(profile(&temp_dir, &["movies"])));

    orchestrator.flush_all(None).await;
    let first = tree_contents(&temp_dir.path().join("strm"));

    orchestrator.flush_all(None).await;
    let second = tree_contents(&temp_dir.path().join("strm"));

    assert_eq!(first, second);
    assert!(first
        .keys()
        .any(|p| p == Path::new("movies/Other_ Film/other.strm")));
}

#[tokio::test]
async fn test_double_flush_with_default_layout_regenerates_every_proxy() {
    let temp_dir = TempDir::new().unwrap();
    write_file(
        &temp_dir.path().join("media/shows/Show/Season 01/ep1.mkv"),
        b"payload",
    );

    // Destination and snapshot in their default relative arrangement,
    // re-rooted at the temp dir.
    let defaults = Profile::default();
    let profile = Profile {
        server: "http://media.local:5244".to_string(),
        paths: vec![SourceRoot::new("shows")],
        formats: FormatTable {
            video: vec!["mkv".to_string()],
            image: vec![],
            other: vec![],
        },
        dest_path: temp_dir.path().join(&defaults.dest_path),
        snapshot_path: temp_dir.path().join(&defaults.snapshot_path),
        source_path: temp_dir.path().join("media"),
        ..Profile::default()
    };
    let orchestrator = SyncOrchestrator::new(std::sync::Arc::new(profile));

    let first = orchestrator.flush_all(None).await;
    assert_eq!(first.proxies_created, 1);

    // Clearing the destination clears the markers with it, so the second
    // flush rewrites the proxy instead of skipping everything.
    let second = orchestrator.flush_all(None).await;
    assert_eq!(second.proxies_created, 1);
    assert_eq!(second.proxies_skipped, 0);

    let strm = temp_dir.path().join("strm/shows/Show/Season 01/ep1.strm");
    let url = fs::read_to_string(strm).unwrap();
    assert_eq!(url, "http://media.local:5244/shows/Show/Season%2001/ep1.mkv");
}

#[tokio::test]
async fn test_present_lock_leaves_destination_untouched() {
    let temp_dir = TempDir::new().unwrap();
    write_file(
        &temp_dir.path().join("media/shows/Show/Season 01/ep1.mkv"),
        b"payload",
    );

    let lock = RunLock::new(temp_dir.path().join("strm"));
    lock.write("done").await.unwrap();
    let before = tree_contents(&temp_dir.path().join("strm"));

    let engine = SyncEngine::new(profile(&temp_dir, &["shows"]));
    let result = engine.run().await.unwrap();

    assert!(result.is_none());
    assert_eq!(before, tree_contents(&temp_dir.path().join("strm")));
}

#[tokio::test]
async fn test_multi_root_run_merges_statistics() {
    let temp_dir = TempDir::new().unwrap();
    let media = temp_dir.path().join("media");
    write_file(&media.join("movies/Film A/a.mkv"), b"payload");
    write_file(&media.join("movies/Film B/b.mkv"), b"payload");
    write_file(&media.join("shows/Show/Season 01/ep1.mkv"), b"payload");
    write_file(&media.join("shows/Show/Season 01/ep2.mkv"), b"payload");
    write_file(&media.join("shows/Show/Season 01/ep3.mkv"), b"payload");

    let engine = SyncEngine::new(profile(&temp_dir, &["movies", "shows"]));
    let stats = engine.run().await.unwrap().expect("flush should run");

    assert_eq!(stats.proxies_created, 5);
    assert_eq!(stats.files_processed(), 5);
    assert_eq!(stats.errors, 0);
}

#[tokio::test]
async fn test_files_in_non_leaf_directories_are_not_processed() {
    let temp_dir = TempDir::new().unwrap();
    let media = temp_dir.path().join("media");
    // Show/ contains a season directory, so its direct files are skipped
    write_file(&media.join("shows/Show/folder.jpg"), b"artwork");
    write_file(&media.join("shows/Show/Season 01/ep1.mkv"), b"payload");

    let engine = SyncEngine::new(profile(&temp_dir, &["shows"]));
    let stats = engine.run().await.unwrap().expect("flush should run");

    assert_eq!(stats.proxies_created, 1);
    assert_eq!(stats.files_copied, 0);
    assert!(!temp_dir.path().join("strm/shows/Show/folder.jpg").exists());
}
