//! Filesystem event publisher for source trees
//!
//! Independent publisher of create/modify/delete/move events. The main
//! flush flow does not consume these events; the watcher exists for
//! tooling that wants to observe a library between runs, without any
//! coupling to the walk/generate logic.

use notify::event::{ModifyKind, RenameMode};
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use strmforge_types::{Error, Result};
use tokio::sync::mpsc;
use tracing::{debug, info};

/// One filesystem event observed under a watched source tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WatchEvent {
    /// A file or directory was created
    Created(PathBuf),
    /// A file or directory was modified
    Modified(PathBuf),
    /// A file or directory was deleted
    Deleted(PathBuf),
    /// A file or directory was moved
    Moved {
        /// Previous path
        from: PathBuf,
        /// New path
        to: PathBuf,
    },
}

/// Watcher publishing filesystem events for one source tree
pub struct SourceWatcher {
    // Kept alive for the lifetime of the subscription
    _watcher: RecommendedWatcher,
    rx: mpsc::UnboundedReceiver<WatchEvent>,
}

impl std::fmt::Debug for SourceWatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourceWatcher").finish_non_exhaustive()
    }
}

impl SourceWatcher {
    /// Start watching a source tree recursively
    pub fn watch<P: AsRef<Path>>(path: P) -> Result<Self> {
        let (tx, rx) = mpsc::unbounded_channel();

        let mut watcher =
            notify::recommended_watcher(move |event: notify::Result<Event>| match event {
                Ok(event) => {
                    for mapped in Self::map_event(event) {
                        let _ = tx.send(mapped);
                    }
                }
                Err(e) => debug!("watch error: {}", e),
            })
            .map_err(|e| Error::other(format!("failed to create watcher: {}", e)))?;

        watcher
            .watch(path.as_ref(), RecursiveMode::Recursive)
            .map_err(|e| Error::other(format!("failed to watch {}: {}", path.as_ref().display(), e)))?;

        info!("watching {}", path.as_ref().display());
        Ok(Self {
            _watcher: watcher,
            rx,
        })
    }

    /// Receive the next event, or `None` once the watcher stops
    pub async fn next_event(&mut self) -> Option<WatchEvent> {
        self.rx.recv().await
    }

    fn map_event(event: Event) -> Vec<WatchEvent> {
        match event.kind {
            EventKind::Create(_) => event.paths.into_iter().map(WatchEvent::Created).collect(),
            EventKind::Remove(_) => event.paths.into_iter().map(WatchEvent::Deleted).collect(),
            EventKind::Modify(ModifyKind::Name(RenameMode::Both)) => {
                let mut paths = event.paths.into_iter();
                match (paths.next(), paths.next()) {
                    (Some(from), Some(to)) => vec![WatchEvent::Moved { from, to }],
                    _ => Vec::new(),
                }
            }
            EventKind::Modify(_) => event.paths.into_iter().map(WatchEvent::Modified).collect(),
            _ => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_watcher_observes_created_file() {
        let temp_dir = TempDir::new().unwrap();
        let mut watcher = SourceWatcher::watch(temp_dir.path()).unwrap();

        std::fs::write(temp_dir.path().join("ep1.mkv"), b"payload").unwrap();

        let event = tokio::time::timeout(Duration::from_secs(5), watcher.next_event())
            .await
            .expect("no event within timeout")
            .expect("watcher closed");

        match event {
            WatchEvent::Created(path) | WatchEvent::Modified(path) => {
                assert!(path.ends_with("ep1.mkv"));
            }
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[test]
    fn test_map_rename_event() {
        let event = Event {
            kind: EventKind::Modify(ModifyKind::Name(RenameMode::Both)),
            paths: vec![PathBuf::from("/a/old.mkv"), PathBuf::from("/a/new.mkv")],
            attrs: Default::default(),
        };
        assert_eq!(
            SourceWatcher::map_event(event),
            vec![WatchEvent::Moved {
                from: PathBuf::from("/a/old.mkv"),
                to: PathBuf::from("/a/new.mkv"),
            }]
        );
    }
}
