//! Snapshot index of already-generated proxy entries
//!
//! The snapshot tree mirrors the destination tree with zero-byte marker
//! files. A marker's existence is the single source of truth for "already
//! generated"; the destination file itself is never re-checked.

use crate::platform::adapt_path;
use std::path::{Path, PathBuf};
use strmforge_types::{Error, Result};
use tracing::debug;

/// Index of generated proxy entries, backed by a mirrored marker tree
#[derive(Debug, Clone)]
pub struct SnapshotIndex {
    root: PathBuf,
}

impl SnapshotIndex {
    /// Create an index rooted at the snapshot tree
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into() }
    }

    /// Root of the snapshot tree
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Absolute marker path for a sanitized relative proxy key
    pub fn marker_path(&self, key: &Path) -> PathBuf {
        self.root.join(key)
    }

    /// Check whether a proxy entry has already been generated
    pub fn exists(&self, key: &Path) -> bool {
        adapt_path(&self.marker_path(key)).exists()
    }

    /// Record a proxy entry as generated by writing an empty marker
    ///
    /// Parent directories are created as needed. Marking the same key twice
    /// leaves the marker unchanged.
    pub async fn mark_done(&self, key: &Path) -> Result<()> {
        let marker = self.marker_path(key);
        if let Some(parent) = marker.parent() {
            tokio::fs::create_dir_all(adapt_path(parent))
                .await
                .map_err(|e| Error::generation(&marker, e.to_string()))?;
        }
        tokio::fs::write(adapt_path(&marker), b"")
            .await
            .map_err(|e| Error::generation(&marker, e.to_string()))?;
        debug!("snapshot marker written: {}", marker.display());
        Ok(())
    }
}
