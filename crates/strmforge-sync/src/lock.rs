//! Run lock marking a completed synchronization cycle
//!
//! The lock is a text file under the destination root. Its presence alone is
//! meaningful; the content is an opaque status string. A present lock means
//! the destination tree is already materialized (by a full flush or a fresh
//! restore) and regeneration can be skipped after a process restart. There
//! is no automatic removal; [`RunLock::remove`] exists for manual resets.

use std::path::{Path, PathBuf};
use strmforge_types::Result;
use tracing::debug;

/// File name of the run lock under the destination root
pub const LOCK_FILE_NAME: &str = "strm.lock";

/// Marker file recording that a synchronization cycle completed
#[derive(Debug, Clone)]
pub struct RunLock {
    path: PathBuf,
}

impl RunLock {
    /// Create a run lock under the given destination root
    pub fn new<P: AsRef<Path>>(dest_root: P) -> Self {
        Self {
            path: dest_root.as_ref().join(LOCK_FILE_NAME),
        }
    }

    /// Path of the lock file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Check whether the lock is present
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Write the lock with an opaque status string
    pub async fn write(&self, status: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&self.path, status).await?;
        debug!("run lock written: {}", self.path.display());
        Ok(())
    }

    /// Remove the lock if present (manual cycle reset)
    pub async fn remove(&self) -> Result<()> {
        if self.path.exists() {
            tokio::fs::remove_file(&self.path).await?;
            debug!("run lock removed: {}", self.path.display());
        }
        Ok(())
    }
}
