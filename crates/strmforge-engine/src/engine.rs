//! Full run sequencing around the run lock
//!
//! One process cycle goes: optional restore from the remote store, run lock
//! check, full flush, lock write, optional backup. The lock gates whether
//! the restore-then-skip path or the full-regeneration path is taken after
//! a restart.

use crate::orchestrator::SyncOrchestrator;
use std::sync::Arc;
use strmforge_archive::ArchiveSync;
use strmforge_config::Profile;
use strmforge_sync::RunLock;
use strmforge_types::{Result, SyncStats};
use tracing::{error, info};

/// Synchronization engine driving one full run cycle
#[derive(Debug)]
pub struct SyncEngine {
    profile: Arc<Profile>,
    orchestrator: SyncOrchestrator,
    lock: RunLock,
}

impl SyncEngine {
    /// Create an engine from a validated profile
    pub fn new(profile: Profile) -> Self {
        let profile = Arc::new(profile);
        let orchestrator = SyncOrchestrator::new(Arc::clone(&profile));
        let lock = RunLock::new(&profile.dest_path);
        Self {
            profile,
            orchestrator,
            lock,
        }
    }

    /// The profile this engine runs with
    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    /// Run one full cycle
    ///
    /// When remote sync is enabled the restore is attempted first; a restore
    /// failure is logged and the run proceeds to the lock check. A present
    /// lock skips regeneration entirely. Returns the flush statistics, or
    /// `None` when the flush was skipped.
    pub async fn run(&self) -> Result<Option<SyncStats>> {
        if self.profile.sync_enabled() {
            let archive = ArchiveSync::from_profile(&self.profile);
            match archive.restore().await {
                Ok(()) => self.lock.write("done").await?,
                Err(e) => error!("back restore error: {}", e),
            }
        }

        if self.lock.exists() {
            info!("run lock present, skipping regeneration");
            return Ok(None);
        }

        let stats = self.orchestrator.flush_all(None).await;
        self.lock.write("done").await?;

        if self.profile.sync_enabled() {
            ArchiveSync::from_profile(&self.profile).backup().await?;
        }

        Ok(Some(stats))
    }

    /// Clear and regenerate the destination tree without touching the lock
    pub async fn flush(&self, roots: Option<Vec<String>>) -> SyncStats {
        self.orchestrator.flush_all(roots).await
    }

    /// Upload the destination tree to the remote store
    pub async fn backup(&self) -> Result<()> {
        ArchiveSync::from_profile(&self.profile).backup().await
    }

    /// Fetch the remote archive and restore it over the destination tree
    pub async fn restore(&self) -> Result<()> {
        ArchiveSync::from_profile(&self.profile).restore().await
    }
}
