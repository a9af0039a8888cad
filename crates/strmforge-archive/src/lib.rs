//! Backup and restore of the destination tree for strmforge
//!
//! The destination tree travels to and from the remote store as a single
//! gzip tar archive. `backup` compresses the tree to a temporary local path
//! and hands it to the external transport; `restore` fetches the archive to
//! a temporary local path and decompresses it over the destination root.
//!
//! There is no incremental diffing, no resumable transfer and no
//! coordination between concurrent backup and restore invocations.
//!
//! # Examples
//!
//! ```rust,no_run
//! use strmforge_archive::ArchiveSync;
//! use strmforge_config::Profile;
//!
//! # async fn example() -> strmforge_types::Result<()> {
//! let profile = Profile::default();
//! let sync = ArchiveSync::from_profile(&profile);
//! sync.backup().await?;
//! # Ok(())
//! # }
//! ```

#![deny(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

use std::path::{Path, PathBuf};
use strmforge_config::Profile;
use strmforge_types::{Error, Result};
use tracing::info;

pub mod archive;
pub mod transport;

pub use archive::{compress, decompress};
pub use transport::RemoteTransport;

/// Backup/restore primitive for the destination tree
#[derive(Debug, Clone)]
pub struct ArchiveSync {
    dest_root: PathBuf,
    remote_path: String,
    drive: String,
    transport: RemoteTransport,
}

impl ArchiveSync {
    /// Create an archive sync from a profile's sync descriptor
    pub fn from_profile(profile: &Profile) -> Self {
        Self {
            dest_root: profile.dest_path.clone(),
            remote_path: profile.sync.path.clone(),
            drive: profile.sync.drive.clone(),
            transport: RemoteTransport::new(),
        }
    }

    /// Replace the transport (used by tests and alternative tooling)
    pub fn with_transport(mut self, transport: RemoteTransport) -> Self {
        self.transport = transport;
        self
    }

    /// Compress the destination tree and upload it to the remote store
    pub async fn backup(&self) -> Result<()> {
        let (remote_dir, filename) = self.split_remote_path()?;

        let temp_dir = std::env::temp_dir().join("strmforge").join("backup");
        tokio::fs::create_dir_all(&temp_dir).await?;
        let local_archive = temp_dir.join(&filename);

        let dest_root = self.dest_root.clone();
        let archive_path = local_archive.clone();
        tokio::task::spawn_blocking(move || compress(&dest_root, &archive_path))
            .await
            .map_err(|e| Error::other(e.to_string()))??;

        let remote = format!("{}:/{}", self.drive, remote_dir);
        self.transport
            .copy(&local_archive.to_string_lossy(), &remote)
            .await?;

        info!("backup of {} uploaded to {}", self.dest_root.display(), remote);
        Ok(())
    }

    /// Download the archive from the remote store and decompress it over
    /// the destination root
    pub async fn restore(&self) -> Result<()> {
        let (remote_dir, filename) = self.split_remote_path()?;

        let temp_dir = std::env::temp_dir().join("strmforge").join(&remote_dir);
        tokio::fs::create_dir_all(&temp_dir).await?;

        let remote = format!("{}:/{}", self.drive, self.remote_path);
        self.transport
            .copy(&remote, &temp_dir.to_string_lossy())
            .await?;

        let local_archive = temp_dir.join(&filename);
        let dest_root = self.dest_root.clone();
        tokio::fs::create_dir_all(&dest_root).await?;
        tokio::task::spawn_blocking(move || decompress(&local_archive, &dest_root))
            .await
            .map_err(|e| Error::other(e.to_string()))??;

        info!("restore from {} into {}", remote, self.dest_root.display());
        Ok(())
    }

    /// Split the remote archive path into its directory and file name
    fn split_remote_path(&self) -> Result<(String, String)> {
        let path = Path::new(&self.remote_path);
        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .ok_or_else(|| {
                Error::config(format!("sync.path '{}' has no file name", self.remote_path))
            })?;
        let remote_dir = path
            .parent()
            .map(|p| p.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok((remote_dir, filename))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strmforge_config::SyncConfig;
    use tempfile::TempDir;

    fn archive_sync(temp_dir: &TempDir, drive: &str) -> ArchiveSync {
        let profile = Profile {
            dest_path: temp_dir.path().join("strm"),
            sync: SyncConfig {
                enabled: true,
                path: "backup/strm.tar.gz".to_string(),
                drive: drive.to_string(),
            },
            ..Profile::default()
        };
        ArchiveSync::from_profile(&profile)
    }

    #[test]
    fn test_split_remote_path() {
        let temp_dir = TempDir::new().unwrap();
        let sync = archive_sync(&temp_dir, "alist");
        let (dir, file) = sync.split_remote_path().unwrap();
        assert_eq!(dir, "backup");
        assert_eq!(file, "strm.tar.gz");
    }

    #[tokio::test]
    #[cfg(unix)]
    async fn test_backup_with_stub_transport() {
        let temp_dir = TempDir::new().unwrap();
        let dest = temp_dir.path().join("strm");
        std::fs::create_dir_all(dest.join("Show")).unwrap();
        std::fs::write(dest.join("Show/ep1.strm"), b"http://x/ep1.mkv").unwrap();

        let sync = archive_sync(&temp_dir, "alist").with_transport(
            RemoteTransport::with_program("true"),
        );
        sync.backup().await.unwrap();

        // The local archive side-product exists and round-trips
        let local = std::env::temp_dir().join("strmforge/backup/strm.tar.gz");
        assert!(local.exists());
    }

    #[tokio::test]
    #[cfg(unix)]
    async fn test_transport_failure_propagates() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::create_dir_all(temp_dir.path().join("strm")).unwrap();

        let sync = archive_sync(&temp_dir, "alist").with_transport(
            RemoteTransport::with_program("false"),
        );
        let result = sync.backup().await;
        assert!(matches!(
            result,
            Err(strmforge_types::Error::Transport { .. })
        ));
    }
}
