//! Proxy pointer file generation
//!
//! For one video file the generator derives the destination proxy path and
//! the snapshot marker path, performs the snapshot existence check, creates
//! parent directories, writes the pointer file with the constructed URL and
//! finally writes the empty snapshot marker.

use crate::platform::adapt_path;
use crate::sanitize::sanitize_relative;
use crate::snapshot::SnapshotIndex;
use std::path::{Path, PathBuf};
use strmforge_types::{Error, ProxyOutcome, Result};
use tracing::{info, warn};

/// Extension of generated proxy pointer files
pub const PROXY_EXTENSION: &str = "strm";

/// Generator for proxy pointer files and their snapshot markers
#[derive(Debug, Clone)]
pub struct ProxyGenerator {
    server: String,
    dest_root: PathBuf,
    snapshot: SnapshotIndex,
}

impl ProxyGenerator {
    /// Create a new generator
    ///
    /// `server` is the media server base URL without a trailing slash;
    /// `dest_root` and `snapshot_root` are the roots of the proxy tree and
    /// its marker shadow.
    pub fn new<S, D, N>(server: S, dest_root: D, snapshot_root: N) -> Self
    where
        S: Into<String>,
        D: Into<PathBuf>,
        N: Into<PathBuf>,
    {
        Self {
            server: server.into(),
            dest_root: dest_root.into(),
            snapshot: SnapshotIndex::new(snapshot_root),
        }
    }

    /// Generate the proxy entry for one video file
    ///
    /// `relative` is the file's path relative to the destination-mapped
    /// location, original media extension still in place. The snapshot
    /// marker is the only existence check; destination collisions between
    /// names that sanitize to the same segment are a known, undetected gap.
    pub async fn generate(&self, relative: &Path) -> Result<ProxyOutcome> {
        let video_url = self.video_url(relative);

        let key = sanitize_relative(relative.with_extension(PROXY_EXTENSION));
        let strm_path = self.dest_root.join(&key);

        if self.snapshot.exists(&key) {
            warn!("{} already exists", strm_path.display());
            return Ok(ProxyOutcome::Skipped);
        }

        if let Some(parent) = strm_path.parent() {
            tokio::fs::create_dir_all(adapt_path(parent))
                .await
                .map_err(|e| Error::generation(&strm_path, e.to_string()))?;
        }

        tokio::fs::write(adapt_path(&strm_path), video_url.as_bytes())
            .await
            .map_err(|e| Error::generation(&strm_path, e.to_string()))?;
        self.snapshot.mark_done(&key).await?;

        info!("create {} success", strm_path.display());
        Ok(ProxyOutcome::Created)
    }

    /// Construct the video URL for a relative media path
    ///
    /// The URL uses the unsanitized relative path with the original media
    /// extension; spaces encode as `%20` and tabs as `%09`.
    fn video_url(&self, relative: &Path) -> String {
        let posix: Vec<String> = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect();
        let encoded = posix.join("/").replace(' ', "%20").replace('\t', "%09");
        format!("{}/{}", self.server, encoded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn generator(temp_dir: &TempDir) -> ProxyGenerator {
        ProxyGenerator::new(
            "http://x",
            temp_dir.path().join("strm"),
            temp_dir.path().join("snapshot"),
        )
    }

    #[tokio::test]
    async fn test_generate_writes_url_and_marker() {
        let temp_dir = TempDir::new().unwrap();
        let gen = generator(&temp_dir);

        let outcome = gen
            .generate(Path::new("Show/Season 01/ep1.mkv"))
            .await
            .unwrap();
        assert_eq!(outcome, ProxyOutcome::Created);

        let strm = temp_dir.path().join("strm/Show/Season 01/ep1.strm");
        let content = std::fs::read_to_string(&strm).unwrap();
        assert_eq!(content, "http://x/Show/Season%2001/ep1.mkv");

        let marker = temp_dir.path().join("snapshot/Show/Season 01/ep1.strm");
        assert!(marker.exists());
        assert!(std::fs::read(marker).unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_second_generate_is_skipped() {
        let temp_dir = TempDir::new().unwrap();
        let gen = generator(&temp_dir);
        let rel = Path::new("Show/ep1.mkv");

        assert_eq!(gen.generate(rel).await.unwrap(), ProxyOutcome::Created);

        let strm = temp_dir.path().join("strm/Show/ep1.strm");
        let before = std::fs::read_to_string(&strm).unwrap();

        assert_eq!(gen.generate(rel).await.unwrap(), ProxyOutcome::Skipped);
        let after = std::fs::read_to_string(&strm).unwrap();
        assert_eq!(before, after);
    }

    #[tokio::test]
    async fn test_skip_honored_even_without_destination_file() {
        let temp_dir = TempDir::new().unwrap();
        let gen = generator(&temp_dir);
        let rel = Path::new("Show/ep1.mkv");

        gen.generate(rel).await.unwrap();

        // The snapshot marker, not the destination file, drives the check.
        std::fs::remove_file(temp_dir.path().join("strm/Show/ep1.strm")).unwrap();
        assert_eq!(gen.generate(rel).await.unwrap(), ProxyOutcome::Skipped);
    }

    #[tokio::test]
    async fn test_segments_are_sanitized_independently() {
        let temp_dir = TempDir::new().unwrap();
        let gen = generator(&temp_dir);

        gen.generate(Path::new("Who? Am: I/ep*1.mkv")).await.unwrap();

        let strm = temp_dir.path().join("strm/Who_ Am_ I/ep_1.strm");
        assert!(strm.exists());

        // URL keeps the original characters and extension
        let content = std::fs::read_to_string(&strm).unwrap();
        assert_eq!(content, "http://x/Who?%20Am:%20I/ep*1.mkv");
    }
}
