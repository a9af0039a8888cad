//! Source tree traversal
//!
//! One walker handles one source root. Directories that still contain
//! subdirectories are treated as structural only: traversal descends into
//! them but their direct files are left untouched. Only leaf directories,
//! those with zero subdirectories, have their files classified and handled.
//! Media libraries put the actual payloads in terminal folders (season
//! directories and the like); this rule is deliberate and must be preserved.

use crate::classify::Classifier;
use crate::platform::adapt_path;
use crate::proxy::ProxyGenerator;
use crate::sanitize::sanitize_relative;
use filetime::FileTime;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use std::time::Instant;
use strmforge_config::Profile;
use strmforge_types::{Error, FileCategory, Result, SyncStats};
use tracing::{debug, error, info, warn};

/// Walker that mirrors one source root into the destination tree
#[derive(Debug, Clone)]
pub struct TreeWalker {
    source_root: PathBuf,
    dest_root: PathBuf,
    classifier: Classifier,
    generator: ProxyGenerator,
}

impl TreeWalker {
    /// Create a walker from a profile
    pub fn from_profile(profile: &Profile) -> Self {
        Self {
            source_root: profile.source_path.clone(),
            dest_root: profile.dest_path.clone(),
            classifier: Classifier::new(profile.formats.clone()),
            generator: ProxyGenerator::new(
                profile.server_base(),
                profile.dest_path.clone(),
                profile.snapshot_path.clone(),
            ),
        }
    }

    /// Walk one source root, given by name relative to the source path
    ///
    /// An unreadable root aborts this root only. Unreadable subdirectories
    /// and per-file failures are logged and the walk continues with the
    /// remaining siblings. Returns the statistics for this root.
    pub async fn walk(&self, root: &str) -> SyncStats {
        let mut stats = SyncStats::new();
        let root_path = self.source_root.join(root);
        let start = Instant::now();
        info!("scan {} start", root_path.display());

        if let Err(e) = self.walk_dir(root_path.clone(), &mut stats).await {
            error!("failed to scan {}: {}", root_path.display(), e);
            stats.errors += 1;
        }

        stats.duration = start.elapsed();
        info!(
            "scan {} done, cost: {:.2}s",
            root_path.display(),
            stats.duration.as_secs_f64()
        );
        stats
    }

    /// Recursively walk one directory
    ///
    /// A failure reading this directory propagates to the caller; failures
    /// inside subdirectories are absorbed into the statistics so sibling
    /// subtrees keep walking.
    fn walk_dir<'a>(
        &'a self,
        dir: PathBuf,
        stats: &'a mut SyncStats,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + 'a>> {
        Box::pin(async move {
            let mut entries = tokio::fs::read_dir(&dir)
                .await
                .map_err(|e| Error::traversal(&dir, e.to_string()))?;

            let mut sub_dirs = Vec::new();
            let mut files = Vec::new();

            while let Some(entry) = entries
                .next_entry()
                .await
                .map_err(|e| Error::traversal(&dir, e.to_string()))?
            {
                let file_type = entry
                    .file_type()
                    .await
                    .map_err(|e| Error::traversal(entry.path(), e.to_string()))?;
                if file_type.is_dir() {
                    sub_dirs.push(entry.path());
                } else if file_type.is_file() {
                    files.push(entry.path());
                }
            }

            if sub_dirs.is_empty() {
                // Leaf directory: these files are the payload.
                for file in files {
                    match self.process_file(&file).await {
                        Ok(outcome) => Self::record(stats, outcome),
                        Err(e) => {
                            error!("failed to handle {}: {}", file.display(), e);
                            stats.errors += 1;
                        }
                    }
                }
            } else {
                debug!(
                    "{} has {} subdirectories, deferring its files",
                    dir.display(),
                    sub_dirs.len()
                );
                for sub_dir in sub_dirs {
                    if let Err(e) = self.walk_dir(sub_dir.clone(), stats).await {
                        error!("failed to scan {}: {}", sub_dir.display(), e);
                        stats.errors += 1;
                    }
                }
            }

            Ok(())
        })
    }

    /// Classify one file and dispatch it
    async fn process_file(&self, file: &Path) -> Result<FileOutcome> {
        let relative = file
            .strip_prefix(&self.source_root)
            .map_err(|e| Error::generation(file, e.to_string()))?;

        match self.classifier.classify(file) {
            FileCategory::Video => {
                let outcome = self.generator.generate(relative).await?;
                Ok(FileOutcome::Proxy(outcome))
            }
            FileCategory::Image | FileCategory::Other => {
                self.copy_asset(file, relative).await?;
                Ok(FileOutcome::Copied)
            }
            FileCategory::Ignored => {
                warn!("skip file {}", file.display());
                Ok(FileOutcome::Ignored)
            }
        }
    }

    /// Copy a non-video asset verbatim to its sanitized destination path
    async fn copy_asset(&self, source: &Path, relative: &Path) -> Result<()> {
        let dest = self.dest_root.join(sanitize_relative(relative));

        if let Some(parent) = dest.parent() {
            tokio::fs::create_dir_all(adapt_path(parent))
                .await
                .map_err(|e| Error::generation(&dest, e.to_string()))?;
        }
        tokio::fs::copy(source, adapt_path(&dest))
            .await
            .map_err(|e| Error::generation(&dest, e.to_string()))?;

        // Timestamp preservation is best-effort; a failure is not worth
        // failing the file over.
        match tokio::fs::metadata(source).await {
            Ok(metadata) => {
                let mtime = FileTime::from_last_modification_time(&metadata);
                let target = adapt_path(&dest);
                let written =
                    tokio::task::spawn_blocking(move || filetime::set_file_mtime(target, mtime))
                        .await;
                match written {
                    Ok(Ok(())) => {}
                    Ok(Err(e)) => {
                        debug!("failed to preserve mtime for {}: {}", dest.display(), e);
                    }
                    Err(e) => debug!("failed to preserve mtime for {}: {}", dest.display(), e),
                }
            }
            Err(e) => debug!("failed to read metadata for {}: {}", source.display(), e),
        }

        info!("create {} success", source.display());
        Ok(())
    }

    fn record(stats: &mut SyncStats, outcome: FileOutcome) {
        match outcome {
            FileOutcome::Proxy(proxy) => stats.record_proxy(proxy),
            FileOutcome::Copied => stats.files_copied += 1,
            FileOutcome::Ignored => stats.files_ignored += 1,
        }
    }
}

/// How one file in a leaf directory was handled
#[derive(Debug, Clone, Copy)]
enum FileOutcome {
    Proxy(strmforge_types::ProxyOutcome),
    Copied,
    Ignored,
}
