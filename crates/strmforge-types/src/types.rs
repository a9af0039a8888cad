//! Core data types for strmforge
//!
//! Classification results, proxy generation outcomes and per-run statistics
//! shared between the walker, the generator and the orchestrator.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Category assigned to a source file by extension lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FileCategory {
    /// Video file, replaced by a proxy pointer in the mirror
    Video,
    /// Image asset, copied verbatim
    Image,
    /// Other asset of interest (subtitles, nfo, ...), copied verbatim
    Other,
    /// Unknown extension, skipped
    Ignored,
}

/// Outcome of generating one proxy entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProxyOutcome {
    /// Proxy file and snapshot marker were written
    Created,
    /// Snapshot marker already present, nothing written
    Skipped,
}

/// Statistics for one synchronization run or one root walk
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SyncStats {
    /// Number of proxy files written
    pub proxies_created: u64,
    /// Number of proxy files skipped via the snapshot index
    pub proxies_skipped: u64,
    /// Number of non-video assets copied verbatim
    pub files_copied: u64,
    /// Number of files skipped because their extension is unknown
    pub files_ignored: u64,
    /// Number of per-file or per-root errors encountered
    pub errors: u64,
    /// Total wall-clock duration of the operation
    pub duration: Duration,
}

impl SyncStats {
    /// Create a new empty statistics instance
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of files that were examined and acted upon
    pub fn files_processed(&self) -> u64 {
        self.proxies_created + self.proxies_skipped + self.files_copied + self.files_ignored
    }

    /// Record the outcome of one proxy generation
    pub fn record_proxy(&mut self, outcome: ProxyOutcome) {
        match outcome {
            ProxyOutcome::Created => self.proxies_created += 1,
            ProxyOutcome::Skipped => self.proxies_skipped += 1,
        }
    }

    /// Merge statistics from another instance
    pub fn merge(&mut self, other: &SyncStats) {
        self.proxies_created += other.proxies_created;
        self.proxies_skipped += other.proxies_skipped;
        self.files_copied += other.files_copied;
        self.files_ignored += other.files_ignored;
        self.errors += other.errors;
        self.duration += other.duration;
    }
}
