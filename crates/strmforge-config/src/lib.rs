//! Profile management for strmforge
//!
//! This crate provides the typed profile that drives a synchronization run:
//! the media server base URL, the source roots to mirror, the format table
//! used for classification, the destination and snapshot roots, and the
//! remote sync descriptor.
//!
//! Profiles load from JSON (the historical format), YAML or TOML, with
//! environment variable overrides under the `STRMFORGE` prefix and fail-fast
//! validation of every required field.
//!
//! # Examples
//!
//! ```rust,no_run
//! use strmforge_config::{Profile, ProfileBuilder};
//!
//! let profile = ProfileBuilder::new()
//!     .add_source_file("profile.json")
//!     .add_env_prefix("STRMFORGE")
//!     .build()
//!     .expect("Failed to load profile");
//!
//! println!("Server: {}", profile.server);
//! ```

#![deny(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use strmforge_types::FileCategory;

pub mod builder;
pub mod error;
pub mod loader;

pub use builder::ProfileBuilder;
pub use error::{ConfigError, ConfigResult};
pub use loader::ProfileLoader;

/// Main profile structure for strmforge
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    /// Base URL of the media server the proxy files point at
    pub server: String,
    /// Remote backup/restore descriptor
    pub sync: SyncConfig,
    /// Source roots to mirror, walked in the order given
    pub paths: Vec<SourceRoot>,
    /// Format table mapping extensions to categories
    pub formats: FormatTable,
    /// Destination root of the generated proxy tree
    pub dest_path: PathBuf,
    /// Root of the snapshot marker tree
    pub snapshot_path: PathBuf,
    /// Root under which all source roots live
    pub source_path: PathBuf,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            server: "http://127.0.0.1:5244".to_string(),
            sync: SyncConfig::default(),
            paths: Vec::new(),
            formats: FormatTable::default(),
            dest_path: PathBuf::from("strm"),
            // Nested under the destination so a flush clears the markers too
            snapshot_path: PathBuf::from("strm/.snapshot"),
            source_path: PathBuf::from("media"),
        }
    }
}

impl Profile {
    /// Check whether remote backup/restore is enabled
    pub fn sync_enabled(&self) -> bool {
        self.sync.enabled
    }

    /// Source root names relative to [`Profile::source_path`]
    pub fn source_roots(&self) -> Vec<String> {
        self.paths.iter().map(|p| p.source.clone()).collect()
    }

    /// Base URL with any trailing slashes removed
    pub fn server_base(&self) -> &str {
        self.server.trim_end_matches('/')
    }
}

/// Remote backup/restore descriptor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncConfig {
    /// Whether backup/restore runs around a full flush
    pub enabled: bool,
    /// Remote archive path, relative to the drive root
    pub path: String,
    /// Remote drive alias understood by the transport
    pub drive: String,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            path: "backup/strm.tar.gz".to_string(),
            drive: String::new(),
        }
    }
}

/// One source root descriptor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceRoot {
    /// Root directory name, relative to the profile's source path
    pub source: String,
}

impl SourceRoot {
    /// Create a new source root descriptor
    pub fn new<S: Into<String>>(source: S) -> Self {
        Self {
            source: source.into(),
        }
    }
}

/// Format table mapping lowercase extensions to file categories
///
/// Entries may be listed with or without a leading dot; lookup normalizes
/// both sides.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormatTable {
    /// Extensions classified as video
    pub video: Vec<String>,
    /// Extensions classified as image
    pub image: Vec<String>,
    /// Extensions classified as other assets of interest
    pub other: Vec<String>,
}

impl Default for FormatTable {
    fn default() -> Self {
        Self {
            video: vec![
                "mkv", "mp4", "avi", "ts", "m2ts", "flv", "wmv", "mov", "rmvb", "webm", "mpg",
                "iso",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            image: vec!["jpg", "jpeg", "png", "bmp", "webp"]
                .into_iter()
                .map(String::from)
                .collect(),
            other: vec!["srt", "ass", "ssa", "sub", "nfo", "xml"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

impl FormatTable {
    /// Classify a path by its lowercased extension
    pub fn category_of<P: AsRef<Path>>(&self, path: P) -> FileCategory {
        let ext = match path.as_ref().extension().and_then(|e| e.to_str()) {
            Some(ext) => ext.to_lowercase(),
            None => return FileCategory::Ignored,
        };

        if Self::contains(&self.video, &ext) {
            FileCategory::Video
        } else if Self::contains(&self.image, &ext) {
            FileCategory::Image
        } else if Self::contains(&self.other, &ext) {
            FileCategory::Other
        } else {
            FileCategory::Ignored
        }
    }

    fn contains(entries: &[String], ext: &str) -> bool {
        entries
            .iter()
            .any(|e| e.trim_start_matches('.').eq_ignore_ascii_case(ext))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_profile_is_valid() {
        let profile = Profile::default();
        assert!(!profile.sync_enabled());
        assert!(!profile.formats.video.is_empty());
    }

    #[test]
    fn test_default_snapshot_lives_under_dest() {
        // Clearing the destination must clear the markers with it, or a
        // second flush would skip every proxy and regenerate nothing.
        let profile = Profile::default();
        assert!(profile.snapshot_path.starts_with(&profile.dest_path));
        assert_ne!(profile.snapshot_path, profile.dest_path);
    }

    #[test]
    fn test_server_base_strips_trailing_slash() {
        let profile = Profile {
            server: "http://x/".to_string(),
            ..Profile::default()
        };
        assert_eq!(profile.server_base(), "http://x");
    }

    #[test]
    fn test_category_of_video() {
        let formats = FormatTable::default();
        assert_eq!(formats.category_of("Show/ep1.mkv"), FileCategory::Video);
        assert_eq!(formats.category_of("Show/EP1.MKV"), FileCategory::Video);
    }

    #[test]
    fn test_category_of_dotted_entries() {
        let formats = FormatTable {
            video: vec![".mkv".to_string()],
            image: vec![],
            other: vec![],
        };
        assert_eq!(formats.category_of("a/b.mkv"), FileCategory::Video);
    }

    #[test]
    fn test_category_of_unknown_is_ignored() {
        let formats = FormatTable::default();
        assert_eq!(formats.category_of("notes.txt"), FileCategory::Ignored);
        assert_eq!(formats.category_of("no_extension"), FileCategory::Ignored);
    }
}
