//! File classification by extension

use std::path::Path;
use strmforge_config::FormatTable;
use strmforge_types::FileCategory;

/// Classifier that assigns a [`FileCategory`] to a path
///
/// Classification is a pure lowercased-extension lookup against the
/// profile's format table; unknown extensions classify as
/// [`FileCategory::Ignored`].
#[derive(Debug, Clone)]
pub struct Classifier {
    formats: FormatTable,
}

impl Classifier {
    /// Create a new classifier from a format table
    pub fn new(formats: FormatTable) -> Self {
        Self { formats }
    }

    /// Classify a file path
    pub fn classify<P: AsRef<Path>>(&self, path: P) -> FileCategory {
        self.formats.category_of(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classifier() -> Classifier {
        Classifier::new(FormatTable {
            video: vec!["mkv".to_string(), "mp4".to_string()],
            image: vec!["jpg".to_string()],
            other: vec!["srt".to_string(), "nfo".to_string()],
        })
    }

    #[test]
    fn test_disjoint_categories() {
        let c = classifier();
        assert_eq!(c.classify("a/ep1.mkv"), FileCategory::Video);
        assert_eq!(c.classify("a/poster.jpg"), FileCategory::Image);
        assert_eq!(c.classify("a/ep1.srt"), FileCategory::Other);
    }

    #[test]
    fn test_case_insensitive_lookup() {
        let c = classifier();
        assert_eq!(c.classify("a/EP1.MP4"), FileCategory::Video);
    }

    #[test]
    fn test_unknown_extension_is_ignored() {
        let c = classifier();
        assert_eq!(c.classify("a/readme.md"), FileCategory::Ignored);
        assert_eq!(c.classify("a/Thumbs"), FileCategory::Ignored);
    }
}
