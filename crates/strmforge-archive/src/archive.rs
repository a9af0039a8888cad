//! Gzip tar archiving of the destination tree
//!
//! Entry names are relative posix paths rooted at the archived directory, so
//! extraction reconstructs the exact original tree shape regardless of where
//! the archive travels in between.

use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use std::fs::File;
use std::path::{Component, Path};
use strmforge_types::{Error, Result};
use tracing::info;
use walkdir::WalkDir;

/// Compress a directory tree into a gzip tar archive
///
/// Every regular file below `source` is added under its relative posix
/// entry name; each added file is logged.
pub fn compress(source: &Path, archive: &Path) -> Result<()> {
    let file = File::create(archive)
        .map_err(|e| Error::archive(format!("failed to create {}: {}", archive.display(), e)))?;
    let encoder = GzEncoder::new(file, Compression::default());
    let mut builder = tar::Builder::new(encoder);

    for entry in WalkDir::new(source) {
        let entry = entry.map_err(|e| Error::archive(e.to_string()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let relative = entry
            .path()
            .strip_prefix(source)
            .map_err(|e| Error::archive(e.to_string()))?;
        let name = posix_name(relative);
        builder
            .append_path_with_name(entry.path(), &name)
            .map_err(|e| {
                Error::archive(format!("failed to add {}: {}", entry.path().display(), e))
            })?;
        info!("compressed {} to {}", entry.path().display(), archive.display());
    }

    let encoder = builder
        .into_inner()
        .map_err(|e| Error::archive(e.to_string()))?;
    encoder
        .finish()
        .map_err(|e| Error::archive(e.to_string()))?;

    info!("compressed {} to {}", source.display(), archive.display());
    Ok(())
}

/// Extract a gzip tar archive into a directory
///
/// Each extracted entry is logged. Parent directories are created by the
/// extraction itself.
pub fn decompress(archive: &Path, dest: &Path) -> Result<()> {
    let file = File::open(archive)
        .map_err(|e| Error::archive(format!("failed to open {}: {}", archive.display(), e)))?;
    let decoder = GzDecoder::new(file);
    let mut tar = tar::Archive::new(decoder);

    let entries = tar.entries().map_err(|e| Error::archive(e.to_string()))?;
    for entry in entries {
        let mut entry = entry.map_err(|e| Error::archive(e.to_string()))?;
        let name = entry
            .path()
            .map_err(|e| Error::archive(e.to_string()))?
            .into_owned();
        info!("extracting {} to {}", name.display(), dest.display());
        entry
            .unpack_in(dest)
            .map_err(|e| Error::archive(format!("failed to extract {}: {}", name.display(), e)))?;
    }

    info!("extract all files completely");
    Ok(())
}

/// Relative posix entry name for a path
fn posix_name(relative: &Path) -> String {
    relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(segment) => Some(segment.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use tempfile::TempDir;

    fn tree_contents(root: &Path) -> BTreeMap<String, Vec<u8>> {
        WalkDir::new(root)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .map(|e| {
                let rel = posix_name(e.path().strip_prefix(root).unwrap());
                (rel, std::fs::read(e.path()).unwrap())
            })
            .collect()
    }

    #[test]
    fn test_round_trip_preserves_tree() {
        let temp_dir = TempDir::new().unwrap();
        let source = temp_dir.path().join("tree");
        std::fs::create_dir_all(source.join("Show/Season 01")).unwrap();
        std::fs::write(source.join("Show/Season 01/ep1.strm"), b"http://x/ep1.mkv").unwrap();
        std::fs::write(source.join("Show/poster.jpg"), b"image bytes").unwrap();
        std::fs::write(source.join("strm.lock"), b"done").unwrap();

        let archive = temp_dir.path().join("backup.tar.gz");
        compress(&source, &archive).unwrap();

        let restored = temp_dir.path().join("restored");
        std::fs::create_dir_all(&restored).unwrap();
        decompress(&archive, &restored).unwrap();

        assert_eq!(tree_contents(&source), tree_contents(&restored));
    }

    #[test]
    fn test_entry_names_are_relative() {
        let temp_dir = TempDir::new().unwrap();
        let source = temp_dir.path().join("tree");
        std::fs::create_dir_all(source.join("a/b")).unwrap();
        std::fs::write(source.join("a/b/c.strm"), b"url").unwrap();

        let archive = temp_dir.path().join("t.tar.gz");
        compress(&source, &archive).unwrap();

        let decoder = GzDecoder::new(File::open(&archive).unwrap());
        let mut tar = tar::Archive::new(decoder);
        let names: Vec<String> = tar
            .entries()
            .unwrap()
            .map(|e| e.unwrap().path().unwrap().to_string_lossy().into_owned())
            .collect();

        assert_eq!(names, vec!["a/b/c.strm".to_string()]);
    }

    #[test]
    fn test_decompress_missing_archive_fails() {
        let temp_dir = TempDir::new().unwrap();
        let result = decompress(&temp_dir.path().join("absent.tar.gz"), temp_dir.path());
        assert!(result.is_err());
    }
}
