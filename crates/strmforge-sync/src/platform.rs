//! Filesystem adapter for platform path quirks
//!
//! Windows caps plain paths at 260 characters; the extended-length `\\?\`
//! prefix lifts the limit. Generated media paths routinely exceed it, so
//! every destination or snapshot path goes through [`adapt_path`] right
//! before the filesystem call. This is a compatibility concern of the
//! filesystem adapter, not part of the mirroring algorithm.

use std::path::{Path, PathBuf};

/// Adapt an absolute path for the host platform before filesystem access
#[cfg(windows)]
pub fn adapt_path(path: &Path) -> PathBuf {
    use std::ffi::OsString;

    if path.to_string_lossy().starts_with(r"\\?\") || !path.is_absolute() {
        return path.to_path_buf();
    }
    let mut prefixed = OsString::from(r"\\?\");
    prefixed.push(path.as_os_str());
    PathBuf::from(prefixed)
}

/// Adapt an absolute path for the host platform before filesystem access
#[cfg(not(windows))]
pub fn adapt_path(path: &Path) -> PathBuf {
    path.to_path_buf()
}
