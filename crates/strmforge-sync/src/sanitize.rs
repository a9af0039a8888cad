//! Path segment sanitization
//!
//! Media libraries carry names with characters that are reserved on at least
//! one supported filesystem. Every path segment written under the destination
//! or snapshot roots goes through [`sanitize`] first; separators are never
//! touched, so the structural depth of a path is preserved.

use std::path::{Component, Path, PathBuf};

/// Map one path segment to a filesystem-safe segment
///
/// Leading and trailing whitespace is trimmed, then each reserved character
/// is substituted: `\ / : * ? |` become `_`, `"` becomes `'`, `<` and `>`
/// become `(` and `)`, tabs are removed. Pure and idempotent.
pub fn sanitize(segment: &str) -> String {
    let trimmed = segment.trim();
    let mut out = String::with_capacity(trimmed.len());
    for ch in trimmed.chars() {
        match ch {
            '\\' | '/' | ':' | '*' | '?' | '|' => out.push('_'),
            '"' => out.push('\''),
            '<' => out.push('('),
            '>' => out.push(')'),
            '\t' => {}
            _ => out.push(ch),
        }
    }
    out
}

/// Sanitize every segment of a relative path independently
///
/// Segments that sanitize to the empty string are dropped so the result
/// never contains empty components.
pub fn sanitize_relative<P: AsRef<Path>>(path: P) -> PathBuf {
    path.as_ref()
        .components()
        .filter_map(|component| match component {
            Component::Normal(segment) => {
                let clean = sanitize(&segment.to_string_lossy());
                if clean.is_empty() {
                    None
                } else {
                    Some(clean)
                }
            }
            _ => None,
        })
        .collect()
}
