//! Client path handling.
//!
//! Relative paths arrive from URLs, JSON bodies and multipart file names.
//! They are split on both `/` and `\`, empty and `.` segments are dropped,
//! and any `..` segment is refused, so a resolved path can never leave the
//! user's directory.

use std::path::PathBuf;

use crate::{Result, ShareError};

/// Normalize a client-supplied relative path.
///
/// Leading separators are ignored, so `/docs/a.txt` and `docs/a.txt`
/// resolve to the same item. An empty result means the user's root.
pub fn normalize_relative(raw: &str) -> Result<PathBuf> {
    let mut path = PathBuf::new();

    for segment in raw.split(['/', '\\']) {
        match segment {
            "" | "." => continue,
            ".." => return Err(invalid_path(raw)),
            s if s.chars().any(|c| c.is_control()) => return Err(invalid_path(raw)),
            s => path.push(s),
        }
    }

    Ok(path)
}

/// Normalize a path that must name an item rather than the user's root.
pub fn normalize_item(raw: &str) -> Result<PathBuf> {
    let path = normalize_relative(raw)?;
    if path.as_os_str().is_empty() {
        return Err(ShareError::Validation("Missing path".to_string()));
    }
    Ok(path)
}

fn invalid_path(raw: &str) -> ShareError {
    tracing::warn!(path = %raw.escape_debug(), "Rejected unsafe path");
    ShareError::Validation("Invalid path".to_string())
}
