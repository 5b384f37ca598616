//! Sidecar metadata for stored items.
//!
//! Every item may carry a sibling `<name>.meta.json` file holding its
//! access mode. A missing or unreadable sidecar means the item is public.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{Result, ShareError};

/// Suffix appended to an item's file name to form its sidecar name.
pub const META_SUFFIX: &str = ".meta.json";

/// Per-item access mode controlling download visibility.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessMode {
    /// Anyone may download the item.
    #[default]
    Public,
    /// Downloads are blocked.
    Private,
    /// Downloads are blocked while the item is being tested.
    Testing,
}

impl AccessMode {
    /// Get the wire name of this mode.
    pub fn as_str(&self) -> &'static str {
        match self {
            AccessMode::Public => "public",
            AccessMode::Private => "private",
            AccessMode::Testing => "testing",
        }
    }

    /// Reason reported when a download is refused, if it is.
    pub fn block_reason(&self) -> Option<&'static str> {
        match self {
            AccessMode::Public => None,
            AccessMode::Private => Some("Download blocked: private file"),
            AccessMode::Testing => Some("Download blocked: testing mode"),
        }
    }
}

impl fmt::Display for AccessMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AccessMode {
    type Err = ShareError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "public" => Ok(AccessMode::Public),
            "private" => Ok(AccessMode::Private),
            "testing" => Ok(AccessMode::Testing),
            other => Err(ShareError::Validation(format!(
                "Invalid access mode: {other}"
            ))),
        }
    }
}

/// Contents of a sidecar file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemMeta {
    /// Access mode of the item.
    #[serde(default)]
    pub mode: AccessMode,
}

impl ItemMeta {
    /// Create metadata with the given mode.
    pub fn new(mode: AccessMode) -> Self {
        Self { mode }
    }
}

/// Whether a directory entry name is a sidecar file.
pub fn is_sidecar(name: &str) -> bool {
    name.ends_with(META_SUFFIX)
}

/// Get the sidecar path for an item.
pub fn sidecar_path(item: &Path) -> PathBuf {
    let mut name = item.as_os_str().to_os_string();
    name.push(META_SUFFIX);
    PathBuf::from(name)
}

/// Read an item's sidecar.
///
/// Returns `None` when the sidecar is absent or cannot be parsed.
pub fn read_meta(item: &Path) -> Option<ItemMeta> {
    let path = sidecar_path(item);
    let content = match fs::read_to_string(&path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return None,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Failed to read sidecar");
            return None;
        }
    };

    match serde_json::from_str(&content) {
        Ok(meta) => Some(meta),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Ignoring malformed sidecar");
            None
        }
    }
}

/// Read an item's access mode, defaulting to public.
pub fn read_mode(item: &Path) -> AccessMode {
    read_meta(item).map(|m| m.mode).unwrap_or_default()
}

/// Write an item's sidecar, replacing any existing one.
pub fn write_meta(item: &Path, meta: &ItemMeta) -> Result<()> {
    let content = serde_json::to_string_pretty(meta)?;
    fs::write(sidecar_path(item), content)?;
    Ok(())
}

/// Remove an item's sidecar.
///
/// Returns `false` if there was none.
pub fn remove_meta(item: &Path) -> Result<bool> {
    match fs::remove_file(sidecar_path(item)) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e.into()),
    }
}

/// Move an item's sidecar along with the item.
///
/// Returns `false` if the item had no sidecar.
pub fn rename_meta(from: &Path, to: &Path) -> Result<bool> {
    let old_meta = sidecar_path(from);
    if !old_meta.exists() {
        return Ok(false);
    }
    fs::rename(&old_meta, sidecar_path(to))?;
    Ok(true)
}
