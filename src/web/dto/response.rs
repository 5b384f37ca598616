//! Response DTOs for the HTTP interface.

use chrono::SecondsFormat;
use serde::Serialize;

use crate::file::{AccessMode, ItemEntry, ItemKind};

/// Plain confirmation message.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    /// Message.
    pub message: String,
}

impl MessageResponse {
    /// Create a new message response.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Upload result.
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    /// Message.
    pub message: String,
    /// Number of files stored.
    pub count: usize,
}

/// One entry of a folder listing.
#[derive(Debug, Serialize)]
pub struct ItemResponse {
    /// Entry name.
    pub name: String,
    /// `file` or `folder`.
    #[serde(rename = "type")]
    pub kind: ItemKind,
    /// Access mode.
    pub mode: AccessMode,
    /// Size in bytes (0 for folders).
    pub size: u64,
    /// Last modification time (RFC 3339, UTC).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified: Option<String>,
}

impl From<ItemEntry> for ItemResponse {
    fn from(entry: ItemEntry) -> Self {
        Self {
            name: entry.name,
            kind: entry.kind,
            mode: entry.mode,
            size: entry.size,
            modified: entry
                .modified
                .map(|t| t.to_rfc3339_opts(SecondsFormat::Secs, true)),
        }
    }
}
