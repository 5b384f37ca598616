//! File management module for Sharebox.
//!
//! This module provides the per-user file store:
//! - Hierarchical folders rooted at one directory per user
//! - Sidecar `.meta.json` files recording each item's access mode
//! - Path normalization that keeps every request inside its user's tree

pub mod metadata;
pub mod path;
mod storage;

pub use metadata::{AccessMode, ItemMeta, META_SUFFIX};
pub use storage::{is_viewable, DownloadedFile, FileStorage, ItemEntry, ItemKind, UploadFile};

/// Extensions that may be shown inline by the view endpoint.
pub const VIEWABLE_EXTENSIONS: &[&str] = &["txt", "js", "json", "md"];
