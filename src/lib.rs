//! Sharebox - A minimal self-hosted file sharing service.
//!
//! Users register or log in with a plaintext name and password, upload
//! files into a per-user tree, and control downloads per item with an
//! access mode stored in a sidecar file next to each upload.

pub mod auth;
pub mod config;
pub mod error;
pub mod file;
pub mod logging;
pub mod web;

pub use auth::{AuthOutcome, User, UserRegistry};
pub use config::Config;
pub use error::{Result, ShareError};
pub use file::{AccessMode, FileStorage, ItemEntry, ItemKind};
pub use web::WebServer;
