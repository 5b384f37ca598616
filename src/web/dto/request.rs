//! Request DTOs for the HTTP interface.

use serde::Deserialize;
use validator::Validate;

use super::validation::no_control_chars;

/// Register-or-login request.
#[derive(Debug, Deserialize, Validate)]
pub struct AuthRequest {
    /// Username.
    #[serde(default)]
    #[validate(
        length(min = 1, message = "Username is required"),
        custom(function = "no_control_chars")
    )]
    pub username: String,
    /// Password.
    #[serde(default)]
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Rename or move request.
///
/// Both paths are relative to the user's root; `new_path` is the full
/// destination path, not just a folder.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PathChangeRequest {
    /// Owner of the item.
    #[serde(default)]
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
    /// Current path of the item.
    #[serde(default)]
    #[validate(length(min = 1, message = "Old path is required"))]
    pub old_path: String,
    /// Destination path of the item.
    #[serde(default)]
    #[validate(length(min = 1, message = "New path is required"))]
    pub new_path: String,
}
