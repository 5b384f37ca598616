//! Authentication handlers.

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::auth::UserRegistry;
use crate::file::FileStorage;
use crate::web::dto::{AuthRequest, MessageResponse, ValidatedJson};
use crate::web::error::ApiError;

/// Default request body limit for uploads (100MB).
pub const DEFAULT_MAX_UPLOAD_SIZE: usize = 100 * 1024 * 1024;

/// Application state shared across handlers.
#[derive(Debug)]
pub struct AppState {
    /// Registered users.
    pub users: UserRegistry,
    /// Per-user file store.
    pub storage: FileStorage,
    /// Maximum upload request size in bytes.
    pub max_upload_size: usize,
}

impl AppState {
    /// Create a new application state.
    pub fn new(storage: FileStorage) -> Self {
        Self {
            users: UserRegistry::new(),
            storage,
            max_upload_size: DEFAULT_MAX_UPLOAD_SIZE,
        }
    }

    /// Set the maximum upload size in bytes.
    pub fn with_max_upload_size(mut self, bytes: usize) -> Self {
        self.max_upload_size = bytes;
        self
    }
}

/// POST /auth - Register a new user or log in an existing one.
pub async fn authenticate(
    State(state): State<Arc<AppState>>,
    ValidatedJson(req): ValidatedJson<AuthRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let outcome = state
        .users
        .authenticate(&req.username, &req.password)
        .await
        .map_err(|e| {
            tracing::warn!(username = %req.username, error = %e, "Authentication failed");
            ApiError::from(e)
        })?;

    tracing::info!(username = %req.username, outcome = ?outcome, "User authenticated");

    Ok(Json(MessageResponse::new(outcome.message())))
}
