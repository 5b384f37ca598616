//! API error handling for the Sharebox HTTP interface.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::collections::HashMap;

use crate::ShareError;

/// API error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Bad request (400).
    BadRequest,
    /// Forbidden (403).
    Forbidden,
    /// Not found (404).
    NotFound,
    /// Too many requests (429).
    TooManyRequests,
    /// Internal server error (500).
    InternalError,
}

impl ErrorCode {
    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ErrorCode::BadRequest => StatusCode::BAD_REQUEST,
            ErrorCode::Forbidden => StatusCode::FORBIDDEN,
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::TooManyRequests => StatusCode::TOO_MANY_REQUESTS,
            ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// API error response body.
///
/// `error` carries the human-readable message so browser clients can show
/// it directly.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Human-readable message.
    pub error: String,
    /// Error code.
    pub code: ErrorCode,
    /// Field-level validation error details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<HashMap<String, Vec<String>>>,
}

/// API error type.
#[derive(Debug)]
pub struct ApiError {
    code: ErrorCode,
    message: String,
    details: Option<HashMap<String, Vec<String>>>,
}

impl ApiError {
    /// Create a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    /// Create a bad request error.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::BadRequest, message)
    }

    /// Create a forbidden error.
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Forbidden, message)
    }

    /// Create a not found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    /// Create a rate limit error.
    pub fn too_many_requests(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::TooManyRequests, message)
    }

    /// Create an internal server error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }

    /// Get the error code.
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Get the message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Create a bad request error from validator::ValidationErrors.
    ///
    /// Empty required fields are reported as "Missing fields"; any other
    /// failed rule reports its own message.
    pub fn from_validation_errors(errors: validator::ValidationErrors) -> Self {
        let field_errors = errors.field_errors();

        let message = field_errors
            .values()
            .flat_map(|errs| errs.iter())
            .find(|e| e.code != "length")
            .map(|e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| "Invalid field".to_string())
            })
            .unwrap_or_else(|| "Missing fields".to_string());

        let details = field_errors
            .into_iter()
            .map(|(field, field_errors)| {
                let messages = field_errors
                    .iter()
                    .map(|e| {
                        e.message
                            .as_ref()
                            .map(|m| m.to_string())
                            .unwrap_or_else(|| format!("Invalid value for {field}"))
                    })
                    .collect();
                (field.to_string(), messages)
            })
            .collect();

        Self {
            code: ErrorCode::BadRequest,
            message,
            details: Some(details),
        }
    }

    /// Convert a storage error, reporting filesystem failures with `message`.
    ///
    /// Client errors (validation, not found, blocked) keep their own
    /// message; I/O and metadata failures become a 500 with the
    /// operation-specific text.
    pub fn from_storage(err: ShareError, message: &str) -> Self {
        match err {
            ShareError::Io(_) | ShareError::Metadata(_) => {
                tracing::error!(error = %err, "{}", message);
                ApiError::internal(message)
            }
            other => other.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.code.status_code();
        let body = ErrorBody {
            error: self.message,
            code: self.code,
            details: self.details,
        };
        (status, Json(body)).into_response()
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

impl From<ShareError> for ApiError {
    fn from(err: ShareError) -> Self {
        match err {
            ShareError::Validation(msg) | ShareError::Auth(msg) => ApiError::bad_request(msg),
            ShareError::NotFound(what) => ApiError::not_found(format!("{what} not found")),
            ShareError::AccessBlocked(msg) => ApiError::forbidden(msg),
            other => {
                tracing::error!("Internal error: {}", other);
                ApiError::internal("An internal error occurred")
            }
        }
    }
}
