//! File handlers for the HTTP interface.

use axum::{
    body::Body,
    extract::{Multipart, Path, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;

use crate::file::{AccessMode, UploadFile};
use crate::web::dto::{
    ItemResponse, MessageResponse, PathChangeRequest, UploadResponse, ValidatedJson,
};
use crate::web::error::ApiError;
use crate::web::handlers::AppState;

/// Multipart field carrying file content; its file name is the relative path.
const FIELD_FILE: &str = "uploadFile";
/// Multipart field carrying the owner's username.
const FIELD_USERNAME: &str = "username";
/// Multipart field carrying the access mode for every uploaded file.
const FIELD_ACCESS_MODE: &str = "accessMode";

/// Build a Content-Disposition value for an attachment.
///
/// Control characters are dropped. Names that are not plain ASCII get an
/// RFC 5987 `filename*` parameter next to a sanitized fallback.
fn content_disposition_header(filename: &str) -> String {
    let cleaned: String = filename.chars().filter(|c| !c.is_control()).collect();

    if cleaned.is_ascii() && !cleaned.contains(['"', '\\']) {
        return format!("attachment; filename=\"{cleaned}\"");
    }

    let fallback: String = cleaned
        .chars()
        .map(|c| if c.is_ascii() && c != '"' && c != '\\' { c } else { '_' })
        .collect();

    format!(
        "attachment; filename=\"{}\"; filename*=UTF-8''{}",
        fallback,
        urlencoding::encode(&cleaned)
    )
}

/// POST /upload - Upload one or more files, preserving folder structure.
///
/// Request body: multipart/form-data with repeated `uploadFile` parts,
/// a `username` field and an optional `accessMode` field.
pub async fn upload(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, ApiError> {
    let mut username: Option<String> = None;
    let mut access_mode: Option<String> = None;
    let mut files: Vec<UploadFile> = Vec::new();

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        tracing::warn!("Failed to read multipart field: {}", e);
        ApiError::bad_request("Invalid multipart data")
    })? {
        let name = field.name().unwrap_or("").to_string();

        match name.as_str() {
            FIELD_FILE => {
                let file_name = field
                    .file_name()
                    .map(str::to_string)
                    .ok_or_else(|| ApiError::bad_request("Missing file name"))?;
                let content = field.bytes().await.map_err(|e| {
                    tracing::warn!("Failed to read file content: {}", e);
                    ApiError::bad_request("Failed to read file")
                })?;
                files.push(UploadFile::new(file_name, content.to_vec()));
            }
            FIELD_USERNAME => {
                username = Some(field.text().await.map_err(|e| {
                    tracing::warn!("Failed to read username: {}", e);
                    ApiError::bad_request("Invalid username")
                })?);
            }
            FIELD_ACCESS_MODE => {
                access_mode = Some(field.text().await.map_err(|e| {
                    tracing::warn!("Failed to read access mode: {}", e);
                    ApiError::bad_request("Invalid accessMode")
                })?);
            }
            _ => {}
        }
    }

    if files.is_empty() {
        return Err(ApiError::bad_request("No files uploaded"));
    }
    let username = username
        .filter(|u| !u.is_empty())
        .ok_or_else(|| ApiError::bad_request("Missing username"))?;
    let mode = match access_mode.as_deref() {
        None | Some("") => AccessMode::default(),
        Some(value) => value.parse::<AccessMode>()?,
    };

    let count = state
        .storage
        .upload(&username, &files, mode)
        .map_err(|e| ApiError::from_storage(e, "Upload error"))?;

    tracing::info!(username = %username, count, mode = %mode, "Files uploaded");

    Ok(Json(UploadResponse {
        message: "Files uploaded".to_string(),
        count,
    }))
}

/// GET /list/:username - List a user's root folder.
pub async fn list_root(
    State(state): State<Arc<AppState>>,
    Path(username): Path<String>,
) -> Result<Json<Vec<ItemResponse>>, ApiError> {
    list_folder(&state, &username, "")
}

/// GET /list/:username/*path - List a folder below a user's root.
pub async fn list_path(
    State(state): State<Arc<AppState>>,
    Path((username, path)): Path<(String, String)>,
) -> Result<Json<Vec<ItemResponse>>, ApiError> {
    list_folder(&state, &username, &path)
}

fn list_folder(
    state: &AppState,
    username: &str,
    path: &str,
) -> Result<Json<Vec<ItemResponse>>, ApiError> {
    let items = state
        .storage
        .list(username, path)
        .map_err(|e| ApiError::from_storage(e, "Failed to read directory"))?;

    Ok(Json(items.into_iter().map(ItemResponse::from).collect()))
}

/// GET /download/:username/*path - Download a file unless its mode blocks it.
pub async fn download(
    State(state): State<Arc<AppState>>,
    Path((username, path)): Path<(String, String)>,
) -> Result<Response<Body>, ApiError> {
    let file = state
        .storage
        .download(&username, &path)
        .map_err(|e| ApiError::from_storage(e, "Failed to load file"))?;

    let content_type = mime_guess::from_path(&file.name)
        .first_or_octet_stream()
        .to_string();

    Response::builder()
        .header(header::CONTENT_TYPE, content_type)
        .header(
            header::CONTENT_DISPOSITION,
            content_disposition_header(&file.name),
        )
        .header(header::CONTENT_LENGTH, file.content.len())
        .body(Body::from(file.content))
        .map_err(|e| {
            tracing::error!("Failed to build response: {}", e);
            ApiError::internal("Failed to build response")
        })
}

/// GET /view/:username/*path - Show a text file inline.
pub async fn view(
    State(state): State<Arc<AppState>>,
    Path((username, path)): Path<(String, String)>,
) -> Result<Response, ApiError> {
    let content = state
        .storage
        .view(&username, &path)
        .map_err(|e| ApiError::from_storage(e, "Error reading file"))?;

    Ok((
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        content,
    )
        .into_response())
}

/// POST /rename - Rename an item and its sidecar.
pub async fn rename(
    State(state): State<Arc<AppState>>,
    ValidatedJson(req): ValidatedJson<PathChangeRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    state
        .storage
        .rename(&req.username, &req.old_path, &req.new_path)
        .map_err(|e| ApiError::from_storage(e, "Rename failed"))?;

    tracing::info!(
        username = %req.username,
        from = %req.old_path,
        to = %req.new_path,
        "Item renamed"
    );

    Ok(Json(MessageResponse::new("Rename success")))
}

/// POST /move - Move an item and its sidecar to another folder.
pub async fn move_item(
    State(state): State<Arc<AppState>>,
    ValidatedJson(req): ValidatedJson<PathChangeRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    state
        .storage
        .move_item(&req.username, &req.old_path, &req.new_path)
        .map_err(|e| ApiError::from_storage(e, "Move failed"))?;

    tracing::info!(
        username = %req.username,
        from = %req.old_path,
        to = %req.new_path,
        "Item moved"
    );

    Ok(Json(MessageResponse::new("Move successful")))
}

/// DELETE /deletepath/:username/*path - Delete an item recursively.
pub async fn delete_path(
    State(state): State<Arc<AppState>>,
    Path((username, path)): Path<(String, String)>,
) -> Result<Json<MessageResponse>, ApiError> {
    state
        .storage
        .delete(&username, &path)
        .map_err(|e| ApiError::from_storage(e, "Delete failed"))?;

    tracing::info!(username = %username, path = %path, "Item deleted");

    Ok(Json(MessageResponse::new("Delete successful")))
}
