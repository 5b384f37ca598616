//! Router configuration for the HTTP interface.

use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{delete, get, post},
    Router,
};
use std::path::Path;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use super::handlers::{
    authenticate, delete_path, download, list_path, list_root, move_item, rename, upload, view,
    AppState,
};
use super::middleware::{auth_rate_limit, create_cors_layer, security_headers, RateLimitState};

/// Create the main API router.
pub fn create_router(
    app_state: Arc<AppState>,
    rate_limit: Arc<RateLimitState>,
    cors_origins: &[String],
) -> Router {
    let auth_routes = Router::new()
        .route("/auth", post(authenticate))
        .route_layer(middleware::from_fn(move |req, next| {
            let state = rate_limit.clone();
            auth_rate_limit(state, req, next)
        }));

    let file_routes = Router::new()
        .route("/upload", post(upload))
        .route("/list/:username", get(list_root))
        .route("/list/:username/", get(list_root))
        .route("/list/:username/*path", get(list_path))
        .route("/download/:username/*path", get(download))
        .route("/view/:username/*path", get(view))
        .route("/rename", post(rename))
        .route("/move", post(move_item))
        .route("/deletepath/:username/*path", delete(delete_path));

    let max_upload_size = app_state.max_upload_size;

    Router::new()
        .merge(auth_routes)
        .merge(file_routes)
        .layer(DefaultBodyLimit::max(max_upload_size))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(create_cors_layer(cors_origins))
                .layer(middleware::from_fn(security_headers)),
        )
        .with_state(app_state)
}

/// Create a health check router.
pub fn create_health_router() -> Router {
    Router::new().route("/health", get(health_check))
}

/// Health check handler.
async fn health_check() -> &'static str {
    "OK"
}

/// Create a router serving the browser front end.
///
/// Returns `None` when the directory does not exist.
pub fn create_static_router(static_path: &str) -> Option<Router> {
    let path = Path::new(static_path);
    if !path.is_dir() {
        tracing::warn!(path = %static_path, "Static directory not found; front end disabled");
        return None;
    }

    let serve_dir = ServeDir::new(path).append_index_html_on_directories(true);
    Some(Router::new().fallback_service(serve_dir))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use tempfile::TempDir;
    use tower::util::ServiceExt;

    use crate::file::FileStorage;

    fn test_router(temp_dir: &TempDir) -> Router {
        let storage = FileStorage::new(temp_dir.path()).unwrap();
        let state = Arc::new(AppState::new(storage));
        create_router(state, Arc::new(RateLimitState::new(100)), &[])
    }

    #[tokio::test]
    async fn test_health_router() {
        let response = create_health_router()
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&body[..], b"OK");
    }

    #[tokio::test]
    async fn test_router_sets_security_headers() {
        let temp_dir = TempDir::new().unwrap();

        let response = test_router(&temp_dir)
            .oneshot(
                Request::builder()
                    .uri("/list/alice")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get("x-content-type-options").unwrap(),
            "nosniff"
        );
    }

    #[tokio::test]
    async fn test_auth_route_is_rate_limited() {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileStorage::new(temp_dir.path()).unwrap();
        let state = Arc::new(AppState::new(storage));
        let router = create_router(state, Arc::new(RateLimitState::new(1)), &[]);

        let request = || {
            Request::builder()
                .method("POST")
                .uri("/auth")
                .header("content-type", "application/json")
                .header("x-forwarded-for", "203.0.113.7")
                .body(Body::from(r#"{"username":"alice","password":"pw"}"#))
                .unwrap()
        };

        let first = router.clone().oneshot(request()).await.unwrap();
        assert_eq!(first.status(), StatusCode::OK);

        let second = router.oneshot(request()).await.unwrap();
        assert_eq!(second.status(), StatusCode::TOO_MANY_REQUESTS);
    }

    #[test]
    fn test_static_router_missing_dir() {
        assert!(create_static_router("/definitely/not/here").is_none());
    }

    #[tokio::test]
    async fn test_static_router_serves_index() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join("index.html"), "<h1>share</h1>").unwrap();

        let router = create_static_router(temp_dir.path().to_str().unwrap()).unwrap();
        let response = router
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&body[..], b"<h1>share</h1>");
    }
}
