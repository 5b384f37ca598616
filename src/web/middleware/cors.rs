//! CORS middleware configuration.

use axum::http::header::{ACCEPT, CONTENT_TYPE};
use axum::http::{HeaderValue, Method};
use tower_http::cors::{Any, CorsLayer};

/// Methods used by the file API.
const ALLOWED_METHODS: [Method; 4] = [Method::GET, Method::POST, Method::DELETE, Method::OPTIONS];

/// Create a CORS layer from the configured origins.
///
/// With no (valid) origins every origin is allowed.
pub fn create_cors_layer(origins: &[String]) -> CorsLayer {
    let base = CorsLayer::new().allow_methods(ALLOWED_METHODS);

    let parsed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| match o.parse() {
            Ok(origin) => Some(origin),
            Err(_) => {
                tracing::warn!(origin = %o, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    if parsed.is_empty() {
        base.allow_headers(Any).allow_origin(Any)
    } else {
        base.allow_headers([CONTENT_TYPE, ACCEPT])
            .allow_origin(parsed)
    }
}
