//! Rate limiting middleware.

use axum::{
    body::Body,
    extract::ConnectInfo,
    http::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};
use governor::{DefaultKeyedRateLimiter, Quota, RateLimiter};
use std::{net::SocketAddr, num::NonZeroU32, sync::Arc, time::Duration};

use crate::web::error::ApiError;

/// How often idle per-IP entries are dropped.
const CLEANUP_INTERVAL: Duration = Duration::from_secs(300);

/// Per-IP limiter for the auth endpoint.
///
/// Credentials are plaintext and checked on every call, so repeated
/// guesses from one address are throttled.
pub struct RateLimitState {
    limiter: DefaultKeyedRateLimiter<String>,
    auth_rate_limit: u32,
}

impl RateLimitState {
    /// Create a limiter allowing `auth_rate_limit` requests per minute per IP.
    pub fn new(auth_rate_limit: u32) -> Self {
        let per_minute = NonZeroU32::new(auth_rate_limit).unwrap_or(NonZeroU32::MIN);
        Self {
            limiter: RateLimiter::keyed(Quota::per_minute(per_minute)),
            auth_rate_limit,
        }
    }

    /// Configured requests per minute.
    pub fn auth_rate_limit(&self) -> u32 {
        self.auth_rate_limit
    }

    /// Check whether a request from `ip` is allowed.
    pub fn check_auth(&self, ip: &str) -> bool {
        self.limiter.check_key(&ip.to_string()).is_ok()
    }

    /// Number of addresses currently tracked.
    pub fn tracked(&self) -> usize {
        self.limiter.len()
    }

    /// Drop entries whose quota has fully replenished.
    pub fn cleanup(&self) {
        self.limiter.retain_recent();
        self.limiter.shrink_to_fit();
    }

    /// Start a background task to periodically clean up old entries.
    pub fn start_cleanup_task(self: Arc<Self>) {
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(CLEANUP_INTERVAL);
            interval.tick().await;
            loop {
                interval.tick().await;
                self.cleanup();
                tracing::debug!(tracked = self.tracked(), "Rate limiter cleaned up");
            }
        });
    }
}

/// Extract client IP from request.
///
/// Proxy headers win over the socket address.
fn client_ip(req: &Request<Body>) -> String {
    let header = |name: &str| {
        req.headers()
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.split(',').next().unwrap_or(v).trim().to_string())
            .filter(|v| !v.is_empty())
    };

    header("X-Forwarded-For")
        .or_else(|| header("X-Real-IP"))
        .or_else(|| {
            req.extensions()
                .get::<ConnectInfo<SocketAddr>>()
                .map(|ConnectInfo(addr)| addr.ip().to_string())
        })
        .unwrap_or_else(|| "unknown".to_string())
}

/// Rate limiting middleware for the auth endpoint.
pub async fn auth_rate_limit(
    state: Arc<RateLimitState>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let ip = client_ip(&req);

    if !state.check_auth(&ip) {
        tracing::warn!(ip = %ip, "Auth rate limit exceeded");
        return ApiError::too_many_requests("Too many login attempts. Please try again later.")
            .into_response();
    }

    next.run(req).await
}
