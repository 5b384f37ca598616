//! Web server for Sharebox.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::compression::CompressionLayer;

use crate::config::{Config, ServerConfig};
use crate::file::FileStorage;
use crate::{Result, ShareError};

use super::handlers::AppState;
use super::middleware::RateLimitState;
use super::router::{create_health_router, create_router, create_static_router};

/// Web server for the file sharing API.
pub struct WebServer {
    /// Server address.
    addr: SocketAddr,
    /// Application state.
    app_state: Arc<AppState>,
    /// Auth endpoint limiter.
    rate_limit: Arc<RateLimitState>,
    /// Server configuration.
    server_config: ServerConfig,
}

impl WebServer {
    /// Create a new web server.
    ///
    /// Fails when the listen address is malformed or the storage root
    /// cannot be created.
    pub fn new(config: &Config) -> Result<Self> {
        let addr = format!("{}:{}", config.server.host, config.server.port)
            .parse()
            .map_err(|e| ShareError::Config(format!("invalid listen address: {e}")))?;

        let storage = FileStorage::new(&config.storage.root)?;
        tracing::info!("File storage initialized at: {}", config.storage.root);

        let app_state = AppState::new(storage).with_max_upload_size(config.storage.max_upload_bytes());

        Ok(Self {
            addr,
            app_state: Arc::new(app_state),
            rate_limit: Arc::new(RateLimitState::new(config.server.auth_rate_limit)),
            server_config: config.server.clone(),
        })
    }

    /// Get the server address.
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Get the shared application state.
    pub fn state(&self) -> Arc<AppState> {
        self.app_state.clone()
    }

    fn build_router(&self) -> Router {
        let mut router = create_router(
            self.app_state.clone(),
            self.rate_limit.clone(),
            &self.server_config.cors_origins,
        )
        .merge(create_health_router());

        if self.server_config.serve_static {
            if let Some(static_router) = create_static_router(&self.server_config.static_path) {
                router = router.merge(static_router);
            }
        }

        router.layer(CompressionLayer::new())
    }

    async fn bind(&self) -> std::io::Result<(TcpListener, SocketAddr)> {
        let listener = TcpListener::bind(self.addr).await?;
        let local_addr = listener.local_addr()?;

        self.rate_limit.clone().start_cleanup_task();
        tracing::info!("Web server listening on http://{}", local_addr);

        Ok((listener, local_addr))
    }

    /// Run the web server until it fails.
    pub async fn run(self) -> std::io::Result<()> {
        let router = self.build_router();
        let (listener, _) = self.bind().await?;

        axum::serve(
            listener,
            router.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .await
    }

    /// Run the server in the background and return the actual bound address.
    ///
    /// This is useful for testing when binding to port 0.
    pub async fn run_with_addr(self) -> std::io::Result<SocketAddr> {
        let router = self.build_router();
        let (listener, local_addr) = self.bind().await?;

        tokio::spawn(async move {
            if let Err(e) = axum::serve(
                listener,
                router.into_make_service_with_connect_info::<SocketAddr>(),
            )
            .await
            {
                tracing::error!("Web server error: {}", e);
            }
        });

        Ok(local_addr)
    }
}
