//! Configuration module for Sharebox.

use serde::Deserialize;
use std::path::Path;

use crate::{Result, ShareError};

/// HTTP server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port number to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
    /// CORS allowed origins.
    #[serde(default)]
    pub cors_origins: Vec<String>,
    /// Whether to serve the browser front end from `static_path`.
    #[serde(default)]
    pub serve_static: bool,
    /// Path to static files directory.
    #[serde(default = "default_static_path")]
    pub static_path: String,
    /// Rate limit for the auth endpoint (requests per minute per IP).
    #[serde(default = "default_auth_rate_limit")]
    pub auth_rate_limit: u32,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_static_path() -> String {
    "public".to_string()
}

fn default_auth_rate_limit() -> u32 {
    10
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: vec![],
            serve_static: false,
            static_path: default_static_path(),
            auth_rate_limit: default_auth_rate_limit(),
        }
    }
}

/// File storage configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Root directory holding one subdirectory per user.
    #[serde(default = "default_storage_root")]
    pub root: String,
    /// Maximum upload request size in megabytes.
    #[serde(default = "default_max_upload_size")]
    pub max_upload_size_mb: u64,
}

fn default_storage_root() -> String {
    "uploads".to_string()
}

fn default_max_upload_size() -> u64 {
    100
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            root: default_storage_root(),
            max_upload_size_mb: default_max_upload_size(),
        }
    }
}

impl StorageConfig {
    /// Maximum upload size in bytes.
    pub fn max_upload_bytes(&self) -> usize {
        usize::try_from(self.max_upload_size_mb.saturating_mul(1024 * 1024)).unwrap_or(usize::MAX)
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Path to the log file.
    #[serde(default = "default_log_file")]
    pub file: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_file() -> String {
    "logs/sharebox.log".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: default_log_file(),
        }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Storage configuration.
    #[serde(default)]
    pub storage: StorageConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ShareError::Io)?;
        Self::parse(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| ShareError::Config(format!("config parse error: {e}")))
    }

    /// Apply environment variable overrides to the configuration.
    ///
    /// Supported environment variables:
    /// - `SHAREBOX_STORAGE_ROOT`: Override the storage root directory
    /// - `SHAREBOX_PORT`: Override the listen port
    pub fn apply_env_overrides(&mut self) {
        if let Ok(root) = std::env::var("SHAREBOX_STORAGE_ROOT") {
            if !root.is_empty() {
                self.storage.root = root;
            }
        }

        if let Ok(port) = std::env::var("SHAREBOX_PORT") {
            match port.parse() {
                Ok(port) => self.server.port = port,
                Err(_) => tracing::warn!(value = %port, "Ignoring invalid SHAREBOX_PORT"),
            }
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.server.host.trim().is_empty() {
            return Err(ShareError::Config("server.host must not be empty".to_string()));
        }
        if self.storage.max_upload_size_mb == 0 {
            return Err(ShareError::Config(
                "storage.max_upload_size_mb must be greater than 0".to_string(),
            ));
        }
        if self.server.auth_rate_limit == 0 {
            return Err(ShareError::Config(
                "server.auth_rate_limit must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}
