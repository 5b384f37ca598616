//! HTTP interface for Sharebox.
//!
//! Exposes the JSON and multipart endpoints used by the browser front end,
//! plus an optional static file server for the front end itself.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod server;

pub use error::ApiError;
pub use handlers::AppState;
pub use router::create_router;
pub use server::WebServer;
