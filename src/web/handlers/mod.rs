//! API handlers for the HTTP interface.

pub mod auth;
pub mod file;

pub use auth::*;
pub use file::*;
