//! Authentication module for Sharebox.
//!
//! This module provides the in-memory register-or-login user list and
//! username validation.

mod registry;
pub mod validation;

pub use registry::{AuthOutcome, User, UserRegistry};
pub use validation::{validate_username, ValidationError};
