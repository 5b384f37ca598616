//! Username validation.
//!
//! Usernames double as directory names under the storage root, so they
//! must be a single, ordinary path component.

use thiserror::Error;

/// Maximum username length (in characters).
pub const MAX_USERNAME_LENGTH: usize = 64;

/// Validation errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Username is empty.
    #[error("username cannot be empty")]
    UsernameEmpty,

    /// Username is too long.
    #[error("username must be at most {MAX_USERNAME_LENGTH} characters")]
    UsernameTooLong,

    /// Username would not be a plain directory name.
    #[error("username contains invalid characters")]
    UsernameInvalidChars,
}

/// Validate a username.
///
/// # Examples
///
/// ```
/// use sharebox::auth::validation::validate_username;
///
/// assert!(validate_username("alice").is_ok());
/// assert!(validate_username("..").is_err());
/// assert!(validate_username("a/b").is_err());
/// ```
pub fn validate_username(username: &str) -> Result<(), ValidationError> {
    if username.is_empty() {
        return Err(ValidationError::UsernameEmpty);
    }
    if username.chars().count() > MAX_USERNAME_LENGTH {
        return Err(ValidationError::UsernameTooLong);
    }
    if username == "." || username == ".." {
        return Err(ValidationError::UsernameInvalidChars);
    }
    if username
        .chars()
        .any(|c| c == '/' || c == '\\' || c.is_control())
    {
        return Err(ValidationError::UsernameInvalidChars);
    }

    Ok(())
}
