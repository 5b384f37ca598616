//! In-memory user registry.
//!
//! Credentials are kept as plaintext in a flat list and are lost when the
//! process exits. The first successful call for a username registers it.

use tokio::sync::RwLock;

use super::validation::validate_username;
use crate::{Result, ShareError};

/// A registered user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    /// Username (unique).
    pub username: String,
    /// Plaintext password.
    pub password: String,
}

/// Result of a successful register-or-login call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthOutcome {
    /// The username was unknown and has been registered.
    Registered,
    /// The username was known and the password matched.
    LoggedIn,
}

impl AuthOutcome {
    /// Message reported to the client.
    pub fn message(&self) -> &'static str {
        match self {
            AuthOutcome::Registered => "Registered and logged in",
            AuthOutcome::LoggedIn => "Logged in",
        }
    }
}

/// Flat list of users shared across requests.
#[derive(Debug, Default)]
pub struct UserRegistry {
    users: RwLock<Vec<User>>,
}

impl UserRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the user if unknown, otherwise check the password.
    ///
    /// Returns `ShareError::Validation` for missing fields or an unusable
    /// username and `ShareError::Auth` for a wrong password.
    pub async fn authenticate(&self, username: &str, password: &str) -> Result<AuthOutcome> {
        if username.is_empty() || password.is_empty() {
            return Err(ShareError::Validation("Missing fields".to_string()));
        }
        validate_username(username).map_err(|e| ShareError::Validation(e.to_string()))?;

        let mut users = self.users.write().await;
        if let Some(user) = users.iter().find(|u| u.username == username) {
            if user.password != password {
                return Err(ShareError::Auth("Invalid password".to_string()));
            }
            return Ok(AuthOutcome::LoggedIn);
        }

        users.push(User {
            username: username.to_string(),
            password: password.to_string(),
        });
        Ok(AuthOutcome::Registered)
    }

    /// Whether a username has been registered.
    pub async fn contains(&self, username: &str) -> bool {
        self.users
            .read()
            .await
            .iter()
            .any(|u| u.username == username)
    }

    /// Number of registered users.
    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    /// Whether no user has registered yet.
    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}
