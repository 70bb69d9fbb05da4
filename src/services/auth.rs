//! Identity types and the pluggable authenticator.
//!
//! The login API contract (token shape, storage, remember-me meaning) is
//! not defined anywhere yet. `Authenticator` is the seam where it plugs in;
//! until then `PendingAuthenticator` records the attempt and refuses it.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Authenticated identity held by a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentUser {
    pub id: Uuid,
    pub name: String,
    pub email: String,
}

/// Sign-in credentials. `Debug` never prints the password.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
    pub remember: bool,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("remember", &self.remember)
            .finish()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("use_auth must be used inside an auth provider")]
    MissingProvider,
    #[error("sign-in is not available yet")]
    NotConfigured,
    #[error("invalid email or password")]
    InvalidCredentials,
    #[error("authentication backend error: {0}")]
    Backend(String),
}

#[async_trait::async_trait]
pub trait Authenticator: Send + Sync {
    async fn authenticate(&self, credentials: &Credentials) -> Result<CurrentUser, AuthError>;
}

/// Default authenticator: logs the attempt and rejects it.
#[derive(Debug, Clone, Copy, Default)]
pub struct PendingAuthenticator;

#[async_trait::async_trait]
impl Authenticator for PendingAuthenticator {
    async fn authenticate(&self, credentials: &Credentials) -> Result<CurrentUser, AuthError> {
        tracing::info!(email = %credentials.email, remember = credentials.remember, "sign-in submitted");
        Err(AuthError::NotConfigured)
    }
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;
