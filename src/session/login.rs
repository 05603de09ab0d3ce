//! Placeholder login: presence check only, no verification.

use chrono::{DateTime, Utc};
use secrecy::{ExposeSecret, SecretString};

use crate::error::LoginError;

/// Identifier/secret pair as typed into the login form.
pub struct Credentials {
    pub identifier: String,
    pub secret: SecretString,
}

impl Credentials {
    pub fn new(identifier: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            secret: SecretString::from(secret.into()),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("identifier", &self.identifier)
            .field("secret", &"[REDACTED]")
            .finish()
    }
}

/// The logged-in user. Carries the submitted credentials through unchanged.
#[derive(Debug)]
pub struct User {
    pub credentials: Credentials,
    pub logged_in_at: DateTime<Utc>,
}

impl User {
    pub fn identifier(&self) -> &str {
        &self.credentials.identifier
    }
}

/// Check that both fields are filled in. Whitespace-only counts as empty.
pub fn login(credentials: Credentials) -> Result<User, LoginError> {
    if credentials.identifier.trim().is_empty() || credentials.secret.expose_secret().trim().is_empty()
    {
        return Err(LoginError::EmptyFields);
    }
    Ok(User {
        credentials,
        logged_in_at: Utc::now(),
    })
}
