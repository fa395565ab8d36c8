//! Signing configuration for token issuing and verification.

use chrono::Duration;

use crate::error::{AuthError, AuthResult};
use crate::jwt::{self, Claims};

/// The signing secret and token lifetime, validated once at startup and
/// passed explicitly to whatever needs to issue or verify tokens.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    secret: String,
    token_ttl: Duration,
}

impl AuthConfig {
    /// Validate and build the signing configuration.
    ///
    /// # Errors
    /// Returns `AuthError::Configuration` for an empty secret, so a broken
    /// deployment fails at startup instead of rejecting every request.
    pub fn new(secret: impl Into<String>, token_ttl: Duration) -> AuthResult<Self> {
        let secret = secret.into();
        if secret.is_empty() {
            return Err(AuthError::Configuration(
                "signing secret must not be empty".to_string(),
            ));
        }
        Ok(Self { secret, token_ttl })
    }

    /// Issue a token for `subject` with this configuration's lifetime.
    pub fn issue(&self, subject: &str) -> AuthResult<String> {
        jwt::issue_token(subject, &self.secret, self.token_ttl)
    }

    /// Verify a token against this configuration's secret.
    pub fn verify(&self, token: &str) -> AuthResult<Claims> {
        jwt::verify_token(token, &self.secret)
    }

    pub fn token_ttl(&self) -> Duration {
        self.token_ttl
    }
}
