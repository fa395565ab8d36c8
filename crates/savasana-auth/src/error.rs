//! Error taxonomy for the authentication crate.

use thiserror::Error;

/// Authentication failures.
///
/// The three token-verification variants (`MalformedToken`,
/// `InvalidSignature`, `TokenExpired`) all collapse to "unauthenticated"
/// at the request boundary; they stay distinct here so the verification
/// path can be tested per failure kind.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Wrong segment count, bad base64/JSON payload, or an empty token.
    #[error("malformed token: {0}")]
    MalformedToken(String),

    /// The signature does not match the configured secret.
    #[error("token signature verification failed")]
    InvalidSignature,

    /// The token's expiry instant lies in the past.
    #[error("token has expired")]
    TokenExpired,

    /// Invalid signing setup (e.g. an empty secret). Fatal at startup,
    /// never raised by request-time verification.
    #[error("authentication configuration error: {0}")]
    Configuration(String),

    /// The claimed subject matches no account. Distinct from an anonymous
    /// request: authentication cannot proceed for this token.
    #[error("user not found: {0}")]
    UserNotFound(String),

    /// The user store failed to answer the lookup.
    #[error("user store error: {0}")]
    Store(String),
}

impl AuthError {
    /// True for the verification failures that make a presented token
    /// invalid, regardless of kind.
    pub fn is_invalid_token(&self) -> bool {
        matches!(
            self,
            AuthError::MalformedToken(_) | AuthError::InvalidSignature | AuthError::TokenExpired
        )
    }
}

pub type AuthResult<T> = Result<T, AuthError>;
