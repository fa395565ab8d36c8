//! Bearer token issuing and verification.
//!
//! Tokens are HS512-signed JWTs carrying a minimal claim set: the login
//! subject plus the issue and expiry instants. Validity is purely a
//! function of signature and expiry; there is no server-side token state.

use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::error::{AuthError, AuthResult};

/// Claim set embedded in every issued token.
///
/// Immutable once issued; a verified instance lives for a single request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the user's unique login identifier (an email).
    pub sub: String,
    /// Issued at (Unix timestamp)
    pub iat: usize,
    /// Expiration time (Unix timestamp)
    pub exp: usize,
}

impl Claims {
    /// Build a claim set for `subject` expiring `ttl` from now.
    pub fn new(subject: &str, ttl: Duration) -> Self {
        let now = Utc::now();
        let exp = now + ttl;
        Self {
            sub: subject.to_string(),
            iat: now.timestamp() as usize,
            exp: exp.timestamp() as usize,
        }
    }
}

/// Issue a signed token for `subject`, valid for `ttl`.
///
/// # Errors
/// Returns `AuthError::Configuration` for an empty secret. That is the only
/// failure mode callers should plan for; it indicates broken deployment
/// configuration and should abort startup rather than surface per request.
pub fn issue_token(subject: &str, secret: &str, ttl: Duration) -> AuthResult<String> {
    if secret.is_empty() {
        return Err(AuthError::Configuration(
            "signing secret must not be empty".to_string(),
        ));
    }

    let claims = Claims::new(subject, ttl);
    let header = Header::new(Algorithm::HS512);
    let encoding_key = EncodingKey::from_secret(secret.as_bytes());

    encode(&header, &claims, &encoding_key)
        .map_err(|e| AuthError::Configuration(format!("JWT encoding error: {}", e)))
}

/// Verify a token string and extract its claims.
///
/// Verifies the HS512 signature against `secret` and the expiry against
/// wall-clock time with zero leeway.
///
/// # Errors
/// - `AuthError::TokenExpired` if `exp` lies in the past
/// - `AuthError::InvalidSignature` if the signature does not match
/// - `AuthError::MalformedToken` for everything else, including the empty
///   string and tokens with the wrong segment count
///
/// Never panics, whatever the input.
pub fn verify_token(token: &str, secret: &str) -> AuthResult<Claims> {
    let mut validation = Validation::new(Algorithm::HS512);
    validation.validate_exp = true;
    // The library defaults to 60s of clock skew; expiry here is exact.
    validation.leeway = 0;

    let decoding_key = DecodingKey::from_secret(secret.as_bytes());
    let token_data =
        decode::<Claims>(token, &decoding_key, &validation).map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => AuthError::TokenExpired,
            ErrorKind::InvalidSignature => AuthError::InvalidSignature,
            _ => AuthError::MalformedToken(format!("JWT decode error: {}", e)),
        })?;

    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret-key-long-enough-for-hs512";

    fn token_with_exp_offset(secret: &str, exp_offset_secs: i64) -> String {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: "test@test.com".to_string(),
            iat: now as usize,
            exp: (now + exp_offset_secs) as usize,
        };
        let header = Header::new(Algorithm::HS512);
        encode(&header, &claims, &EncodingKey::from_secret(secret.as_bytes())).unwrap()
    }

    #[test]
    fn test_issue_and_verify_round_trip() {
        let token = issue_token("a@b.com", SECRET, Duration::hours(1)).unwrap();
        assert_eq!(token.split('.').count(), 3);

        let claims = verify_token(&token, SECRET).unwrap();
        assert_eq!(claims.sub, "a@b.com");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_verify_with_wrong_secret_is_bad_signature() {
        let token = issue_token("a@b.com", SECRET, Duration::hours(1)).unwrap();
        let result = verify_token(&token, "some-other-secret");
        assert!(matches!(result, Err(AuthError::InvalidSignature)));
    }

    #[test]
    fn test_verify_expired_token() {
        let token = token_with_exp_offset(SECRET, -3600);
        let result = verify_token(&token, SECRET);
        assert!(matches!(result, Err(AuthError::TokenExpired)));
    }

    #[test]
    fn test_verify_just_expired_token() {
        // One second past expiry must already fail: no skew window.
        let token = token_with_exp_offset(SECRET, -1);
        let result = verify_token(&token, SECRET);
        assert!(matches!(result, Err(AuthError::TokenExpired)));
    }

    #[test]
    fn test_verify_empty_string_is_malformed() {
        let result = verify_token("", SECRET);
        assert!(matches!(result, Err(AuthError::MalformedToken(_))));
    }

    #[test]
    fn test_verify_two_segments_is_malformed() {
        let result = verify_token("a.b", SECRET);
        assert!(matches!(result, Err(AuthError::MalformedToken(_))));
    }

    #[test]
    fn test_verify_garbage_does_not_panic() {
        for input in ["....", "Bearer x", "\0\0", "a.b.c.d", "ést.奇.字"] {
            assert!(verify_token(input, SECRET).is_err());
        }
    }

    #[test]
    fn test_issue_with_empty_secret_is_configuration_error() {
        let result = issue_token("a@b.com", "", Duration::hours(1));
        assert!(matches!(result, Err(AuthError::Configuration(_))));
    }

    #[test]
    fn test_subject_preserved_verbatim() {
        // Whatever text lives in the subject is the caller's concern; the
        // codec must round-trip it untouched.
        let odd_subject = "'; DROP TABLE users; --";
        let token = issue_token(odd_subject, SECRET, Duration::hours(1)).unwrap();
        let claims = verify_token(&token, SECRET).unwrap();
        assert_eq!(claims.sub, odd_subject);
    }
}
