//! Per-request authentication.
//!
//! One pass per inbound request: extract the bearer token, verify it,
//! resolve the claimed subject, and produce the security context. Every
//! failure along the way yields the anonymous context as a normal branch;
//! nothing here ever rejects a request or surfaces an error to the caller.
//! Denial of anonymous access is the job of whatever guards the protected
//! resource downstream.

use log::{debug, warn};

use crate::config::AuthConfig;
use crate::context::SecurityContext;
use crate::error::AuthError;
use crate::resolver::IdentityResolver;

/// The literal header prefix, matched case-sensitively with its single
/// trailing space.
const BEARER_PREFIX: &str = "Bearer ";

/// Runs the authentication pass for one request.
pub struct RequestAuthenticator {
    config: AuthConfig,
    resolver: IdentityResolver,
}

impl RequestAuthenticator {
    pub fn new(config: AuthConfig, resolver: IdentityResolver) -> Self {
        Self { config, resolver }
    }

    /// Authenticate one request given its `Authorization` header value.
    ///
    /// Evaluated in order, short-circuiting to the anonymous context on
    /// the first failure:
    /// 1. no header, or no exact `"Bearer "` prefix — verification is not
    ///    attempted and the user store is never consulted;
    /// 2. token verification fails (malformed, bad signature, expired);
    /// 3. the claimed subject resolves to no account, or the store lookup
    ///    fails.
    pub async fn authenticate(&self, authorization: Option<&str>) -> SecurityContext {
        let Some(header) = authorization else {
            return SecurityContext::anonymous();
        };

        // Case-sensitive, single space. A header of exactly "Bearer "
        // leaves an empty candidate, which verification then rejects.
        let Some(candidate) = header.strip_prefix(BEARER_PREFIX) else {
            return SecurityContext::anonymous();
        };

        let claims = match self.config.verify(candidate) {
            Ok(claims) => claims,
            Err(e) => {
                debug!("bearer token rejected: {}", e);
                return SecurityContext::anonymous();
            }
        };

        match self.resolver.resolve(&claims.sub).await {
            Ok(identity) => SecurityContext::authenticated(identity),
            Err(e @ AuthError::UserNotFound(_)) => {
                debug!("token subject did not resolve: {}", e);
                SecurityContext::anonymous()
            }
            Err(e) => {
                warn!("identity resolution failed, continuing anonymous: {}", e);
                SecurityContext::anonymous()
            }
        }
    }
}
