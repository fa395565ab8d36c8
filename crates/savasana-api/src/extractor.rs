//! Handler-side identity guard.
//!
//! Handlers that require an authenticated caller take `Authenticated` as a
//! parameter. The authentication middleware only attaches (or withholds)
//! the identity; this extractor is where anonymous access to a protected
//! resource is actually denied, rendering the fixed 401 body.
//!
//! ```rust,ignore
//! #[get("/api/me")]
//! async fn me(identity: Authenticated) -> impl Responder {
//!     HttpResponse::Ok().json(&identity.email)
//! }
//! ```

use std::future::{ready, Ready};
use std::ops::Deref;

use actix_web::{dev::Payload, FromRequest, HttpMessage, HttpRequest};
use savasana_auth::{ResolvedIdentity, SecurityContext};

use crate::responder::UnauthorizedError;

/// The request's resolved identity, required to be present.
#[derive(Debug, Clone)]
pub struct Authenticated(pub ResolvedIdentity);

impl Deref for Authenticated {
    type Target = ResolvedIdentity;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequest for Authenticated {
    type Error = UnauthorizedError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let identity = req
            .extensions()
            .get::<SecurityContext>()
            .and_then(|ctx| ctx.identity().cloned());

        ready(match identity {
            Some(identity) => Ok(Authenticated(identity)),
            // Covers both an anonymous context and a missing one (the
            // middleware not being mounted treats everyone as anonymous).
            None => Err(UnauthorizedError::new(None, req.path())),
        })
    }
}
