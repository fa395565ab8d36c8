//! Authentication middleware for the Savasana API
//!
//! Runs one authentication pass per request:
//! 1. Reads the Authorization header from the inbound request
//! 2. Verifies the bearer token and resolves the claimed identity
//! 3. Attaches the resulting security context to request extensions
//! 4. Always forwards to the inner service — authentication failures leave
//!    the context anonymous and are only denied downstream, when a handler
//!    demands an identity
//!
//! ## Usage
//!
//! ```rust,ignore
//! use savasana_api::middleware::AuthenticationMiddleware;
//! use actix_web::App;
//!
//! App::new()
//!     .wrap(AuthenticationMiddleware::new(authenticator.clone()))
//!     .service(my_protected_endpoint)
//! ```

use std::{
    future::{ready, Ready},
    rc::Rc,
    sync::Arc,
};

use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::header,
    Error, HttpMessage,
};
use futures_util::future::LocalBoxFuture;
use log::debug;
use savasana_auth::RequestAuthenticator;

/// Authentication middleware factory.
pub struct AuthenticationMiddleware {
    authenticator: Arc<RequestAuthenticator>,
}

impl AuthenticationMiddleware {
    pub fn new(authenticator: Arc<RequestAuthenticator>) -> Self {
        Self { authenticator }
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthenticationMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = AuthenticationService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthenticationService {
            service: Rc::new(service),
            authenticator: self.authenticator.clone(),
        }))
    }
}

/// Authentication middleware service instance.
pub struct AuthenticationService<S> {
    service: Rc<S>,
    authenticator: Arc<RequestAuthenticator>,
}

impl<S, B> Service<ServiceRequest> for AuthenticationService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();
        let authenticator = self.authenticator.clone();

        Box::pin(async move {
            // A header that is not valid UTF-8 cannot carry a bearer token;
            // it is treated the same as an absent header.
            let authorization = req
                .headers()
                .get(header::AUTHORIZATION)
                .and_then(|value| value.to_str().ok())
                .map(str::to_owned);

            let context = authenticator.authenticate(authorization.as_deref()).await;
            match context.identity() {
                Some(identity) => {
                    debug!("{} {} authenticated as {}", req.method(), req.path(), identity.email)
                }
                None => debug!("{} {} proceeding anonymous", req.method(), req.path()),
            }
            req.extensions_mut().insert(context);

            service.call(req).await
        })
    }
}
