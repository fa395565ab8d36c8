//! Response produced when a protected resource is hit without an
//! authenticated identity in context.
//!
//! The body shape is fixed and part of the external interface:
//! `{"status":401,"error":"Unauthorized","message":...,"path":...}`.

use std::fmt;

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde::{Deserialize, Serialize};

/// Message used when the rejection carries none.
pub const DEFAULT_UNAUTHORIZED_MESSAGE: &str =
    "Full authentication is required to access this resource";

/// The structured 401 body. A pure function of (message, path).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnauthorizedBody {
    pub status: u16,
    pub error: String,
    pub message: String,
    pub path: String,
}

impl UnauthorizedBody {
    pub fn new(message: Option<&str>, path: &str) -> Self {
        Self {
            status: StatusCode::UNAUTHORIZED.as_u16(),
            error: "Unauthorized".to_string(),
            message: message.unwrap_or(DEFAULT_UNAUTHORIZED_MESSAGE).to_string(),
            path: path.to_string(),
        }
    }
}

/// Rejection raised when a handler demands an identity the request's
/// security context does not carry. Rendering is delegated to actix via
/// `ResponseError`.
#[derive(Debug)]
pub struct UnauthorizedError {
    body: UnauthorizedBody,
}

impl UnauthorizedError {
    pub fn new(message: Option<&str>, path: &str) -> Self {
        Self {
            body: UnauthorizedBody::new(message, path),
        }
    }

    pub fn body(&self) -> &UnauthorizedBody {
        &self.body
    }
}

impl fmt::Display for UnauthorizedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.body.message)
    }
}

impl ResponseError for UnauthorizedError {
    fn status_code(&self) -> StatusCode {
        StatusCode::UNAUTHORIZED
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code())
            .content_type("application/json")
            .json(&self.body)
    }
}
