// Savasana HTTP boundary
// Request authentication middleware, the Authenticated extractor, the
// unauthorized-access responder, and typed-error to status-code mapping.

pub mod error;
pub mod extractor;
pub mod middleware;
pub mod responder;

pub use error::ApiError;
pub use extractor::Authenticated;
pub use middleware::AuthenticationMiddleware;
pub use responder::{UnauthorizedBody, UnauthorizedError};
