//! Error taxonomy for session and roster operations.
//!
//! These errors are not recovered locally; they propagate as typed values
//! for the calling layer to translate into status codes (NotFound -> 404,
//! BadRequest -> 400).

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SessionError {
    /// A referenced entity (session or user) does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// A state precondition was violated: joining a roster twice, or
    /// leaving a roster one is not on. Repeating a join/leave that would
    /// have no effect is a reported error, not a silent no-op.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// The underlying store failed.
    #[error("store error: {0}")]
    Store(String),
}

pub type SessionResult<T> = Result<T, SessionError>;
