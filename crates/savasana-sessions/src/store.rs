//! Persistence contracts consumed by the session service.
//!
//! Write operations are single-row and durable when they return.

use async_trait::async_trait;
use savasana_commons::{Session, SessionId, User, UserId};

use crate::error::SessionResult;

/// Abstraction over session persistence.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn find_by_id(&self, id: SessionId) -> SessionResult<Option<Session>>;

    async fn find_all(&self) -> SessionResult<Vec<Session>>;

    /// Insert or replace the row for `session.id`, returning the stored
    /// record.
    async fn save(&self, session: Session) -> SessionResult<Session>;

    async fn delete_by_id(&self, id: SessionId) -> SessionResult<()>;
}

/// The slice of the user store the roster protocol needs: an existence
/// lookup by id.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_id(&self, id: UserId) -> SessionResult<Option<User>>;
}
