//! The bookable session record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{SessionId, UserId};

/// A bookable class session.
///
/// `participants` is stored as an ordered list but carries set semantics:
/// a given user id appears at most once. That invariant is enforced by the
/// roster operations in `savasana-sessions`, not by this type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub id: SessionId,
    pub name: String,
    pub date: DateTime<Utc>,
    pub description: String,
    /// The instructor assigned to this session, if any. Teacher records
    /// live behind a plain lookup elsewhere and carry no logic here.
    pub teacher_id: Option<i64>,
    pub participants: Vec<UserId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Session {
    /// Create a session with an empty roster and both timestamps set to now.
    pub fn new(
        id: SessionId,
        name: impl Into<String>,
        date: DateTime<Utc>,
        description: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            name: name.into(),
            date,
            description: description.into(),
            teacher_id: None,
            participants: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether the given user is already on the roster.
    #[inline]
    pub fn has_participant(&self, user_id: UserId) -> bool {
        self.participants.contains(&user_id)
    }
}
