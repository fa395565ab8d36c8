//! Type-safe wrappers for entity identifiers.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Type-safe wrapper for user identifiers.
///
/// Ensures user ids cannot be accidentally used where session ids are
/// expected. Both stores key their rows by 64-bit surrogate keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(i64);

impl UserId {
    /// Creates a new UserId from a raw key.
    #[inline]
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns the raw key.
    #[inline]
    pub fn get(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for UserId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

/// Type-safe wrapper for session identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(i64);

impl SessionId {
    /// Creates a new SessionId from a raw key.
    #[inline]
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns the raw key.
    #[inline]
    pub fn get(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for SessionId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}
