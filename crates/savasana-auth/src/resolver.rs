//! Identity resolution: from a claimed subject to the full account record
//! used for authorization decisions.

use std::sync::Arc;

use async_trait::async_trait;
use savasana_commons::User;

use crate::context::ResolvedIdentity;
use crate::error::{AuthError, AuthResult};

/// Abstraction over user persistence for authentication flows.
///
/// Lookup is by the unique login subject (email), case-sensitive exact
/// match per the store's uniqueness constraint.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_email(&self, email: &str) -> AuthResult<Option<User>>;
}

/// Resolves a claimed subject against the user store.
pub struct IdentityResolver {
    store: Arc<dyn UserStore>,
}

impl IdentityResolver {
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self { store }
    }

    /// Load the identity for `subject`.
    ///
    /// # Errors
    /// - `AuthError::UserNotFound` when no account matches; callers must
    ///   treat this as "authentication cannot proceed", never as an
    ///   anonymous default identity.
    /// - `AuthError::Store` when the lookup itself fails.
    pub async fn resolve(&self, subject: &str) -> AuthResult<ResolvedIdentity> {
        let user = self
            .store
            .find_by_email(subject)
            .await?
            .ok_or_else(|| {
                AuthError::UserNotFound(format!("no account registered for subject '{}'", subject))
            })?;

        Ok(ResolvedIdentity::from_user(user))
    }
}
