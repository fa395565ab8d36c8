//! Request-scoped identity: the resolved account and the security context
//! that carries it through a single request.
//!
//! The context is an explicit value threaded through the request-handling
//! call chain (the HTTP layer parks it in request extensions, which are
//! dropped with the request). There is no thread-local slot, so identities
//! cannot leak between requests on a pooled worker.

use savasana_commons::{User, UserId};

/// The account a verified token resolved to, loaded fresh from the user
/// store for exactly one request.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedIdentity {
    pub id: UserId,
    /// The unique login subject (email).
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password_hash: String,
    /// Single admin flag; present in the model but not consulted by any
    /// access-control decision in this crate.
    pub admin: bool,
}

impl ResolvedIdentity {
    /// Build the identity from a stored user record. The sole constructor.
    pub fn from_user(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            password_hash: user.password_hash,
            admin: user.admin,
        }
    }
}

/// Holds at most one resolved identity for the current request.
///
/// An empty context means "treat as anonymous" and is never an error by
/// itself; denial happens downstream when a protected resource is hit.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SecurityContext {
    identity: Option<ResolvedIdentity>,
}

impl SecurityContext {
    /// The context every request starts with.
    pub fn anonymous() -> Self {
        Self { identity: None }
    }

    /// A context carrying a successfully resolved identity. The identity
    /// is set exactly once, here; there is no setter.
    pub fn authenticated(identity: ResolvedIdentity) -> Self {
        Self {
            identity: Some(identity),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.identity.is_some()
    }

    pub fn identity(&self) -> Option<&ResolvedIdentity> {
        self.identity.as_ref()
    }

    pub fn into_identity(self) -> Option<ResolvedIdentity> {
        self.identity
    }
}
