// Savasana authentication library
// Provides token issuing/verification, identity resolution, and the
// per-request authenticator that populates the security context.

pub mod authenticator;
pub mod config;
pub mod context;
pub mod error;
pub mod jwt;
pub mod resolver;

// Re-export commonly used types
pub use authenticator::RequestAuthenticator;
pub use config::AuthConfig;
pub use context::{ResolvedIdentity, SecurityContext};
pub use error::{AuthError, AuthResult};
pub use resolver::{IdentityResolver, UserStore};
