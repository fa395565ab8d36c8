// Savasana sessions library
// Session CRUD passthroughs and the roster join/leave protocol.

pub mod error;
pub mod service;
pub mod store;

pub use error::{SessionError, SessionResult};
pub use service::SessionService;
pub use store::{SessionStore, UserStore};
