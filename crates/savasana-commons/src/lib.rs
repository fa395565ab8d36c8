// Savasana shared domain library
// Id newtypes and the entity records used across the auth and sessions crates.

pub mod models;

pub use models::{Session, SessionId, User, UserId};
