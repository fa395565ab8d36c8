mod ids;
mod session;
mod user;

pub use ids::{SessionId, UserId};
pub use session::Session;
pub use user::User;
