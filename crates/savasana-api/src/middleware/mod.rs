mod auth;

pub use auth::AuthenticationMiddleware;
