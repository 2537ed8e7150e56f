//! Infrastructure-backed implementations of domain capabilities.

pub mod auth;

pub use auth::JwtAuthenticator;
