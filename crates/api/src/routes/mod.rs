//! HTTP route handlers.

pub mod health;
pub mod notes;
pub mod users;
