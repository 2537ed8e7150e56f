//! Domain layer for the notes service backend.
//!
//! This crate contains:
//! - Domain models (Note, User) and their request/response payloads
//! - Storage and authentication seams (`NoteStore`, `UserStore`, `Authenticator`)
//! - The note and user action services
//! - Domain error types

pub mod errors;
pub mod models;
pub mod services;

pub use errors::DomainError;
