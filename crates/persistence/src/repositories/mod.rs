//! Repository implementations for database operations.
//!
//! Each repository exposes sqlx-level queries and implements the matching
//! domain store trait on top of them.

pub mod note;
pub mod user;

pub use note::NoteRepository;
pub use user::UserRepository;

use domain::DomainError;
use tracing::error;

const UNIQUE_VIOLATION: &str = "23505";

pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.code().as_deref() == Some(UNIQUE_VIOLATION))
}

/// Converts a sqlx error into a domain error, logging the database detail.
pub(crate) fn storage_error(err: sqlx::Error) -> DomainError {
    error!(error = %err, "Database operation failed");
    DomainError::Storage(err.to_string())
}
