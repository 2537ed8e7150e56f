//! Database entity definitions.
//!
//! Entities are direct mappings to database rows. Columns are stored in
//! camelCase and aliased to snake_case in each query.

pub mod note;
pub mod user;

pub use note::NoteEntity;
pub use user::UserEntity;
