//! Domain services for the notes service.
//!
//! Services hold the action logic and reach storage and cryptography only
//! through the traits declared here.

pub mod auth;
pub mod notes;
pub mod users;

pub use auth::{Authenticator, MockAuthenticator, TokenIdentity};
pub use notes::{sample_notes, MockNoteStore, NoteService, NoteStore};
pub use users::{MockUserStore, UserService, UserStore};
