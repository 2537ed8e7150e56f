//! Domain models for the notes service.

pub mod note;
pub mod user;

pub use note::{
    CreateNoteRequest, DeleteNoteResponse, NewNote, Note, NoteChanges, SearchNotesQuery,
    UpdateNoteRequest,
};
pub use user::{
    AuthResponse, LoginRequest, NewUser, ProfileResponse, PublicUser, RegisterRequest, User,
};
