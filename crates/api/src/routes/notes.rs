//! Note endpoint handlers.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use domain::models::{
    CreateNoteRequest, DeleteNoteResponse, Note, SearchNotesQuery, UpdateNoteRequest,
};
use tracing::debug;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::OptionalAuthUser;
use crate::middleware::metrics::record_note_mutation;

/// List all notes, newest first.
///
/// GET /api/notes
pub async fn list_notes(State(state): State<AppState>) -> Result<Json<Vec<Note>>, ApiError> {
    let notes = state.notes.list().await?;
    Ok(Json(notes))
}

/// Search notes by title or content.
///
/// GET /api/notes/search?query=<text>
pub async fn search_notes(
    State(state): State<AppState>,
    Query(params): Query<SearchNotesQuery>,
) -> Result<Json<Vec<Note>>, ApiError> {
    let notes = state.notes.search(&params.query).await?;
    debug!(matches = notes.len(), "Note search completed");
    Ok(Json(notes))
}

/// Get a note by ID.
///
/// GET /api/notes/:id
pub async fn get_note(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Note>, ApiError> {
    let note = state.notes.get(id).await?;
    Ok(Json(note))
}

/// Create a note. A valid bearer token makes the caller its owner.
///
/// POST /api/notes
pub async fn create_note(
    State(state): State<AppState>,
    OptionalAuthUser(user): OptionalAuthUser,
    Json(request): Json<CreateNoteRequest>,
) -> Result<(StatusCode, Json<Note>), ApiError> {
    let owner = user.map(|u| u.user_id);
    let note = state.notes.create(request, owner).await?;
    record_note_mutation("created");

    Ok((StatusCode::CREATED, Json(note)))
}

/// Partially update a note.
///
/// PATCH /api/notes/:id
pub async fn update_note(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(request): Json<UpdateNoteRequest>,
) -> Result<Json<Note>, ApiError> {
    let note = state.notes.update(id, request).await?;
    record_note_mutation("updated");

    Ok(Json(note))
}

/// Delete a note.
///
/// DELETE /api/notes/:id
pub async fn delete_note(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<DeleteNoteResponse>, ApiError> {
    let response = state.notes.remove(id).await?;
    record_note_mutation("deleted");

    Ok(Json(response))
}
