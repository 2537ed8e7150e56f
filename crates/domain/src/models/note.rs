//! Note domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// A note, optionally owned by a user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: i32,
    pub title: String,
    pub content: String,
    pub category: Option<String>,
    pub user_id: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request payload for creating a note.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateNoteRequest {
    #[validate(length(min = 1, max = 255, message = "Title must be 1-255 characters"))]
    pub title: String,

    #[validate(length(min = 1, message = "Content is required"))]
    pub content: String,

    #[validate(length(max = 50, message = "Category must be at most 50 characters"))]
    pub category: Option<String>,
}

/// Request payload for a partial note update.
///
/// Absent fields (and an explicit `null`) leave the stored value unchanged.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateNoteRequest {
    #[validate(length(min = 1, max = 255, message = "Title must be 1-255 characters"))]
    pub title: Option<String>,

    #[validate(length(min = 1, message = "Content must not be empty"))]
    pub content: Option<String>,

    #[validate(length(max = 50, message = "Category must be at most 50 characters"))]
    pub category: Option<String>,
}

/// Query parameters for `GET /api/notes/search`.
///
/// A missing `query` is the empty string, which matches every note.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchNotesQuery {
    #[serde(default)]
    pub query: String,
}

/// Confirmation returned after a note is deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteNoteResponse {
    pub message: String,
}

impl DeleteNoteResponse {
    pub fn deleted() -> Self {
        Self {
            message: "Note deleted successfully".to_string(),
        }
    }
}

/// Validated input for inserting a note row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewNote {
    pub title: String,
    pub content: String,
    pub category: Option<String>,
    pub user_id: Option<i32>,
}

impl NewNote {
    pub fn from_request(request: CreateNoteRequest, user_id: Option<i32>) -> Self {
        Self {
            title: request.title,
            content: request.content,
            category: request.category,
            user_id,
        }
    }
}

/// Validated set of fields to overwrite on an existing note.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteChanges {
    pub title: Option<String>,
    pub content: Option<String>,
    pub category: Option<String>,
}

impl NoteChanges {
    /// True when the update carries no field at all.
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none() && self.category.is_none()
    }

    /// Applies the supplied fields to `note`, leaving the rest untouched.
    pub fn apply_to(self, note: &mut Note) {
        if let Some(title) = self.title {
            note.title = title;
        }
        if let Some(content) = self.content {
            note.content = content;
        }
        if let Some(category) = self.category {
            note.category = Some(category);
        }
    }
}

impl From<UpdateNoteRequest> for NoteChanges {
    fn from(request: UpdateNoteRequest) -> Self {
        Self {
            title: request.title,
            content: request.content,
            category: request.category,
        }
    }
}
