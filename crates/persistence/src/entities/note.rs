//! Note entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database row mapping for the notes table.
#[derive(Debug, Clone, FromRow)]
pub struct NoteEntity {
    pub id: i32,
    pub title: String,
    pub content: String,
    pub category: Option<String>,
    pub user_id: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<NoteEntity> for domain::models::Note {
    fn from(entity: NoteEntity) -> Self {
        Self {
            id: entity.id,
            title: entity.title,
            content: entity.content,
            category: entity.category,
            user_id: entity.user_id,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}
