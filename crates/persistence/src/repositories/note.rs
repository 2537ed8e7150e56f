//! Note repository for database operations.

use domain::models::{NewNote, Note, NoteChanges};
use domain::services::NoteStore;
use domain::DomainError;
use sqlx::PgPool;

use super::storage_error;
use crate::entities::NoteEntity;
use crate::metrics::QueryTimer;

/// Escapes LIKE wildcards so the query matches as a literal substring.
fn escape_like(query: &str) -> String {
    let mut escaped = String::with_capacity(query.len());
    for c in query.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Repository for note database operations.
#[derive(Clone)]
pub struct NoteRepository {
    pool: PgPool,
}

impl NoteRepository {
    /// Creates a new NoteRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// All notes, newest first.
    pub async fn find_all(&self) -> Result<Vec<NoteEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_notes");
        let result = sqlx::query_as::<_, NoteEntity>(
            r#"
            SELECT id, title, content, category, "userId" AS user_id,
                   "createdAt" AS created_at, "updatedAt" AS updated_at
            FROM notes
            ORDER BY "createdAt" DESC, id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await;
        timer.finish(result)
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<NoteEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_note_by_id");
        let result = sqlx::query_as::<_, NoteEntity>(
            r#"
            SELECT id, title, content, category, "userId" AS user_id,
                   "createdAt" AS created_at, "updatedAt" AS updated_at
            FROM notes
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.finish(result)
    }

    pub async fn create(&self, note: &NewNote) -> Result<NoteEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_note");
        let result = sqlx::query_as::<_, NoteEntity>(
            r#"
            INSERT INTO notes (title, content, category, "userId")
            VALUES ($1, $2, $3, $4)
            RETURNING id, title, content, category, "userId" AS user_id,
                      "createdAt" AS created_at, "updatedAt" AS updated_at
            "#,
        )
        .bind(&note.title)
        .bind(&note.content)
        .bind(&note.category)
        .bind(note.user_id)
        .fetch_one(&self.pool)
        .await;
        timer.finish(result)
    }

    /// Overwrites the supplied fields in one statement.
    /// Returns `None` if no note has this id.
    pub async fn update(
        &self,
        id: i32,
        changes: &NoteChanges,
    ) -> Result<Option<NoteEntity>, sqlx::Error> {
        let timer = QueryTimer::new("update_note");
        let result = sqlx::query_as::<_, NoteEntity>(
            r#"
            UPDATE notes SET
                title = COALESCE($2, title),
                content = COALESCE($3, content),
                category = COALESCE($4, category),
                "updatedAt" = NOW()
            WHERE id = $1
            RETURNING id, title, content, category, "userId" AS user_id,
                      "createdAt" AS created_at, "updatedAt" AS updated_at
            "#,
        )
        .bind(id)
        .bind(&changes.title)
        .bind(&changes.content)
        .bind(&changes.category)
        .fetch_optional(&self.pool)
        .await;
        timer.finish(result)
    }

    /// Returns true if a row was deleted.
    pub async fn delete(&self, id: i32) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("delete_note");
        let result = sqlx::query_scalar::<_, i32>(
            r#"
            DELETE FROM notes
            WHERE id = $1
            RETURNING id
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        Ok(timer.finish(result)?.is_some())
    }

    /// Case-sensitive substring search over title and content, newest first.
    pub async fn search(&self, query: &str) -> Result<Vec<NoteEntity>, sqlx::Error> {
        let timer = QueryTimer::new("search_notes");
        let pattern = format!("%{}%", escape_like(query));
        let result = sqlx::query_as::<_, NoteEntity>(
            r#"
            SELECT id, title, content, category, "userId" AS user_id,
                   "createdAt" AS created_at, "updatedAt" AS updated_at
            FROM notes
            WHERE title LIKE $1 ESCAPE '\' OR content LIKE $1 ESCAPE '\'
            ORDER BY "createdAt" DESC, id DESC
            "#,
        )
        .bind(pattern)
        .fetch_all(&self.pool)
        .await;
        timer.finish(result)
    }
}

#[async_trait::async_trait]
impl NoteStore for NoteRepository {
    async fn list(&self) -> Result<Vec<Note>, DomainError> {
        let rows = self.find_all().await.map_err(storage_error)?;
        Ok(rows.into_iter().map(Note::from).collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Note>, DomainError> {
        let row = NoteRepository::find_by_id(self, id)
            .await
            .map_err(storage_error)?;
        Ok(row.map(Note::from))
    }

    async fn insert(&self, note: NewNote) -> Result<Note, DomainError> {
        self.create(&note)
            .await
            .map(Note::from)
            .map_err(storage_error)
    }

    async fn update(&self, id: i32, changes: NoteChanges) -> Result<Option<Note>, DomainError> {
        let row = NoteRepository::update(self, id, &changes)
            .await
            .map_err(storage_error)?;
        Ok(row.map(Note::from))
    }

    async fn delete(&self, id: i32) -> Result<bool, DomainError> {
        NoteRepository::delete(self, id)
            .await
            .map_err(storage_error)
    }

    async fn search(&self, query: &str) -> Result<Vec<Note>, DomainError> {
        let rows = NoteRepository::search(self, query)
            .await
            .map_err(storage_error)?;
        Ok(rows.into_iter().map(Note::from).collect())
    }
}
