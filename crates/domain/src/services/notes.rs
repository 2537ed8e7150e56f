//! Note actions: list, get, create, update, remove and search.

use chrono::{DateTime, Duration, Utc};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{info, warn};
use validator::Validate;

use crate::errors::DomainError;
use crate::models::{
    CreateNoteRequest, DeleteNoteResponse, NewNote, Note, NoteChanges, UpdateNoteRequest,
};

/// Storage seam for notes.
///
/// Listing and searching return notes newest first.
#[async_trait::async_trait]
pub trait NoteStore: Send + Sync {
    async fn list(&self) -> Result<Vec<Note>, DomainError>;

    async fn find_by_id(&self, id: i32) -> Result<Option<Note>, DomainError>;

    async fn insert(&self, note: NewNote) -> Result<Note, DomainError>;

    /// Overwrites the supplied fields and refreshes `updated_at`.
    /// Returns `None` when no note has this id.
    async fn update(&self, id: i32, changes: NoteChanges) -> Result<Option<Note>, DomainError>;

    /// Hard-deletes the note. Returns `false` when no note has this id.
    async fn delete(&self, id: i32) -> Result<bool, DomainError>;

    /// Case-sensitive substring match on title or content.
    async fn search(&self, query: &str) -> Result<Vec<Note>, DomainError>;
}

fn note_not_found() -> DomainError {
    DomainError::NotFound("Note not found".to_string())
}

/// Note action handlers.
#[derive(Clone)]
pub struct NoteService {
    store: Arc<dyn NoteStore>,
    sample_fallback: bool,
}

impl NoteService {
    pub fn new(store: Arc<dyn NoteStore>) -> Self {
        Self {
            store,
            sample_fallback: false,
        }
    }

    /// Serve [`sample_notes`] from `list` when storage is unavailable.
    pub fn with_sample_fallback(mut self, enabled: bool) -> Self {
        self.sample_fallback = enabled;
        self
    }

    /// All notes, newest first.
    pub async fn list(&self) -> Result<Vec<Note>, DomainError> {
        match self.store.list().await {
            Ok(notes) => Ok(notes),
            Err(DomainError::Storage(reason)) if self.sample_fallback => {
                warn!(%reason, "Note storage unavailable, serving sample notes");
                Ok(sample_notes())
            }
            Err(e) => Err(e),
        }
    }

    pub async fn get(&self, id: i32) -> Result<Note, DomainError> {
        self.store.find_by_id(id).await?.ok_or_else(note_not_found)
    }

    /// Creates a note, owned by `owner` when the caller is authenticated.
    pub async fn create(
        &self,
        request: CreateNoteRequest,
        owner: Option<i32>,
    ) -> Result<Note, DomainError> {
        request.validate()?;

        let note = self
            .store
            .insert(NewNote::from_request(request, owner))
            .await?;

        info!(note_id = note.id, user_id = ?note.user_id, "Note created");
        Ok(note)
    }

    /// Applies only the fields present in `request`.
    pub async fn update(&self, id: i32, request: UpdateNoteRequest) -> Result<Note, DomainError> {
        request.validate()?;

        let note = self
            .store
            .update(id, request.into())
            .await?
            .ok_or_else(note_not_found)?;

        info!(note_id = note.id, "Note updated");
        Ok(note)
    }

    pub async fn remove(&self, id: i32) -> Result<DeleteNoteResponse, DomainError> {
        if !self.store.delete(id).await? {
            return Err(note_not_found());
        }

        info!(note_id = id, "Note deleted");
        Ok(DeleteNoteResponse::deleted())
    }

    pub async fn search(&self, query: &str) -> Result<Vec<Note>, DomainError> {
        self.store.search(query).await
    }
}

/// Notes served by `list` in degraded mode; the same rows are seeded by the
/// initial migration.
pub fn sample_notes() -> Vec<Note> {
    let now = Utc::now();
    let note = |id: i32, title: &str, content: &str, category: &str| Note {
        id,
        title: title.to_string(),
        content: content.to_string(),
        category: Some(category.to_string()),
        user_id: None,
        created_at: now,
        updated_at: now,
    };

    vec![
        note(
            1,
            "Welcome to Notes Service",
            "This is your first note! You can edit or delete it.",
            "General",
        ),
        note(
            2,
            "Getting Started",
            "Here are some tips for using the notes service:\n\n\
             1. Create new notes using the + button\n\
             2. Click on any note to view or edit it\n\
             3. Use categories to organize your notes\n\
             4. Search through your notes using the search bar",
            "Tips",
        ),
        note(
            3,
            "Sample Note",
            "This is a sample note with some content. You can modify this text or delete this note entirely.",
            "Sample",
        ),
    ]
}

#[derive(Debug, Default)]
struct MockNotes {
    rows: Vec<Note>,
    last_id: i32,
    last_timestamp: Option<DateTime<Utc>>,
}

impl MockNotes {
    /// Wall clock, bumped so consecutive calls are strictly increasing.
    fn tick(&mut self) -> DateTime<Utc> {
        let now = Utc::now();
        let next = match self.last_timestamp {
            Some(last) if now <= last => last + Duration::microseconds(1),
            _ => now,
        };
        self.last_timestamp = Some(next);
        next
    }

    fn newest_first(mut notes: Vec<Note>) -> Vec<Note> {
        notes.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        notes
    }
}

/// In-memory note store for development and testing.
#[derive(Debug, Default)]
pub struct MockNoteStore {
    inner: Mutex<MockNotes>,
    unavailable: bool,
}

impl MockNoteStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose every call fails with [`DomainError::Storage`].
    pub fn unavailable() -> Self {
        Self {
            inner: Mutex::default(),
            unavailable: true,
        }
    }

    fn check_available(&self) -> Result<(), DomainError> {
        if self.unavailable {
            Err(DomainError::Storage("connection refused".to_string()))
        } else {
            Ok(())
        }
    }
}

#[async_trait::async_trait]
impl NoteStore for MockNoteStore {
    async fn list(&self) -> Result<Vec<Note>, DomainError> {
        self.check_available()?;
        let inner = self.inner.lock().await;
        Ok(MockNotes::newest_first(inner.rows.clone()))
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Note>, DomainError> {
        self.check_available()?;
        let inner = self.inner.lock().await;
        Ok(inner.rows.iter().find(|n| n.id == id).cloned())
    }

    async fn insert(&self, note: NewNote) -> Result<Note, DomainError> {
        self.check_available()?;
        let mut inner = self.inner.lock().await;
        inner.last_id += 1;
        let now = inner.tick();
        let note = Note {
            id: inner.last_id,
            title: note.title,
            content: note.content,
            category: note.category,
            user_id: note.user_id,
            created_at: now,
            updated_at: now,
        };
        inner.rows.push(note.clone());
        Ok(note)
    }

    async fn update(&self, id: i32, changes: NoteChanges) -> Result<Option<Note>, DomainError> {
        self.check_available()?;
        let mut inner = self.inner.lock().await;
        let now = inner.tick();
        let Some(note) = inner.rows.iter_mut().find(|n| n.id == id) else {
            return Ok(None);
        };
        changes.apply_to(note);
        note.updated_at = now;
        Ok(Some(note.clone()))
    }

    async fn delete(&self, id: i32) -> Result<bool, DomainError> {
        self.check_available()?;
        let mut inner = self.inner.lock().await;
        let before = inner.rows.len();
        inner.rows.retain(|n| n.id != id);
        Ok(inner.rows.len() < before)
    }

    async fn search(&self, query: &str) -> Result<Vec<Note>, DomainError> {
        self.check_available()?;
        let inner = self.inner.lock().await;
        let matches = inner
            .rows
            .iter()
            .filter(|n| n.title.contains(query) || n.content.contains(query))
            .cloned()
            .collect();
        Ok(MockNotes::newest_first(matches))
    }
}
