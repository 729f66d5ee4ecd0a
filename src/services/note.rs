//! Note service — per-user CRUD over Postgres.
//!
//! DESIGN
//! ======
//! Every query is scoped by `user_id`, so a note owned by someone else is
//! indistinguishable from a missing one. Partial updates load the current
//! row, apply the requested fields, and write the whole row back; the
//! final `WHERE id AND user_id` guard turns a concurrent delete into
//! `NotFound` rather than a resurrected row.

use serde::Serialize;
use sqlx::PgPool;
use time::OffsetDateTime;
use uuid::Uuid;

// =============================================================================
// TYPES
// =============================================================================

/// Note priority. Stored and serialized as the lowercase string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    #[must_use]
    pub fn from_str(raw: &str) -> Option<Self> {
        match raw {
            "low" => Some(Self::Low),
            "medium" => Some(Self::Medium),
            "high" => Some(Self::High),
            _ => None,
        }
    }
}

impl Default for Priority {
    fn default() -> Self {
        Self::Medium
    }
}

/// A user's note. Mirrors the `notes` table.
#[derive(Debug, Clone, Serialize)]
pub struct Note {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub content: String,
    pub priority: Priority,
    pub completed: bool,
    #[serde(with = "time::serde::rfc3339::option")]
    pub due_date: Option<OffsetDateTime>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

/// Fields accepted when creating a note.
#[derive(Debug, Clone, Default)]
pub struct NewNote {
    pub title: String,
    pub content: String,
    pub priority: Priority,
    pub completed: bool,
    pub due_date: Option<OffsetDateTime>,
}

/// Partial update. `None` leaves a field unchanged; `due_date` uses a
/// double `Option` so `Some(None)` clears the stored date.
#[derive(Debug, Clone, Default)]
pub struct NoteUpdate {
    pub title: Option<String>,
    pub content: Option<String>,
    pub priority: Option<Priority>,
    pub completed: Option<bool>,
    pub due_date: Option<Option<OffsetDateTime>>,
}

#[derive(Debug, thiserror::Error)]
pub enum NoteError {
    #[error("note not found: {0}")]
    NotFound(Uuid),
    #[error("note title must not be empty")]
    EmptyTitle,
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Row tuple shared by every query that returns full notes.
type NoteTuple = (
    Uuid,
    Uuid,
    String,
    String,
    String,
    bool,
    Option<OffsetDateTime>,
    OffsetDateTime,
    OffsetDateTime,
);

fn note_from_tuple(row: NoteTuple) -> Note {
    let (id, user_id, title, content, priority, completed, due_date, created_at, updated_at) = row;
    Note {
        id,
        user_id,
        title,
        content,
        // Unknown stored priority strings decode as the default.
        priority: Priority::from_str(&priority).unwrap_or_default(),
        completed,
        due_date,
        created_at,
        updated_at,
    }
}

// =============================================================================
// CRUD
// =============================================================================

/// Create a note for the given user.
///
/// # Errors
///
/// Returns `EmptyTitle` if the trimmed title is empty, or a database
/// error if the insert fails.
pub async fn create_note(pool: &PgPool, user_id: Uuid, new: NewNote) -> Result<Note, NoteError> {
    let title = new.title.trim();
    if title.is_empty() {
        return Err(NoteError::EmptyTitle);
    }

    let id = Uuid::new_v4();
    let row = sqlx::query_as::<_, NoteTuple>(
        "INSERT INTO notes (id, user_id, title, content, priority, completed, due_date)
         VALUES ($1, $2, $3, $4, $5, $6, $7)
         RETURNING id, user_id, title, content, priority, completed, due_date, created_at, updated_at",
    )
    .bind(id)
    .bind(user_id)
    .bind(title)
    .bind(new.content.trim())
    .bind(new.priority.as_str())
    .bind(new.completed)
    .bind(new.due_date)
    .fetch_one(pool)
    .await?;

    tracing::info!(note_id = %id, %user_id, "note created");
    Ok(note_from_tuple(row))
}

/// List all of a user's notes, newest first.
///
/// # Errors
///
/// Returns a database error if the query fails.
pub async fn list_notes(pool: &PgPool, user_id: Uuid) -> Result<Vec<Note>, NoteError> {
    let rows = sqlx::query_as::<_, NoteTuple>(
        "SELECT id, user_id, title, content, priority, completed, due_date, created_at, updated_at
         FROM notes WHERE user_id = $1 ORDER BY created_at DESC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(note_from_tuple).collect())
}

/// Fetch a single note by id, scoped to the owner.
///
/// # Errors
///
/// Returns `NotFound` if no matching note exists for this user.
pub async fn get_note(pool: &PgPool, note_id: Uuid, user_id: Uuid) -> Result<Note, NoteError> {
    let row = sqlx::query_as::<_, NoteTuple>(
        "SELECT id, user_id, title, content, priority, completed, due_date, created_at, updated_at
         FROM notes WHERE id = $1 AND user_id = $2",
    )
    .bind(note_id)
    .bind(user_id)
    .fetch_optional(pool)
    .await?
    .ok_or(NoteError::NotFound(note_id))?;

    Ok(note_from_tuple(row))
}

/// Apply a partial update to a note, returning the updated row.
///
/// # Errors
///
/// Returns `NotFound` if the note does not exist for this user (including
/// when it was deleted between load and write), `EmptyTitle` for a blank
/// title, or a database error.
pub async fn update_note(pool: &PgPool, note_id: Uuid, user_id: Uuid, update: NoteUpdate) -> Result<Note, NoteError> {
    let mut note = get_note(pool, note_id, user_id).await?;

    if let Some(title) = update.title {
        let title = title.trim().to_owned();
        if title.is_empty() {
            return Err(NoteError::EmptyTitle);
        }
        note.title = title;
    }
    if let Some(content) = update.content {
        note.content = content.trim().to_owned();
    }
    if let Some(priority) = update.priority {
        note.priority = priority;
    }
    if let Some(completed) = update.completed {
        note.completed = completed;
    }
    if let Some(due_date) = update.due_date {
        note.due_date = due_date;
    }

    let row = sqlx::query_as::<_, NoteTuple>(
        "UPDATE notes
         SET title = $3, content = $4, priority = $5, completed = $6, due_date = $7, updated_at = now()
         WHERE id = $1 AND user_id = $2
         RETURNING id, user_id, title, content, priority, completed, due_date, created_at, updated_at",
    )
    .bind(note_id)
    .bind(user_id)
    .bind(&note.title)
    .bind(&note.content)
    .bind(note.priority.as_str())
    .bind(note.completed)
    .bind(note.due_date)
    .fetch_optional(pool)
    .await?
    .ok_or(NoteError::NotFound(note_id))?;

    Ok(note_from_tuple(row))
}

/// Delete a note by id, scoped to the owner.
///
/// # Errors
///
/// Returns `NotFound` if nothing matched, or a database error.
pub async fn delete_note(pool: &PgPool, note_id: Uuid, user_id: Uuid) -> Result<(), NoteError> {
    let result = sqlx::query("DELETE FROM notes WHERE id = $1 AND user_id = $2")
        .bind(note_id)
        .bind(user_id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(NoteError::NotFound(note_id));
    }

    tracing::info!(%note_id, %user_id, "note deleted");
    Ok(())
}

#[cfg(test)]
#[path = "note_test.rs"]
mod tests;
