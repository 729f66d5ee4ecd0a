//! Note CRUD routes.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde::{Deserialize, Deserializer};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use uuid::Uuid;

use crate::routes::auth::AuthUser;
use crate::services::note::{self, NewNote, Note, NoteUpdate, Priority};
use crate::state::AppState;

pub(crate) fn note_error_to_status(err: note::NoteError) -> StatusCode {
    match err {
        note::NoteError::NotFound(_) => StatusCode::NOT_FOUND,
        note::NoteError::EmptyTitle => StatusCode::BAD_REQUEST,
        note::NoteError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

// =============================================================================
// REQUEST BODIES
// =============================================================================

#[derive(Deserialize)]
pub struct CreateNoteBody {
    pub title: String,
    pub content: Option<String>,
    pub priority: Option<Priority>,
    pub completed: Option<bool>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub due_date: Option<OffsetDateTime>,
}

/// Distinguishes an absent `due_date` field (leave unchanged) from an
/// explicit `null` (clear the date). Serde only calls this when the field
/// is present, so absence stays `None` via `#[serde(default)]`.
fn deserialize_clearable_date<'de, D>(deserializer: D) -> Result<Option<Option<OffsetDateTime>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw {
        None => Ok(Some(None)),
        Some(s) => OffsetDateTime::parse(&s, &Rfc3339)
            .map(|dt| Some(Some(dt)))
            .map_err(serde::de::Error::custom),
    }
}

#[derive(Default, Deserialize)]
pub struct UpdateNoteBody {
    pub title: Option<String>,
    pub content: Option<String>,
    pub priority: Option<Priority>,
    pub completed: Option<bool>,
    #[serde(default, deserialize_with = "deserialize_clearable_date")]
    pub due_date: Option<Option<OffsetDateTime>>,
}

// =============================================================================
// HANDLERS
// =============================================================================

/// `GET /api/notes` — list the user's notes, newest first.
pub async fn list_notes(State(state): State<AppState>, auth: AuthUser) -> Result<Json<Vec<Note>>, StatusCode> {
    let notes = note::list_notes(&state.pool, auth.user.id)
        .await
        .map_err(note_error_to_status)?;
    Ok(Json(notes))
}

/// `POST /api/notes` — create a note.
pub async fn create_note(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(body): Json<CreateNoteBody>,
) -> Result<(StatusCode, Json<Note>), StatusCode> {
    let new = NewNote {
        title: body.title,
        content: body.content.unwrap_or_default(),
        priority: body.priority.unwrap_or_default(),
        completed: body.completed.unwrap_or(false),
        due_date: body.due_date,
    };

    let created = note::create_note(&state.pool, auth.user.id, new)
        .await
        .map_err(note_error_to_status)?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// `GET /api/notes/:id` — fetch one note.
pub async fn get_note(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(note_id): Path<Uuid>,
) -> Result<Json<Note>, StatusCode> {
    let found = note::get_note(&state.pool, note_id, auth.user.id)
        .await
        .map_err(note_error_to_status)?;
    Ok(Json(found))
}

/// `PATCH /api/notes/:id` — partial update.
pub async fn update_note(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(note_id): Path<Uuid>,
    Json(body): Json<UpdateNoteBody>,
) -> Result<Json<Note>, StatusCode> {
    let update = NoteUpdate {
        title: body.title,
        content: body.content,
        priority: body.priority,
        completed: body.completed,
        due_date: body.due_date,
    };

    let updated = note::update_note(&state.pool, note_id, auth.user.id, update)
        .await
        .map_err(note_error_to_status)?;
    Ok(Json(updated))
}

/// `DELETE /api/notes/:id` — delete a note.
pub async fn delete_note(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(note_id): Path<Uuid>,
) -> Result<StatusCode, StatusCode> {
    note::delete_note(&state.pool, note_id, auth.user.id)
        .await
        .map_err(note_error_to_status)?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
#[path = "notes_test.rs"]
mod tests;
