use time::macros::datetime;

use super::*;

// =============================================================================
// note_error_to_status
// =============================================================================

#[test]
fn not_found_maps_to_404() {
    assert_eq!(note_error_to_status(note::NoteError::NotFound(Uuid::nil())), StatusCode::NOT_FOUND);
}

#[test]
fn empty_title_maps_to_400() {
    assert_eq!(note_error_to_status(note::NoteError::EmptyTitle), StatusCode::BAD_REQUEST);
}

#[test]
fn database_error_maps_to_500() {
    let err = note::NoteError::Database(sqlx::Error::PoolClosed);
    assert_eq!(note_error_to_status(err), StatusCode::INTERNAL_SERVER_ERROR);
}

// =============================================================================
// CreateNoteBody
// =============================================================================

#[test]
fn create_body_title_only() {
    let body: CreateNoteBody = serde_json::from_str(r#"{"title": "Buy milk"}"#).unwrap();
    assert_eq!(body.title, "Buy milk");
    assert!(body.content.is_none());
    assert!(body.priority.is_none());
    assert!(body.completed.is_none());
    assert!(body.due_date.is_none());
}

#[test]
fn create_body_full() {
    let body: CreateNoteBody = serde_json::from_str(
        r#"{
            "title": "Ship release",
            "content": "tag and push",
            "priority": "high",
            "completed": false,
            "due_date": "2026-03-01T12:00:00Z"
        }"#,
    )
    .unwrap();
    assert_eq!(body.priority, Some(Priority::High));
    assert_eq!(body.due_date, Some(datetime!(2026-03-01 12:00 UTC)));
}

#[test]
fn create_body_missing_title_is_rejected() {
    assert!(serde_json::from_str::<CreateNoteBody>(r#"{"content": "orphan"}"#).is_err());
}

#[test]
fn create_body_invalid_priority_is_rejected() {
    assert!(serde_json::from_str::<CreateNoteBody>(r#"{"title": "x", "priority": "urgent"}"#).is_err());
}

#[test]
fn create_body_invalid_due_date_is_rejected() {
    assert!(serde_json::from_str::<CreateNoteBody>(r#"{"title": "x", "due_date": "tomorrow"}"#).is_err());
}

// =============================================================================
// UpdateNoteBody — the absent / null / value triad for due_date.
// =============================================================================

#[test]
fn update_body_empty_object_changes_nothing() {
    let body: UpdateNoteBody = serde_json::from_str("{}").unwrap();
    assert!(body.title.is_none());
    assert!(body.due_date.is_none());
}

#[test]
fn update_body_absent_due_date_leaves_unchanged() {
    let body: UpdateNoteBody = serde_json::from_str(r#"{"completed": true}"#).unwrap();
    assert_eq!(body.completed, Some(true));
    assert!(body.due_date.is_none());
}

#[test]
fn update_body_null_due_date_clears() {
    let body: UpdateNoteBody = serde_json::from_str(r#"{"due_date": null}"#).unwrap();
    assert_eq!(body.due_date, Some(None));
}

#[test]
fn update_body_value_due_date_sets() {
    let body: UpdateNoteBody = serde_json::from_str(r#"{"due_date": "2026-03-01T12:00:00Z"}"#).unwrap();
    assert_eq!(body.due_date, Some(Some(datetime!(2026-03-01 12:00 UTC))));
}

#[test]
fn update_body_garbage_due_date_is_rejected() {
    assert!(serde_json::from_str::<UpdateNoteBody>(r#"{"due_date": "next tuesday"}"#).is_err());
}

#[test]
fn update_body_partial_fields_parse() {
    let body: UpdateNoteBody = serde_json::from_str(r#"{"title": "renamed", "priority": "low"}"#).unwrap();
    assert_eq!(body.title.as_deref(), Some("renamed"));
    assert_eq!(body.priority, Some(Priority::Low));
    assert!(body.content.is_none());
}
