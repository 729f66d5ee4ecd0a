use time::macros::datetime;

use super::*;

// =============================================================================
// Priority
// =============================================================================

#[test]
fn priority_as_str_round_trips() {
    for p in [Priority::Low, Priority::Medium, Priority::High] {
        assert_eq!(Priority::from_str(p.as_str()), Some(p));
    }
}

#[test]
fn priority_from_str_rejects_unknown() {
    assert_eq!(Priority::from_str("urgent"), None);
    assert_eq!(Priority::from_str(""), None);
    assert_eq!(Priority::from_str("HIGH"), None);
}

#[test]
fn priority_default_is_medium() {
    assert_eq!(Priority::default(), Priority::Medium);
}

#[test]
fn priority_serializes_lowercase() {
    assert_eq!(serde_json::to_string(&Priority::High).unwrap(), "\"high\"");
    assert_eq!(serde_json::to_string(&Priority::Low).unwrap(), "\"low\"");
}

#[test]
fn priority_deserializes_lowercase_only() {
    let p: Priority = serde_json::from_str("\"medium\"").unwrap();
    assert_eq!(p, Priority::Medium);
    assert!(serde_json::from_str::<Priority>("\"Medium\"").is_err());
}

// =============================================================================
// note_from_tuple
// =============================================================================

fn sample_tuple(priority: &str) -> NoteTuple {
    (
        Uuid::new_v4(),
        Uuid::new_v4(),
        "Buy milk".to_owned(),
        "2% this time".to_owned(),
        priority.to_owned(),
        false,
        Some(datetime!(2026-03-01 12:00 UTC)),
        datetime!(2026-02-01 08:30 UTC),
        datetime!(2026-02-01 08:30 UTC),
    )
}

#[test]
fn note_from_tuple_maps_all_fields() {
    let tuple = sample_tuple("high");
    let id = tuple.0;
    let note = note_from_tuple(tuple);
    assert_eq!(note.id, id);
    assert_eq!(note.title, "Buy milk");
    assert_eq!(note.content, "2% this time");
    assert_eq!(note.priority, Priority::High);
    assert!(!note.completed);
    assert_eq!(note.due_date, Some(datetime!(2026-03-01 12:00 UTC)));
}

#[test]
fn note_from_tuple_unknown_priority_falls_back_to_medium() {
    let note = note_from_tuple(sample_tuple("critical"));
    assert_eq!(note.priority, Priority::Medium);
}

// =============================================================================
// Note serialization
// =============================================================================

#[test]
fn note_serializes_timestamps_as_rfc3339() {
    let note = note_from_tuple(sample_tuple("low"));
    let json = serde_json::to_value(&note).unwrap();
    assert_eq!(json["created_at"], "2026-02-01T08:30:00Z");
    assert_eq!(json["due_date"], "2026-03-01T12:00:00Z");
    assert_eq!(json["priority"], "low");
}

#[test]
fn note_serializes_missing_due_date_as_null() {
    let mut note = note_from_tuple(sample_tuple("low"));
    note.due_date = None;
    let json = serde_json::to_value(&note).unwrap();
    assert!(json["due_date"].is_null());
}

// =============================================================================
// NewNote / NoteUpdate defaults
// =============================================================================

#[test]
fn new_note_default_is_empty_medium_incomplete() {
    let new = NewNote::default();
    assert!(new.title.is_empty());
    assert!(new.content.is_empty());
    assert_eq!(new.priority, Priority::Medium);
    assert!(!new.completed);
    assert!(new.due_date.is_none());
}

#[test]
fn note_update_default_changes_nothing() {
    let update = NoteUpdate::default();
    assert!(update.title.is_none());
    assert!(update.content.is_none());
    assert!(update.priority.is_none());
    assert!(update.completed.is_none());
    assert!(update.due_date.is_none());
}

// =============================================================================
// NoteError
// =============================================================================

#[test]
fn note_error_not_found_names_the_id() {
    let id = Uuid::nil();
    let err = NoteError::NotFound(id);
    assert!(err.to_string().contains("00000000-0000-0000-0000-000000000000"));
}

#[test]
fn note_error_empty_title_message() {
    assert_eq!(NoteError::EmptyTitle.to_string(), "note title must not be empty");
}
