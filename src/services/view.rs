//! Derived view state — dashboard stats, recent notes, calendar groupings.
//!
//! DESIGN
//! ======
//! Every function here is a pure aggregation over an already-fetched note
//! list. Routes fetch once via `note::list_notes` (newest first) and derive
//! the per-view shape in memory, so the views always agree with each other
//! within a single request.

use std::collections::BTreeMap;

use serde::Serialize;
use time::{Date, Month, OffsetDateTime};

use crate::services::note::{Note, Priority};

/// How many notes the dashboard shows under "Recent Notes".
pub const RECENT_NOTES_LIMIT: usize = 3;

// =============================================================================
// DASHBOARD
// =============================================================================

/// Headline counts for the dashboard tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NoteStats {
    pub total: usize,
    pub high_priority: usize,
    pub completed: usize,
}

#[derive(Debug, Serialize)]
pub struct DashboardSummary {
    pub stats: NoteStats,
    pub recent: Vec<Note>,
}

#[must_use]
pub fn compute_stats(notes: &[Note]) -> NoteStats {
    NoteStats {
        total: notes.len(),
        high_priority: notes.iter().filter(|n| n.priority == Priority::High).count(),
        completed: notes.iter().filter(|n| n.completed).count(),
    }
}

/// The first `limit` notes. Callers pass the `created_at`-descending list
/// from `list_notes`, so this is "most recently created".
#[must_use]
pub fn recent_notes(notes: &[Note], limit: usize) -> Vec<Note> {
    notes.iter().take(limit).cloned().collect()
}

#[must_use]
pub fn dashboard_summary(notes: &[Note]) -> DashboardSummary {
    DashboardSummary { stats: compute_stats(notes), recent: recent_notes(notes, RECENT_NOTES_LIMIT) }
}

// =============================================================================
// DEADLINES
// =============================================================================

/// A dated note in the upcoming-deadlines list.
#[derive(Debug, Serialize)]
pub struct DeadlineEntry {
    pub note: Note,
    /// True when the due date is strictly in the past. Completed notes keep
    /// their flag; the list renders them either way.
    pub overdue: bool,
}

/// Notes with a due date, soonest first, each tagged overdue or not.
#[must_use]
pub fn upcoming_deadlines(notes: &[Note], now: OffsetDateTime) -> Vec<DeadlineEntry> {
    let mut dated: Vec<&Note> = notes.iter().filter(|n| n.due_date.is_some()).collect();
    dated.sort_by_key(|n| n.due_date);

    dated
        .into_iter()
        .map(|n| DeadlineEntry { note: n.clone(), overdue: n.due_date.is_some_and(|due| due < now) })
        .collect()
}

// =============================================================================
// CALENDAR
// =============================================================================

/// Per-day priority counts, used for the grid badges.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PriorityTally {
    pub low: usize,
    pub medium: usize,
    pub high: usize,
}

impl PriorityTally {
    fn bump(&mut self, priority: Priority) {
        match priority {
            Priority::Low => self.low += 1,
            Priority::Medium => self.medium += 1,
            Priority::High => self.high += 1,
        }
    }
}

/// One calendar day that has at least one dated note.
#[derive(Debug, Serialize)]
pub struct CalendarDay {
    pub date: Date,
    pub notes: Vec<Note>,
    pub tally: PriorityTally,
}

/// Group a month's dated notes by calendar day (UTC), days ascending.
/// Days without notes are omitted; within a day notes are due-time
/// ascending.
#[must_use]
pub fn calendar_days(notes: &[Note], year: i32, month: Month) -> Vec<CalendarDay> {
    let mut by_day: BTreeMap<Date, Vec<Note>> = BTreeMap::new();
    for note in notes {
        let Some(due) = note.due_date else { continue };
        let day = due.date();
        if day.year() == year && day.month() == month {
            by_day.entry(day).or_default().push(note.clone());
        }
    }

    by_day
        .into_iter()
        .map(|(date, mut notes)| {
            notes.sort_by_key(|n| n.due_date);
            let mut tally = PriorityTally::default();
            for note in &notes {
                tally.bump(note.priority);
            }
            CalendarDay { date, notes, tally }
        })
        .collect()
}

#[cfg(test)]
#[path = "view_test.rs"]
mod tests;
