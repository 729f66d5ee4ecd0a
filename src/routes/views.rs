//! Derived-view routes — dashboard, deadlines, calendar.
//!
//! DESIGN
//! ======
//! Each handler fetches the user's notes once and hands them to the pure
//! aggregation functions in `services::view`. The dashboard fetch runs
//! under a deadline so a slow database turns into a 504 instead of a
//! spinner that never resolves.

use std::time::Duration;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde::Deserialize;
use time::{Month, OffsetDateTime};

use crate::routes::auth::AuthUser;
use crate::routes::notes::note_error_to_status;
use crate::services::note;
use crate::services::view::{self, CalendarDay, DashboardSummary, DeadlineEntry};
use crate::state::AppState;

const DEFAULT_VIEW_FETCH_TIMEOUT_MS: u64 = 5_000;

fn view_fetch_timeout() -> Duration {
    let ms = std::env::var("VIEW_FETCH_TIMEOUT_MS")
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(DEFAULT_VIEW_FETCH_TIMEOUT_MS);
    Duration::from_millis(ms)
}

// =============================================================================
// HANDLERS
// =============================================================================

/// `GET /api/dashboard` — headline stats plus the most recent notes.
pub async fn dashboard(State(state): State<AppState>, auth: AuthUser) -> Result<Json<DashboardSummary>, StatusCode> {
    let fetch = note::list_notes(&state.pool, auth.user.id);
    let notes = match tokio::time::timeout(view_fetch_timeout(), fetch).await {
        Ok(result) => result.map_err(note_error_to_status)?,
        Err(_) => {
            tracing::warn!(user_id = %auth.user.id, "dashboard fetch timed out");
            return Err(StatusCode::GATEWAY_TIMEOUT);
        }
    };

    Ok(Json(view::dashboard_summary(&notes)))
}

/// `GET /api/deadlines` — dated notes, soonest first, with overdue flags.
pub async fn deadlines(State(state): State<AppState>, auth: AuthUser) -> Result<Json<Vec<DeadlineEntry>>, StatusCode> {
    let notes = note::list_notes(&state.pool, auth.user.id)
        .await
        .map_err(note_error_to_status)?;
    Ok(Json(view::upcoming_deadlines(&notes, OffsetDateTime::now_utc())))
}

#[derive(Default, Deserialize)]
pub struct CalendarQuery {
    pub year: Option<i32>,
    pub month: Option<u8>,
}

pub(crate) fn resolve_month(query: &CalendarQuery, now: OffsetDateTime) -> Result<(i32, Month), StatusCode> {
    let year = query.year.unwrap_or_else(|| now.year());
    let month = match query.month {
        Some(m) => Month::try_from(m).map_err(|_| StatusCode::BAD_REQUEST)?,
        None => now.month(),
    };
    Ok((year, month))
}

/// `GET /api/calendar?year=&month=` — the month's notes grouped by day.
/// Defaults to the current month.
pub async fn calendar(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<CalendarQuery>,
) -> Result<Json<Vec<CalendarDay>>, StatusCode> {
    let (year, month) = resolve_month(&query, OffsetDateTime::now_utc())?;

    let notes = note::list_notes(&state.pool, auth.user.id)
        .await
        .map_err(note_error_to_status)?;
    Ok(Json(view::calendar_days(&notes, year, month)))
}

#[cfg(test)]
#[path = "views_test.rs"]
mod tests;
