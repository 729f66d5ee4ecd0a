//! Maintenance service — background sweep of expired sessions.
//!
//! DESIGN
//! ======
//! Session validation already ignores expired rows, so the sweeper only
//! reclaims storage. It runs on a coarse interval and a failed sweep is
//! logged and retried on the next tick; nothing downstream depends on it.

use std::time::Duration;

use sqlx::PgPool;
use tokio::task::JoinHandle;
use tracing::{error, info};

use crate::state::AppState;

const DEFAULT_SESSION_SWEEP_INTERVAL_SECS: u64 = 3600;

pub(crate) fn env_parse<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr + Copy,
{
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}

/// Delete expired session rows, returning how many were removed.
///
/// # Errors
///
/// Returns a database error if the delete fails.
pub async fn sweep_expired_sessions(pool: &PgPool) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM sessions WHERE expires_at <= now()")
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}

/// Spawn the background session sweeper. Returns a handle for shutdown.
pub fn spawn_session_sweeper(state: AppState) -> JoinHandle<()> {
    let interval_secs = env_parse("SESSION_SWEEP_INTERVAL_SECS", DEFAULT_SESSION_SWEEP_INTERVAL_SECS);
    info!(interval_secs, "session sweeper configured");
    tokio::spawn(async move {
        loop {
            match sweep_expired_sessions(&state.pool).await {
                Ok(0) => {}
                Ok(removed) => info!(removed, "swept expired sessions"),
                Err(e) => error!(error = %e, "session sweep failed"),
            }
            tokio::time::sleep(Duration::from_secs(interval_secs)).await;
        }
    })
}
