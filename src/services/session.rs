//! Session management.
//!
//! ARCHITECTURE
//! ============
//! Sessions are opaque random tokens stored server-side with an expiry.
//! The browser holds the token in an `HttpOnly` cookie; validation joins
//! `sessions` to `users` so handlers get the full user row in one query.
//!
//! TRADE-OFFS
//! ==========
//! Tokens are stored in the clear. Revocation is a plain row delete and
//! expiry is enforced in SQL (`expires_at > now()`), so no clock skew
//! between app and database can extend a session.

use std::fmt::Write;

use rand::Rng;
use sqlx::{PgPool, Row};
use uuid::Uuid;

const DEFAULT_SESSION_TTL_DAYS: i32 = 30;

pub(crate) fn bytes_to_hex(bytes: &[u8]) -> String {
    let mut s = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        let _ = write!(s, "{b:02x}");
    }
    s
}

/// Generate a cryptographically random 32-byte hex token.
#[must_use]
pub fn generate_token() -> String {
    let bytes: [u8; 32] = rand::rng().random();
    bytes_to_hex(&bytes)
}

pub(crate) fn session_ttl_days() -> i32 {
    std::env::var("SESSION_TTL_DAYS")
        .ok()
        .and_then(|v| v.parse::<i32>().ok())
        .filter(|days| *days > 0)
        .unwrap_or(DEFAULT_SESSION_TTL_DAYS)
}

/// User row returned from session validation.
#[derive(Debug, Clone, serde::Serialize)]
pub struct SessionUser {
    /// Unique user identifier.
    pub id: Uuid,
    /// Display name from the identity provider.
    pub name: String,
    /// Email address, if the provider shared one.
    pub email: Option<String>,
    /// Avatar image URL, if available.
    pub avatar_url: Option<String>,
}

/// Create a session for the given user, returning the token.
///
/// # Errors
///
/// Returns a database error if the insert fails.
pub async fn create_session(pool: &PgPool, user_id: Uuid) -> Result<String, sqlx::Error> {
    let token = generate_token();
    sqlx::query(
        "INSERT INTO sessions (token, user_id, expires_at)
         VALUES ($1, $2, now() + make_interval(days => $3))",
    )
    .bind(&token)
    .bind(user_id)
    .bind(session_ttl_days())
    .execute(pool)
    .await?;
    Ok(token)
}

/// Validate a session token and return the associated user.
///
/// # Errors
///
/// Returns a database error if the lookup fails.
pub async fn validate_session(pool: &PgPool, token: &str) -> Result<Option<SessionUser>, sqlx::Error> {
    let row = sqlx::query(
        r"SELECT u.id, u.name, u.email, u.avatar_url
          FROM sessions s
          JOIN users u ON u.id = s.user_id
          WHERE s.token = $1 AND s.expires_at > now()",
    )
    .bind(token)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(|r| SessionUser {
        id: r.get("id"),
        name: r.get("name"),
        email: r.get("email"),
        avatar_url: r.get("avatar_url"),
    }))
}

/// Delete a session by token.
///
/// # Errors
///
/// Returns a database error if the delete fails.
pub async fn delete_session(pool: &PgPool, token: &str) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM sessions WHERE token = $1")
        .bind(token)
        .execute(pool)
        .await?;
    Ok(())
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
