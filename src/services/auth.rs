//! Google OAuth service — code exchange, userinfo fetch, user upsert.

use sqlx::{PgPool, Row};
use uuid::Uuid;

const GOOGLE_AUTH_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";
const GOOGLE_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
const GOOGLE_USERINFO_URL: &str = "https://openidconnect.googleapis.com/v1/userinfo";

/// Google OAuth configuration loaded from environment.
#[derive(Debug, Clone)]
pub struct GoogleConfig {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
}

impl GoogleConfig {
    /// Load from `GOOGLE_CLIENT_ID`, `GOOGLE_CLIENT_SECRET`, `GOOGLE_REDIRECT_URI`.
    /// Returns `None` if any are missing (auth will be disabled).
    #[must_use]
    pub fn from_env() -> Option<Self> {
        let client_id = std::env::var("GOOGLE_CLIENT_ID").ok()?;
        let client_secret = std::env::var("GOOGLE_CLIENT_SECRET").ok()?;
        let redirect_uri = std::env::var("GOOGLE_REDIRECT_URI").ok()?;
        Some(Self { client_id, client_secret, redirect_uri })
    }

    /// Build the Google authorization URL carrying the CSRF state.
    #[must_use]
    pub fn authorize_url(&self, state: &str) -> String {
        format!(
            "{GOOGLE_AUTH_URL}?client_id={}&redirect_uri={}&response_type=code&scope=openid%20email%20profile&state={state}",
            self.client_id, self.redirect_uri
        )
    }
}

#[derive(Debug, serde::Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// OpenID Connect userinfo payload. `sub` is the stable provider subject
/// every user row is keyed on.
#[derive(Debug, serde::Deserialize)]
pub struct GoogleUser {
    pub sub: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub picture: Option<String>,
}

impl GoogleUser {
    /// Display name: profile name, falling back to email, then a placeholder.
    #[must_use]
    pub fn display_name(&self) -> String {
        self.name
            .clone()
            .or_else(|| self.email.clone())
            .unwrap_or_else(|| "Unnamed".to_owned())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("google token exchange failed: {0}")]
    TokenExchange(String),
    #[error("google userinfo error: {0}")]
    UserInfo(String),
    #[error("database error: {0}")]
    Db(#[from] sqlx::Error),
}

/// Exchange an OAuth authorization code for an access token.
///
/// # Errors
///
/// Returns an error if the provider is unreachable or answers with
/// anything other than a token payload.
pub async fn exchange_code(config: &GoogleConfig, code: &str) -> Result<String, AuthError> {
    let client = reqwest::Client::new();
    let resp = client
        .post(GOOGLE_TOKEN_URL)
        .form(&[
            ("client_id", config.client_id.as_str()),
            ("client_secret", config.client_secret.as_str()),
            ("code", code),
            ("redirect_uri", config.redirect_uri.as_str()),
            ("grant_type", "authorization_code"),
        ])
        .send()
        .await
        .map_err(|e| AuthError::TokenExchange(e.to_string()))?;

    let body = resp
        .text()
        .await
        .map_err(|e| AuthError::TokenExchange(e.to_string()))?;
    let token_resp: TokenResponse =
        serde_json::from_str(&body).map_err(|_| AuthError::TokenExchange(format!("unexpected response: {body}")))?;
    Ok(token_resp.access_token)
}

/// Fetch the authenticated user's OpenID profile.
///
/// # Errors
///
/// Returns an error if the userinfo endpoint fails or the payload does
/// not parse.
pub async fn fetch_google_user(access_token: &str) -> Result<GoogleUser, AuthError> {
    let client = reqwest::Client::new();
    let resp = client
        .get(GOOGLE_USERINFO_URL)
        .header("Authorization", format!("Bearer {access_token}"))
        .send()
        .await
        .map_err(|e| AuthError::UserInfo(e.to_string()))?;

    if !resp.status().is_success() {
        let status = resp.status();
        let body = resp.text().await.unwrap_or_default();
        return Err(AuthError::UserInfo(format!("{status}: {body}")));
    }

    resp.json::<GoogleUser>()
        .await
        .map_err(|e| AuthError::UserInfo(e.to_string()))
}

/// Upsert a user from their Google profile. Returns the user's UUID.
///
/// # Errors
///
/// Returns a database error if the upsert fails.
pub async fn upsert_user(pool: &PgPool, profile: &GoogleUser) -> Result<Uuid, AuthError> {
    let row = sqlx::query(
        r"INSERT INTO users (google_sub, name, email, avatar_url)
          VALUES ($1, $2, $3, $4)
          ON CONFLICT (google_sub) DO UPDATE
              SET name = EXCLUDED.name, email = EXCLUDED.email, avatar_url = EXCLUDED.avatar_url
          RETURNING id",
    )
    .bind(&profile.sub)
    .bind(profile.display_name())
    .bind(&profile.email)
    .bind(&profile.picture)
    .fetch_one(pool)
    .await?;
    Ok(row.get("id"))
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;
