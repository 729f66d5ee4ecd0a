//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! Binds the OAuth flow, note CRUD, and derived-view endpoints into a
//! single Axum router. The SPA is served from its own origin, so the API
//! runs with permissive CORS and a liveness probe for the deployment.

pub mod auth;
pub mod notes;
pub mod views;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};

use crate::state::AppState;

/// Build the application router.
#[must_use]
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/auth/google", get(auth::google_redirect))
        .route("/auth/google/callback", get(auth::google_callback))
        .route("/api/auth/me", get(auth::me))
        .route("/api/auth/logout", post(auth::logout))
        .route("/api/notes", get(notes::list_notes).post(notes::create_note))
        .route(
            "/api/notes/{id}",
            get(notes::get_note)
                .patch(notes::update_note)
                .delete(notes::delete_note),
        )
        .route("/api/dashboard", get(views::dashboard))
        .route("/api/deadlines", get(views::deadlines))
        .route("/api/calendar", get(views::calendar))
        .route("/healthz", get(healthz))
        .layer(cors)
        .with_state(state)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}
