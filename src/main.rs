mod db;
mod routes;
mod services;
mod state;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
    let port: u16 = std::env::var("PORT")
        .unwrap_or_else(|_| "3000".into())
        .parse()
        .expect("invalid PORT");

    let pool = db::init_pool(&database_url)
        .await
        .expect("database init failed");

    // OAuth is optional at boot: without it the API still serves, but login
    // endpoints answer 503.
    let google = services::auth::GoogleConfig::from_env();
    if google.is_none() {
        tracing::warn!("GOOGLE_* env vars not set — login disabled");
    }

    let state = state::AppState::new(pool, google);

    // Spawn background session sweeper.
    let _sweeper = services::maintenance::spawn_session_sweeper(state.clone());

    let app = routes::app(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .expect("failed to bind");

    tracing::info!(%port, "noteboard listening");
    axum::serve(listener, app).await.expect("server failed");
}
