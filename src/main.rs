//! Atelier - Application Entry Point
//!
//! This is the main entry point for the Atelier server.

use std::net::SocketAddr;

use axum::{extract::DefaultBodyLimit, Router};
use tokio::net::TcpListener;
use tower_http::{compression::CompressionLayer, services::ServeDir, trace::TraceLayer};
use tower_sessions::{cookie::time::Duration, Expiry, ExpiredDeletion, SessionManagerLayer};
use tower_sessions_sqlx_store::SqliteStore;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use atelier::{
    config::CONFIG,
    constants::{MAX_REQUEST_BODY_BYTES, SESSION_COOKIE_NAME},
    db,
    handlers,
    render,
    state::AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| CONFIG.server.rust_log.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Atelier server...");

    // Initialize database connection pool
    tracing::info!("Connecting to database...");
    let db_pool = db::create_pool(&CONFIG.database).await?;

    // Run database migrations
    tracing::info!("Running database migrations...");
    db::run_migrations(&db_pool).await?;

    // Ensure the admin account and sample content before accepting traffic
    tracing::info!("Seeding database...");
    db::seed::ensure_seed_data(&db_pool, &CONFIG.seed).await?;

    // Persisted server-side session store next to the application data
    let session_store = SqliteStore::new(db_pool.clone());
    session_store.migrate().await?;
    tokio::task::spawn(
        session_store
            .clone()
            .continuously_delete_expired(tokio::time::Duration::from_secs(600)),
    );
    let session_layer = SessionManagerLayer::new(session_store)
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(Duration::hours(
            CONFIG.sessions.expiry_hours,
        )));

    // Load the template environment
    let templates = render::build_templates(&CONFIG.storage.templates_glob)?;

    // Create application state
    let state = AppState::new(db_pool, templates, CONFIG.clone());

    // Build the router; static assets are served from the public root
    let public = CONFIG.storage.public_root.clone();
    let app = Router::new()
        .merge(handlers::routes())
        .nest_service("/css", ServeDir::new(public.join("css")))
        .nest_service("/js", ServeDir::new(public.join("js")))
        .nest_service("/uploads", ServeDir::new(public.join("uploads")))
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(session_layer)
        .layer(DefaultBodyLimit::max(MAX_REQUEST_BODY_BYTES))
        .with_state(state);

    // Start the server
    let addr = SocketAddr::new(CONFIG.server.host.parse()?, CONFIG.server.port);
    let listener = TcpListener::bind(addr).await?;

    tracing::info!("Server listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
