use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use amu::{abuse, api, auth, broadcast, state::AppState, ws};

#[tokio::main]
async fn main() {
    // Load .env file if present (before any env var reads)
    if let Err(e) = dotenvy::dotenv() {
        // Not an error if .env doesn't exist, only log if it's a different issue
        if !matches!(e, dotenvy::Error::Io(_)) {
            eprintln!("Warning: Failed to load .env file: {}", e);
        }
    }

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "amu=debug,tower_http=debug,axum=trace".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting AMU...");

    // Initialize admin authentication config
    let admin_config = Arc::new(auth::AdminConfig::from_env());

    // Initialize anti-abuse config
    let abuse_config = Arc::new(abuse::AbuseConfig::from_env());

    let state = Arc::new(AppState::new());

    // Spawn background task for expiring anonymous statuses
    broadcast::spawn_status_sweeper(state.clone());

    // Protected admin routes (with HTTP Basic Auth)
    let admin_routes = Router::new()
        .route("/admin/reset", post(api::admin_reset))
        .layer(middleware::from_fn_with_state(
            admin_config.clone(),
            auth::admin_auth_middleware,
        ));

    // WebSocket route with anti-abuse protection
    let ws_routes = Router::new()
        .route("/ws", get(ws::ws_handler))
        .layer(middleware::from_fn_with_state(
            abuse_config.clone(),
            abuse::ws_abuse_middleware,
        ));

    let api_routes = Router::new()
        .route("/api/session", post(api::create_session))
        .route("/api/session/register", post(api::register_session))
        .route("/api/foods", get(api::list_foods).post(api::create_food))
        .route(
            "/api/foods/{id}",
            get(api::get_food)
                .patch(api::update_food)
                .delete(api::delete_food),
        )
        .route("/api/foods/{id}/favorite", post(api::toggle_favorite))
        .route("/api/history", get(api::get_history).post(api::post_history))
        .route("/api/stats", get(api::get_stats))
        .route("/api/statuses", get(api::get_statuses));

    let app = Router::new()
        .merge(ws_routes)
        .merge(admin_routes)
        .merge(api_routes)
        .fallback_service(ServeDir::new("static"))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // 2682 is "AMU" on a phone keypad
    let addr = SocketAddr::from(([0, 0, 0, 0], 2682));
    tracing::info!("Listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
