//! API Routes
//!
//! Configures the Axum router with all dashboard endpoints.

use axum::{
    middleware,
    routing::{delete, get},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    add_note_handler, cache_stats_handler, cat_handler, dashboard_handler, delete_note_handler,
    health_handler, notes_handler, quote_by_id_handler, quotes_handler, random_quote_handler,
    search_quotes_handler, visits_handler, weather_handler,
};
use super::middleware::log_requests;
use super::state::AppState;

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /` - Aggregated dashboard payload (records a visit)
/// - `GET /health` - Health check endpoint
/// - `GET /api/weather`, `GET /api/cat` - Cached upstream data (`?nocache=true` skips the cache)
/// - `GET /api/quotes`, `/api/quotes/random`, `/api/quotes/search?author=`, `/api/quotes/:id`
/// - `GET|POST /api/notes`, `DELETE /api/notes/:id`
/// - `GET /api/visits` - Visit counters
/// - `GET /api/cache/stats` - Cache statistics
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(dashboard_handler))
        .route("/health", get(health_handler))
        .route("/api/weather", get(weather_handler))
        .route("/api/cat", get(cat_handler))
        .route("/api/quotes", get(quotes_handler))
        .route("/api/quotes/random", get(random_quote_handler))
        .route("/api/quotes/search", get(search_quotes_handler))
        .route("/api/quotes/:id", get(quote_by_id_handler))
        .route("/api/notes", get(notes_handler).post(add_note_handler))
        .route("/api/notes/:id", delete(delete_note_handler))
        .route("/api/visits", get(visits_handler))
        .route("/api/cache/stats", get(cache_stats_handler))
        .layer(middleware::from_fn(log_requests))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
