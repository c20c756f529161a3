//! API Handlers
//!
//! HTTP request handlers for each dashboard endpoint. Upstream payloads and
//! the list endpoints go through [`cached_fetch`]; writes invalidate the
//! entries they affect.

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    Json,
};
use serde_json::{json, Value};
use tracing::{debug, info, warn};

use super::middleware::client_ip;
use super::state::AppState;
use crate::cache::{
    cached_fetch, CacheBackend, CacheRequest, Origin, Served, NOTES_KEY, QUOTES_KEY,
};
use crate::error::{DashboardError, Result};
use crate::models::{
    AddNoteRequest, CacheParams, DashboardResponse, HealthResponse, NoteDeletedResponse,
    NotesResponse, QuoteResponse, QuotesResponse, SearchParams, StatsResponse, VisitsResponse,
};
use crate::policy::SourceKind;
use crate::sources::Source;

/// Response header telling the client where a cached payload came from.
pub const CACHE_ORIGIN_HEADER: &str = "x-cache-origin";

type CachedJson = ([(&'static str, &'static str); 1], Json<Value>);

fn origin_label(origin: &Origin) -> &'static str {
    match origin {
        Origin::Cache => "cache",
        Origin::Fetched { .. } => "fetched",
        Origin::Fallback => "fallback",
    }
}

fn cached_json(served: Served) -> CachedJson {
    (
        [(CACHE_ORIGIN_HEADER, origin_label(&served.origin))],
        Json(served.value),
    )
}

async fn serve_source(state: &AppState, source: &dyn Source, bypass: bool) -> Served {
    let request = CacheRequest::new(source.key(), source.kind(), source.fallback()).bypass(bypass);

    cached_fetch(
        state.cache.as_ref(),
        &state.policy,
        state.clock.as_ref(),
        request,
        || source.fetch(),
    )
    .await
}

async fn serve_quotes(state: &AppState, bypass: bool) -> Served {
    let request =
        CacheRequest::new(QUOTES_KEY, SourceKind::Generic, json!({ "quotes": [] })).bypass(bypass);

    cached_fetch(
        state.cache.as_ref(),
        &state.policy,
        state.clock.as_ref(),
        request,
        || async {
            let quotes = state.quotes.all().await?;
            Ok::<_, DashboardError>(json!(QuotesResponse { quotes }))
        },
    )
    .await
}

async fn serve_notes(state: &AppState, bypass: bool) -> Served {
    let request =
        CacheRequest::new(NOTES_KEY, SourceKind::Generic, json!({ "notes": [] })).bypass(bypass);

    cached_fetch(
        state.cache.as_ref(),
        &state.policy,
        state.clock.as_ref(),
        request,
        || async {
            let notes = state.notes.list().await;
            Ok::<_, DashboardError>(json!(NotesResponse { notes }))
        },
    )
    .await
}

async fn invalidate(state: &AppState, key: &str) {
    match state.cache.delete(key).await {
        Ok(removed) => debug!("Cache [{}] invalidated (present: {})", key, removed),
        Err(err) => warn!("Cache [{}] invalidation failed: {}", key, err),
    }
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

/// Handler for GET /api/weather
///
/// Current weather, cached under the weather freshness rule.
pub async fn weather_handler(
    State(state): State<AppState>,
    Query(params): Query<CacheParams>,
) -> CachedJson {
    cached_json(serve_source(&state, state.weather.as_ref(), params.bypass()).await)
}

/// Handler for GET /api/cat
pub async fn cat_handler(
    State(state): State<AppState>,
    Query(params): Query<CacheParams>,
) -> CachedJson {
    cached_json(serve_source(&state, state.cat.as_ref(), params.bypass()).await)
}

/// Handler for GET /api/quotes
pub async fn quotes_handler(
    State(state): State<AppState>,
    Query(params): Query<CacheParams>,
) -> CachedJson {
    cached_json(serve_quotes(&state, params.bypass()).await)
}

/// Handler for GET /api/quotes/random
pub async fn random_quote_handler(State(state): State<AppState>) -> Result<Json<QuoteResponse>> {
    let quote = state.quotes.random().await?;
    Ok(Json(QuoteResponse { quote }))
}

/// Handler for GET /api/quotes/search?author=
pub async fn search_quotes_handler(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<QuotesResponse>> {
    let author = params.author.trim();
    if author.is_empty() {
        return Err(DashboardError::InvalidRequest(
            "Author parameter is required".to_string(),
        ));
    }

    let quotes = state.quotes.search(author).await?;
    Ok(Json(QuotesResponse { quotes }))
}

/// Handler for GET /api/quotes/:id
pub async fn quote_by_id_handler(
    State(state): State<AppState>,
    Path(id): Path<usize>,
) -> Result<Json<QuoteResponse>> {
    let quote = state.quotes.get(id).await?;
    Ok(Json(QuoteResponse { quote }))
}

/// Handler for GET /api/notes
pub async fn notes_handler(
    State(state): State<AppState>,
    Query(params): Query<CacheParams>,
) -> CachedJson {
    cached_json(serve_notes(&state, params.bypass()).await)
}

/// Handler for POST /api/notes
pub async fn add_note_handler(
    State(state): State<AppState>,
    Json(req): Json<AddNoteRequest>,
) -> Result<(StatusCode, Json<NotesResponse>)> {
    let notes = state.notes.add(&req.note).await?;
    invalidate(&state, NOTES_KEY).await;

    info!("Note added ({} stored)", notes.len());
    Ok((StatusCode::CREATED, Json(NotesResponse { notes })))
}

/// Handler for DELETE /api/notes/:id
pub async fn delete_note_handler(
    State(state): State<AppState>,
    Path(id): Path<usize>,
) -> Result<Json<NoteDeletedResponse>> {
    let note = state.notes.delete(id).await?;
    invalidate(&state, NOTES_KEY).await;

    info!("Note {} deleted", id);
    Ok(Json(NoteDeletedResponse::new(id, note)))
}

/// Handler for GET /api/visits
pub async fn visits_handler(State(state): State<AppState>) -> Json<VisitsResponse> {
    Json(VisitsResponse::new(state.visits.stats().await))
}

/// Handler for GET /api/cache/stats
pub async fn cache_stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(StatsResponse::from(state.cache.stats().await))
}

/// Handler for GET /
///
/// Records the visit, then assembles every widget into one payload. Widgets
/// whose upstream is down carry their fallback value.
pub async fn dashboard_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Json<DashboardResponse> {
    let ip = client_ip(&headers);
    let total = state.visits.record("/", "GET", &ip).await;
    debug!("Dashboard visit #{} from {}", total, ip);

    let (weather, cat, notes) = tokio::join!(
        serve_source(&state, state.weather.as_ref(), false),
        serve_source(&state, state.cat.as_ref(), false),
        serve_notes(&state, false),
    );

    let quote = match state.quotes.random().await {
        Ok(quote) => Some(quote),
        Err(err) => {
            warn!("No quote for dashboard: {}", err);
            None
        }
    };

    Json(DashboardResponse {
        weather: weather
            .value
            .get("current_weather")
            .cloned()
            .unwrap_or(Value::Null),
        cat: cat.value,
        quote,
        notes: notes
            .value
            .get("notes")
            .cloned()
            .unwrap_or_else(|| json!([])),
        visits: state.visits.stats().await,
        version: state.version.clone(),
    })
}
