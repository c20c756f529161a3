//! Request DTOs for the dashboard API
//!
//! Defines the structure of incoming query strings and request bodies.

use serde::Deserialize;

/// Query parameters accepted by cached endpoints (`?nocache=true`).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CacheParams {
    #[serde(default)]
    pub nocache: Option<String>,
}

impl CacheParams {
    /// True when the caller asked to skip the cache.
    pub fn bypass(&self) -> bool {
        self.nocache
            .as_deref()
            .is_some_and(|v| v.eq_ignore_ascii_case("true") || v == "1")
    }
}

/// Query parameters for GET /api/quotes/search
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub author: String,
}

/// Request body for POST /api/notes
#[derive(Debug, Clone, Deserialize)]
pub struct AddNoteRequest {
    pub note: String,
}
