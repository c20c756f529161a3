//! Response DTOs for the dashboard API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;
use serde_json::Value;

use crate::cache::CacheStats;
use crate::storage::Quote;
use crate::visits::VisitStats;

/// Response body for GET /api/quotes and /api/quotes/search
#[derive(Debug, Clone, Serialize)]
pub struct QuotesResponse {
    pub quotes: Vec<Quote>,
}

/// Response body for GET /api/quotes/:id
#[derive(Debug, Clone, Serialize)]
pub struct QuoteResponse {
    pub quote: Quote,
}

/// Response body for the note endpoints
#[derive(Debug, Clone, Serialize)]
pub struct NotesResponse {
    pub notes: Vec<String>,
}

/// Response body for DELETE /api/notes/:id
#[derive(Debug, Clone, Serialize)]
pub struct NoteDeletedResponse {
    pub message: String,
    pub note: String,
}

impl NoteDeletedResponse {
    pub fn new(index: usize, note: String) -> Self {
        Self {
            message: format!("Note {} deleted successfully", index),
            note,
        }
    }
}

/// Response body for GET /api/visits
#[derive(Debug, Clone, Serialize)]
pub struct VisitsResponse {
    pub visits: VisitStats,
    pub status: &'static str,
}

impl VisitsResponse {
    pub fn new(visits: VisitStats) -> Self {
        Self {
            visits,
            status: "success",
        }
    }
}

/// Response body for GET /
#[derive(Debug, Clone, Serialize)]
pub struct DashboardResponse {
    /// The `current_weather` part of the weather payload
    pub weather: Value,
    pub cat: Value,
    pub quote: Option<Quote>,
    pub notes: Value,
    pub visits: VisitStats,
    pub version: String,
}

/// Response body for the stats endpoint (GET /api/cache/stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    pub hits: u64,
    pub misses: u64,
    pub expirations: u64,
    pub evictions: u64,
    pub invalidations: u64,
    pub total_entries: usize,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
}

impl From<CacheStats> for StatsResponse {
    fn from(stats: CacheStats) -> Self {
        Self {
            hit_rate: stats.hit_rate(),
            hits: stats.hits,
            misses: stats.misses,
            expirations: stats.expirations,
            evictions: stats.evictions,
            invalidations: stats.invalidations,
            total_entries: stats.total_entries,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_response_from_cache_stats() {
        let stats = CacheStats {
            hits: 80,
            misses: 20,
            expirations: 3,
            evictions: 1,
            invalidations: 2,
            total_entries: 4,
        };
        let resp = StatsResponse::from(stats);
        assert!((resp.hit_rate - 0.8).abs() < 0.001);
        assert_eq!(resp.expirations, 3);
        assert_eq!(resp.total_entries, 4);
    }

    #[test]
    fn test_stats_response_zero_requests() {
        let resp = StatsResponse::from(CacheStats::default());
        assert_eq!(resp.hit_rate, 0.0);
    }

    #[test]
    fn test_visits_response_serialize() {
        let resp = VisitsResponse::new(VisitStats {
            total: 100,
            last_24h: 25,
            unique: 15,
        });
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["visits"]["last_24h"], 25);
        assert_eq!(json["status"], "success");
    }

    #[test]
    fn test_quote_serializes_with_original_field_names() {
        let resp = QuoteResponse {
            quote: Quote {
                text: "Stay hungry.".to_string(),
                author: "Steve Jobs".to_string(),
            },
        };
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["quote"]["Quote"], "Stay hungry.");
        assert_eq!(json["quote"]["Author"], "Steve Jobs");
    }

    #[test]
    fn test_health_response_serialize() {
        let resp = HealthResponse::healthy();
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("healthy"));
        assert!(json.contains("timestamp"));
    }

    #[test]
    fn test_error_response_serialize() {
        let resp = ErrorResponse::new("Something went wrong");
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("Something went wrong"));
    }
}
