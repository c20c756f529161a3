//! Upstream Sources
//!
//! Fetchers for the remote APIs behind the dashboard. Each source names its
//! cache key, its freshness kind and the value to show when it is down.

mod cat;
mod weather;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

pub use cat::{CatImage, CatSource, CAT_API_URL};
pub use weather::{
    weather_code_to_text, wind_direction_to_text, CurrentWeather, WeatherReport, WeatherSource,
    OPEN_METEO_URL,
};

use crate::policy::SourceKind;

/// Errors that can occur while fetching from an upstream API.
#[derive(Debug, Error)]
pub enum FetchError {
    /// HTTP request failed (connection, timeout, body read)
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Upstream answered with a non-success status
    #[error("Upstream returned status {0}")]
    Status(reqwest::StatusCode),

    /// Failed to parse JSON response
    #[error("Failed to parse JSON response: {0}")]
    Decode(#[from] serde_json::Error),

    /// Response parsed but does not carry what we need
    #[error("Unexpected response: {0}")]
    Unexpected(String),
}

/// A remote data source served through the cache.
#[async_trait]
pub trait Source: Send + Sync {
    /// Cache key the source's payload lives under.
    fn key(&self) -> &str;

    /// Freshness rule for the payload.
    fn kind(&self) -> SourceKind;

    /// Payload served when a fetch fails.
    fn fallback(&self) -> Value;

    /// Retrieves a fresh payload.
    async fn fetch(&self) -> Result<Value, FetchError>;
}
