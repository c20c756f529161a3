//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use thiserror::Error;
use tracing::warn;

use crate::policy::FreshnessConfig;
use crate::sources::{CAT_API_URL, OPEN_METEO_URL};

/// Configuration values that parse but cannot be used.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{name} interval must be at least one second, got {value}")]
    InvalidInterval { name: &'static str, value: u64 },
}

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// Maximum number of entries the cache can hold
    pub max_entries: usize,
    /// Background cleanup task interval in seconds
    pub cleanup_interval: u64,
    /// Weather refresh interval in seconds, aligned to UTC wall-clock boundaries
    pub weather_ttl: u64,
    /// Cat image reuse interval in seconds
    pub cat_ttl: u64,
    /// Interval for everything else, and the fallback TTL
    pub default_ttl: u64,
    /// Upstream request timeout in seconds
    pub fetch_timeout: u64,
    pub latitude: f64,
    pub longitude: f64,
    /// Offset applied to observation times for the local-time label
    pub local_utc_offset_hours: i64,
    pub weather_api_url: String,
    pub cat_api_url: String,
    pub quotes_file: PathBuf,
    pub notes_file: PathBuf,
    pub max_notes: usize,
    pub max_note_length: usize,
    pub app_version: String,
    pub app_env: String,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `MAX_ENTRIES` - Maximum cache entries (default: 1000)
    /// - `CLEANUP_INTERVAL` - Cleanup frequency in seconds (default: 1)
    /// - `WEATHER_TTL` / `CAT_TTL` / `DEFAULT_TTL` - Intervals (default: 900 / 300 / 60)
    /// - `FETCH_TIMEOUT` - Upstream timeout in seconds (default: 3)
    /// - `LATITUDE` / `LONGITUDE` - Weather location (default: Moscow)
    /// - `LOCAL_UTC_OFFSET_HOURS` - Display offset (default: 3)
    /// - `WEATHER_API_URL` / `CAT_API_URL` - Upstream endpoints
    /// - `QUOTES_FILE` / `NOTES_FILE` - JSON stores (default: `data/*.json`)
    /// - `MAX_NOTES` / `MAX_NOTE_LENGTH` - Note limits (default: 10 / 250)
    /// - `APP_VERSION` / `APP_ENV` - Version label (default: `0.0.0` / `prod`)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            server_port: env_or("SERVER_PORT", defaults.server_port),
            max_entries: env_or("MAX_ENTRIES", defaults.max_entries),
            cleanup_interval: env_or("CLEANUP_INTERVAL", defaults.cleanup_interval),
            weather_ttl: env_or("WEATHER_TTL", defaults.weather_ttl),
            cat_ttl: env_or("CAT_TTL", defaults.cat_ttl),
            default_ttl: env_or("DEFAULT_TTL", defaults.default_ttl),
            fetch_timeout: env_or("FETCH_TIMEOUT", defaults.fetch_timeout),
            latitude: env_or("LATITUDE", defaults.latitude),
            longitude: env_or("LONGITUDE", defaults.longitude),
            local_utc_offset_hours: env_or(
                "LOCAL_UTC_OFFSET_HOURS",
                defaults.local_utc_offset_hours,
            ),
            weather_api_url: env::var("WEATHER_API_URL").unwrap_or(defaults.weather_api_url),
            cat_api_url: env::var("CAT_API_URL").unwrap_or(defaults.cat_api_url),
            quotes_file: env::var("QUOTES_FILE")
                .map(PathBuf::from)
                .unwrap_or(defaults.quotes_file),
            notes_file: env::var("NOTES_FILE")
                .map(PathBuf::from)
                .unwrap_or(defaults.notes_file),
            max_notes: env_or("MAX_NOTES", defaults.max_notes),
            max_note_length: env_or("MAX_NOTE_LENGTH", defaults.max_note_length),
            app_version: env::var("APP_VERSION").unwrap_or(defaults.app_version),
            app_env: env::var("APP_ENV").unwrap_or(defaults.app_env),
        }
    }

    /// Validated freshness intervals.
    pub fn freshness(&self) -> Result<FreshnessConfig, ConfigError> {
        FreshnessConfig::new(self.weather_ttl, self.cat_ttl, self.default_ttl)
    }

    /// Version string shown on the dashboard.
    ///
    /// Production shows the bare version; other environments are labelled.
    pub fn version_label(&self) -> String {
        if self.app_env == "prod" {
            format!("v{}", self.app_version)
        } else {
            format!("v{} ({})", self.app_version, self.app_env)
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 3000,
            max_entries: 1000,
            cleanup_interval: 1,
            weather_ttl: 900,
            cat_ttl: 300,
            default_ttl: 60,
            fetch_timeout: 3,
            latitude: 55.75,
            longitude: 37.62,
            local_utc_offset_hours: 3,
            weather_api_url: OPEN_METEO_URL.to_string(),
            cat_api_url: CAT_API_URL.to_string(),
            quotes_file: PathBuf::from("data/quotes.json"),
            notes_file: PathBuf::from("data/notes.json"),
            max_notes: 10,
            max_note_length: 250,
            app_version: "0.0.0".to_string(),
            app_env: "prod".to_string(),
        }
    }
}

/// Reads and parses an environment variable, keeping the default when it is
/// unset or unparsable.
fn env_or<T: FromStr>(name: &str, default: T) -> T {
    match env::var(name) {
        Ok(raw) => raw.parse().unwrap_or_else(|_| {
            warn!("Ignoring unparsable {}={:?}", name, raw);
            default
        }),
        Err(_) => default,
    }
}
