//! Application State
//!
//! Everything a handler needs, injected once at startup.

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;

use crate::cache::{CacheBackend, MemoryCache};
use crate::clock::{SharedClock, SystemClock};
use crate::config::{Config, ConfigError};
use crate::policy::FreshnessPolicy;
use crate::sources::{CatSource, Source, WeatherSource};
use crate::storage::{NoteStore, QuoteStore};
use crate::visits::VisitLog;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub cache: Arc<dyn CacheBackend>,
    pub policy: FreshnessPolicy,
    pub clock: SharedClock,
    pub weather: Arc<dyn Source>,
    pub cat: Arc<dyn Source>,
    pub quotes: Arc<QuoteStore>,
    pub notes: Arc<NoteStore>,
    pub visits: Arc<VisitLog>,
    /// Version label shown on the dashboard
    pub version: String,
}

impl AppState {
    /// Builds the production state: system clock and live upstream clients.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.fetch_timeout))
            .build()?;

        let weather = WeatherSource::new(
            client.clone(),
            &config.weather_api_url,
            config.latitude,
            config.longitude,
        )
        .with_utc_offset_hours(config.local_utc_offset_hours);
        let cat = CatSource::new(client, &config.cat_api_url);

        let state = Self::with_sources(config, Arc::new(SystemClock), Arc::new(weather), Arc::new(cat))?;
        Ok(state)
    }

    /// Builds state around the given clock and sources.
    pub fn with_sources(
        config: &Config,
        clock: SharedClock,
        weather: Arc<dyn Source>,
        cat: Arc<dyn Source>,
    ) -> Result<Self, ConfigError> {
        let policy = FreshnessPolicy::new(config.freshness()?);
        let cache = Arc::new(MemoryCache::new(config.max_entries, clock.clone()));

        Ok(Self {
            cache,
            policy,
            weather,
            cat,
            quotes: Arc::new(QuoteStore::new(&config.quotes_file)),
            notes: Arc::new(NoteStore::open(
                &config.notes_file,
                config.max_notes,
                config.max_note_length,
            )),
            visits: Arc::new(VisitLog::new(clock.clone())),
            version: config.version_label(),
            clock,
        })
    }
}
