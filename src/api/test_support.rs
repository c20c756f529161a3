//! Fixtures shared by the handler and router tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use serde_json::{json, Value};
use tempfile::TempDir;

use super::state::AppState;
use crate::cache::{CAT_KEY, WEATHER_KEY};
use crate::clock::ManualClock;
use crate::config::Config;
use crate::policy::SourceKind;
use crate::sources::{FetchError, Source};

/// A source that answers with a fixed payload, or always fails.
#[derive(Debug)]
pub struct StubSource {
    key: &'static str,
    kind: SourceKind,
    payload: Option<Value>,
    calls: AtomicUsize,
}

impl StubSource {
    pub fn weather() -> Self {
        Self::answering(
            WEATHER_KEY,
            SourceKind::Weather,
            json!({
                "latitude": 55.75,
                "longitude": 37.62,
                "current_weather": {
                    "temperature": 12.5,
                    "windspeed": 3.0,
                    "wind_direction": "N",
                    "weather_text": "Clear sky",
                    "is_day": 1,
                    "local_time": "13:07"
                }
            }),
        )
    }

    pub fn cat() -> Self {
        Self::answering(
            CAT_KEY,
            SourceKind::Cat,
            json!({ "id": "abc", "url": "https://cdn.example/abc.jpg", "width": 640, "height": 480 }),
        )
    }

    pub fn answering(key: &'static str, kind: SourceKind, payload: Value) -> Self {
        Self {
            key,
            kind,
            payload: Some(payload),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing(key: &'static str, kind: SourceKind) -> Self {
        Self {
            key,
            kind,
            payload: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Source for StubSource {
    fn key(&self) -> &str {
        self.key
    }

    fn kind(&self) -> SourceKind {
        self.kind
    }

    fn fallback(&self) -> Value {
        json!({ "unavailable": self.key })
    }

    async fn fetch(&self) -> Result<Value, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.payload
            .clone()
            .ok_or_else(|| FetchError::Unexpected("stub is down".to_string()))
    }
}

pub struct TestContext {
    pub state: AppState,
    pub weather: Arc<StubSource>,
    pub clock: Arc<ManualClock>,
    _dir: TempDir,
}

/// State backed by temp-dir stores and a clock frozen at 10:07 UTC.
///
/// The quotes file is only written when `quotes` is non-empty.
pub fn test_state(quotes: &[(&str, &str)]) -> TestContext {
    let dir = TempDir::new().unwrap();
    let quotes_file = dir.path().join("quotes.json");
    if !quotes.is_empty() {
        let body: Vec<Value> = quotes
            .iter()
            .map(|(text, author)| json!({ "Quote": text, "Author": author }))
            .collect();
        std::fs::write(&quotes_file, Value::Array(body).to_string()).unwrap();
    }

    let config = Config {
        quotes_file,
        notes_file: dir.path().join("notes.json"),
        max_notes: 3,
        max_note_length: 20,
        app_version: "1.2.3".to_string(),
        app_env: "test".to_string(),
        ..Config::default()
    };

    let clock = Arc::new(ManualClock::new(
        Utc.with_ymd_and_hms(2024, 1, 1, 10, 7, 0).unwrap(),
    ));
    let weather = Arc::new(StubSource::weather());
    let cat = Arc::new(StubSource::cat());

    let state = AppState::with_sources(&config, clock.clone(), weather.clone(), cat).unwrap();

    TestContext {
        state,
        weather,
        clock,
        _dir: dir,
    }
}
