//! Open-Meteo weather source
//!
//! Fetches current conditions and reshapes them for display: compass labels
//! instead of degrees, text instead of WMO codes, and a local `HH:MM` label.

use async_trait::async_trait;
use chrono::{DateTime, Duration, NaiveDateTime};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{FetchError, Source};
use crate::cache::WEATHER_KEY;
use crate::policy::SourceKind;

/// Base URL for the Open-Meteo forecast API
pub const OPEN_METEO_URL: &str = "https://api.open-meteo.com/v1/forecast";

const COMPASS_POINTS: [&str; 16] = [
    "North",
    "North-northeast",
    "Northeast",
    "East-northeast",
    "East",
    "East-southeast",
    "Southeast",
    "South-southeast",
    "South",
    "South-southwest",
    "Southwest",
    "West-southwest",
    "West",
    "West-northwest",
    "Northwest",
    "North-northwest",
];

// == Payload ==
/// Weather payload as cached and served.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReport {
    pub latitude: f64,
    pub longitude: f64,
    pub generationtime_ms: f64,
    pub utc_offset_seconds: i32,
    pub timezone: String,
    pub timezone_abbreviation: String,
    pub elevation: f64,
    pub current_weather: CurrentWeather,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentWeather {
    /// Celsius
    pub temperature: f64,
    /// km/h
    pub windspeed: f64,
    pub wind_direction: String,
    pub weather_text: String,
    pub is_day: u8,
    /// Observation time shifted to the display offset, `HH:MM`
    pub local_time: String,
}

impl WeatherReport {
    /// Placeholder shown while the API is unreachable.
    pub fn unavailable(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            generationtime_ms: 0.0,
            utc_offset_seconds: 0,
            timezone: "GMT".to_string(),
            timezone_abbreviation: "GMT".to_string(),
            elevation: 0.0,
            current_weather: CurrentWeather {
                temperature: 0.0,
                windspeed: 0.0,
                wind_direction: COMPASS_POINTS[0].to_string(),
                weather_text: "Data unavailable".to_string(),
                is_day: 1,
                local_time: "--:--".to_string(),
            },
        }
    }
}

// == Upstream Response ==
#[derive(Debug, Deserialize)]
struct OpenMeteoResponse {
    latitude: f64,
    longitude: f64,
    generationtime_ms: f64,
    utc_offset_seconds: i32,
    timezone: String,
    timezone_abbreviation: String,
    elevation: f64,
    current_weather: Option<RawCurrentWeather>,
}

#[derive(Debug, Deserialize)]
struct RawCurrentWeather {
    time: String,
    temperature: f64,
    windspeed: f64,
    winddirection: f64,
    weathercode: u16,
    is_day: u8,
}

// == Conversions ==
/// Maps a bearing in degrees to one of 16 compass point names.
pub fn wind_direction_to_text(degrees: f64) -> &'static str {
    let idx = ((degrees + 11.25).rem_euclid(360.0) / 22.5) as usize;
    COMPASS_POINTS[idx % COMPASS_POINTS.len()]
}

/// Describes a WMO weather interpretation code.
pub fn weather_code_to_text(code: u16) -> String {
    let text = match code {
        0 => "Clear sky",
        1 => "Mainly clear",
        2 => "Partly cloudy",
        3 => "Overcast",
        45 => "Fog",
        48 => "Depositing rime fog",
        51 => "Light drizzle",
        53 => "Moderate drizzle",
        55 => "Dense drizzle",
        56 => "Light freezing drizzle",
        57 => "Dense freezing drizzle",
        61 => "Slight rain",
        63 => "Moderate rain",
        65 => "Heavy rain",
        66 => "Light freezing rain",
        67 => "Heavy freezing rain",
        71 => "Slight snowfall",
        73 => "Moderate snowfall",
        75 => "Heavy snowfall",
        77 => "Snow grains",
        80 => "Slight rain showers",
        81 => "Moderate rain showers",
        82 => "Violent rain showers",
        85 => "Slight snow showers",
        86 => "Heavy snow showers",
        95 => "Thunderstorm",
        96 => "Thunderstorm with slight hail",
        99 => "Thunderstorm with heavy hail",
        other => return format!("Unknown code ({})", other),
    };
    text.to_string()
}

/// Formats an observation timestamp as `HH:MM` at `offset_hours` from UTC.
///
/// Accepts Open-Meteo's offset-less `YYYY-MM-DDTHH:MM` (taken as UTC) as
/// well as timestamps carrying their own offset.
fn local_time_label(observed: &str, offset_hours: i64) -> Result<String, FetchError> {
    let utc = NaiveDateTime::parse_from_str(observed, "%Y-%m-%dT%H:%M")
        .or_else(|_| NaiveDateTime::parse_from_str(observed, "%Y-%m-%dT%H:%M:%S"))
        .or_else(|_| DateTime::parse_from_rfc3339(observed).map(|dt| dt.naive_utc()))
        .or_else(|_| DateTime::parse_from_str(observed, "%Y-%m-%dT%H:%M%:z").map(|dt| dt.naive_utc()))
        .map_err(|_| FetchError::Unexpected(format!("invalid observation time {:?}", observed)))?;

    let shift = Duration::try_hours(offset_hours)
        .ok_or_else(|| FetchError::Unexpected(format!("invalid offset {}h", offset_hours)))?;
    let local = utc
        .checked_add_signed(shift)
        .ok_or_else(|| FetchError::Unexpected(format!("observation time {:?} out of range", observed)))?;

    Ok(local.format("%H:%M").to_string())
}

/// Parses an Open-Meteo body into a [`WeatherReport`].
pub(crate) fn parse_open_meteo(body: &str, offset_hours: i64) -> Result<WeatherReport, FetchError> {
    let raw: OpenMeteoResponse = serde_json::from_str(body)?;
    let current = raw
        .current_weather
        .ok_or_else(|| FetchError::Unexpected("missing current_weather".to_string()))?;

    Ok(WeatherReport {
        latitude: raw.latitude,
        longitude: raw.longitude,
        generationtime_ms: raw.generationtime_ms,
        utc_offset_seconds: raw.utc_offset_seconds,
        timezone: raw.timezone,
        timezone_abbreviation: raw.timezone_abbreviation,
        elevation: raw.elevation,
        current_weather: CurrentWeather {
            temperature: current.temperature,
            windspeed: current.windspeed,
            wind_direction: wind_direction_to_text(current.winddirection).to_string(),
            weather_text: weather_code_to_text(current.weathercode),
            is_day: current.is_day,
            local_time: local_time_label(&current.time, offset_hours)?,
        },
    })
}

// == Weather Source ==
/// Client for the Open-Meteo current-weather endpoint.
#[derive(Debug, Clone)]
pub struct WeatherSource {
    client: Client,
    base_url: String,
    latitude: f64,
    longitude: f64,
    utc_offset_hours: i64,
}

impl WeatherSource {
    pub fn new(client: Client, base_url: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            latitude,
            longitude,
            utc_offset_hours: 0,
        }
    }

    /// Sets the offset used for the local-time label.
    pub fn with_utc_offset_hours(mut self, hours: i64) -> Self {
        self.utc_offset_hours = hours;
        self
    }
}

#[async_trait]
impl Source for WeatherSource {
    fn key(&self) -> &str {
        WEATHER_KEY
    }

    fn kind(&self) -> SourceKind {
        SourceKind::Weather
    }

    fn fallback(&self) -> Value {
        serde_json::to_value(WeatherReport::unavailable(self.latitude, self.longitude))
            .unwrap_or_default()
    }

    async fn fetch(&self) -> Result<Value, FetchError> {
        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("latitude", self.latitude.to_string()),
                ("longitude", self.longitude.to_string()),
                ("current_weather", "true".to_string()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        let body = response.text().await?;
        let report = parse_open_meteo(&body, self.utc_offset_hours)?;
        Ok(serde_json::to_value(report)?)
    }
}
