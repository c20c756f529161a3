//! Freshness Policy Module
//!
//! Decides whether a cached value is still usable and how long a newly
//! fetched value should live. Every answer is a pure function of the source
//! kind and the instant passed in; nothing about when an entry was written is
//! consulted, so repeated calls never drift.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tracing::warn;

use super::kind::{infer_kind, SourceKind};
use crate::config::ConfigError;

// == Configuration ==
/// Interval length, in seconds, for each source kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FreshnessConfig {
    weather_secs: u64,
    cat_secs: u64,
    default_secs: u64,
}

impl FreshnessConfig {
    /// Builds a config, rejecting zero-length intervals.
    pub fn new(weather_secs: u64, cat_secs: u64, default_secs: u64) -> Result<Self, ConfigError> {
        for (name, value) in [
            ("weather", weather_secs),
            ("cat", cat_secs),
            ("default", default_secs),
        ] {
            if value == 0 {
                return Err(ConfigError::InvalidInterval { name, value });
            }
        }

        Ok(Self {
            weather_secs,
            cat_secs,
            default_secs,
        })
    }

    /// Interval length for `kind`.
    pub fn interval_secs(&self, kind: SourceKind) -> u64 {
        match kind {
            SourceKind::Weather => self.weather_secs,
            SourceKind::Cat => self.cat_secs,
            SourceKind::Generic => self.default_secs,
        }
    }

    /// TTL handed out whenever a decision has to fall back.
    pub fn default_ttl(&self) -> u64 {
        self.default_secs
    }
}

impl Default for FreshnessConfig {
    fn default() -> Self {
        Self {
            weather_secs: 900,
            cat_secs: 300,
            default_secs: 60,
        }
    }
}

// == Errors ==
/// Failures inside interval arithmetic. Never escapes the policy.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PolicyError {
    #[error("interval for {0} does not fit in signed seconds")]
    InvalidInterval(SourceKind),

    #[error("interval arithmetic overflowed for {kind} at {now}s")]
    Overflow { kind: SourceKind, now: i64 },
}

// == Decision ==
/// How the kind behind a decision was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Resolution {
    /// The caller named the kind.
    Explicit,
    /// The kind was read off the payload shape.
    Inferred,
    /// No shape matched; the default rule was applied.
    Unrecognized,
}

/// Outcome of evaluating a cached payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Decision {
    pub kind: SourceKind,
    pub resolution: Resolution,
    /// Whether the cached value may be served as is.
    pub fresh: bool,
    /// Seconds a value written now should live.
    pub ttl_seconds: u64,
}

// == Interval Window ==
/// Interval bounds in whole Unix seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Window {
    start: i64,
    end: i64,
    now: i64,
}

impl Window {
    /// Interval of `period` seconds containing `now`, counted from the Unix
    /// epoch. The epoch is a UTC midnight, so any period dividing a day
    /// lands on wall-clock marks (900 gives :00/:15/:30/:45).
    fn aligned(now: i64, period: i64) -> Option<Self> {
        let start = now.checked_sub(now.checked_rem_euclid(period)?)?;
        let end = start.checked_add(period)?;
        Some(Self { start, end, now })
    }

    /// A boundary second belongs to the interval it opens, which nothing
    /// could have been cached in yet.
    fn is_inside(&self) -> bool {
        self.now > self.start
    }

    /// Seconds to the next boundary, in `1..=period`.
    fn ttl_seconds(&self) -> u64 {
        self.end.abs_diff(self.now).max(1)
    }
}

// == Freshness Policy ==
/// Stateless freshness rules, safe to share across tasks without locking.
#[derive(Debug, Clone, Copy, Default)]
pub struct FreshnessPolicy {
    config: FreshnessConfig,
}

impl FreshnessPolicy {
    pub fn new(config: FreshnessConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &FreshnessConfig {
        &self.config
    }

    // == Is Fresh ==
    /// Returns true while `now` lies strictly inside the current interval
    /// for `kind`, false during a boundary second or if the interval cannot
    /// be computed.
    pub fn is_fresh(&self, kind: SourceKind, now: DateTime<Utc>) -> bool {
        match self.window(kind, now) {
            Ok(window) => window.is_inside(),
            Err(err) => {
                warn!(%kind, error = %err, "freshness check failed, treating as stale");
                false
            }
        }
    }

    // == TTL ==
    /// Seconds until the end of the interval containing `now`.
    ///
    /// Always in `1..=interval`; falls back to the default TTL if the
    /// interval cannot be computed. `now` is truncated to the whole second,
    /// so an entry written in the last second of an interval outlives the
    /// boundary by under a second. [`is_fresh`](Self::is_fresh) reports the
    /// whole boundary second as stale, which keeps such an entry from being
    /// served in the new interval.
    pub fn ttl_seconds(&self, kind: SourceKind, now: DateTime<Utc>) -> u64 {
        match self.window(kind, now) {
            Ok(window) => window.ttl_seconds(),
            Err(err) => {
                warn!(%kind, error = %err, "ttl computation failed, using default");
                self.config.default_ttl()
            }
        }
    }

    // == Evaluate ==
    /// Decides on a cached payload.
    ///
    /// An explicit `kind` always wins. Without one the kind is inferred from
    /// the payload shape; an unrecognized shape yields a stale decision with
    /// the default TTL instead of an error.
    pub fn evaluate(&self, kind: Option<SourceKind>, payload: &Value, now: DateTime<Utc>) -> Decision {
        let (kind, resolution) = match kind {
            Some(kind) => (kind, Resolution::Explicit),
            None => match infer_kind(payload) {
                Some(kind) => (kind, Resolution::Inferred),
                None => {
                    warn!("cached payload matches no known source shape, treating as stale");
                    return self.stale(SourceKind::Generic, Resolution::Unrecognized);
                }
            },
        };

        match self.window(kind, now) {
            Ok(window) => Decision {
                kind,
                resolution,
                fresh: window.is_inside(),
                ttl_seconds: window.ttl_seconds(),
            },
            Err(err) => {
                warn!(%kind, error = %err, "freshness evaluation failed, treating as stale");
                self.stale(kind, resolution)
            }
        }
    }

    fn stale(&self, kind: SourceKind, resolution: Resolution) -> Decision {
        Decision {
            kind,
            resolution,
            fresh: false,
            ttl_seconds: self.config.default_ttl(),
        }
    }

    fn window(&self, kind: SourceKind, now: DateTime<Utc>) -> Result<Window, PolicyError> {
        let period = i64::try_from(self.config.interval_secs(kind))
            .ok()
            .filter(|secs| *secs > 0)
            .ok_or(PolicyError::InvalidInterval(kind))?;

        let now = now.timestamp();
        Window::aligned(now, period).ok_or(PolicyError::Overflow { kind, now })
    }
}
