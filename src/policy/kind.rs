//! Source Kind Module
//!
//! Tags that select which freshness rule applies to a cached value, and a
//! best-effort inference of that tag from the shape of an untyped payload.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Field set carried by a normalized cat image payload.
const CAT_FIELDS: [&str; 4] = ["id", "url", "width", "height"];

/// Field holding the nested observation in a weather payload.
const WEATHER_FIELD: &str = "current_weather";

// == Source Kind ==
/// Which refresh rule governs a cached value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// Upstream refreshes on wall-clock aligned boundaries.
    Weather,
    /// Short-lived external image with no upstream cadence.
    Cat,
    /// Anything else; uses the default interval.
    Generic,
}

impl SourceKind {
    /// Lowercase name used in logs and serialized output.
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceKind::Weather => "weather",
            SourceKind::Cat => "cat",
            SourceKind::Generic => "generic",
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// == Shape Inference ==
/// Guesses the kind of a cached payload from its fields.
///
/// Only meant for call sites that cannot name the kind themselves. Returns
/// `None` when the payload matches no known shape; never panics.
///
/// - weather: an object with a nested object under `current_weather`
/// - cat: an object whose keys are exactly `id`, `url`, `width`, `height`
pub fn infer_kind(payload: &Value) -> Option<SourceKind> {
    let object = payload.as_object()?;

    if object.get(WEATHER_FIELD).is_some_and(Value::is_object) {
        return Some(SourceKind::Weather);
    }

    if object.len() == CAT_FIELDS.len() && CAT_FIELDS.iter().all(|f| object.contains_key(*f)) {
        return Some(SourceKind::Cat);
    }

    None
}
