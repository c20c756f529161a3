//! Freshness Policy
//!
//! Pure, synchronous rules deciding when cached data may be served and how
//! long freshly fetched data should be kept.
//!
//! - weather: intervals aligned to UTC wall-clock boundaries
//! - cat / generic: fixed intervals anchored to the Unix epoch

mod freshness;
mod kind;

#[cfg(test)]
mod property_tests;

pub use freshness::{Decision, FreshnessConfig, FreshnessPolicy, PolicyError, Resolution};
pub use kind::{infer_kind, SourceKind};
