//! Dashboard - a personal dashboard service
//!
//! Serves weather, cat pictures, quotes and notes over a JSON API. Upstream
//! payloads are cached under a freshness policy that follows the refresh
//! cadence of each data source.

pub mod api;
pub mod cache;
pub mod clock;
pub mod config;
pub mod error;
pub mod models;
pub mod policy;
pub mod sources;
pub mod storage;
pub mod tasks;
pub mod visits;

pub use api::AppState;
pub use config::Config;
pub use policy::{FreshnessPolicy, SourceKind};
pub use tasks::spawn_cleanup_task;
