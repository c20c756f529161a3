//! Cache Module
//!
//! In-memory expiring store, the backend interface handlers depend on, and
//! the cached-fetch sequence that ties them to the freshness policy.

mod backend;
mod cached_fetch;
mod entry;
mod stats;
mod store;

// Re-export public types
pub use backend::{CacheBackend, MemoryCache};
pub use cached_fetch::{cached_fetch, CacheRequest, Origin, Served};
pub use entry::CacheEntry;
pub use stats::CacheStats;
pub use store::CacheStore;

// == Public Constants ==
/// Maximum allowed key length in bytes
pub const MAX_KEY_LENGTH: usize = 256;

// == Cache Keys ==
pub const WEATHER_KEY: &str = "weather_cache";
pub const CAT_KEY: &str = "cat_cache";
pub const QUOTES_KEY: &str = "quotes_cache";
pub const NOTES_KEY: &str = "notes_cache";
