//! Cached Fetch Module
//!
//! Check the cache, serve the entry while the policy says it is fresh,
//! otherwise fetch, store with the policy's TTL and return. A failed fetch
//! returns the caller's fallback without caching it, so the next request
//! retries upstream.

use std::fmt::Display;
use std::future::Future;

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::cache::CacheBackend;
use crate::clock::Clock;
use crate::policy::{FreshnessPolicy, SourceKind};

// == Request ==
/// What to look up and how to treat it.
#[derive(Debug, Clone)]
pub struct CacheRequest<'a> {
    pub key: &'a str,
    /// `None` lets the policy infer the kind from the cached payload.
    pub kind: Option<SourceKind>,
    /// Skip the cache read and go straight to the fetch.
    pub bypass: bool,
    /// Returned when the fetch fails.
    pub fallback: Value,
}

impl<'a> CacheRequest<'a> {
    pub fn new(key: &'a str, kind: SourceKind, fallback: Value) -> Self {
        Self {
            key,
            kind: Some(kind),
            bypass: false,
            fallback,
        }
    }

    pub fn bypass(mut self, bypass: bool) -> Self {
        self.bypass = bypass;
        self
    }
}

// == Outcome ==
/// Where a served value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "origin", rename_all = "snake_case")]
pub enum Origin {
    Cache,
    Fetched { ttl_seconds: u64 },
    Fallback,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Served {
    pub value: Value,
    pub origin: Origin,
}

// == Cached Fetch ==
/// Serves `request.key` from `cache` or from `fetch`.
///
/// Cache read and write errors are logged and otherwise ignored; the caller
/// always gets a value.
pub async fn cached_fetch<F, Fut, E>(
    cache: &dyn CacheBackend,
    policy: &FreshnessPolicy,
    clock: &dyn Clock,
    request: CacheRequest<'_>,
    fetch: F,
) -> Served
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<Value, E>>,
    E: Display,
{
    let key = request.key;

    if request.bypass {
        debug!("Cache [{}] bypassed", key);
    } else {
        match cache.get(key).await {
            Ok(Some(cached)) => {
                let decision = policy.evaluate(request.kind, &cached, clock.now());
                if decision.fresh {
                    info!("Cache [{}] hit", key);
                    return Served {
                        value: cached,
                        origin: Origin::Cache,
                    };
                }
                info!("Cache [{}] stale", key);
            }
            Ok(None) => info!("Cache [{}] empty", key),
            Err(err) => warn!("Cache [{}] read failed, fetching: {}", key, err),
        }
    }

    let value = match fetch().await {
        Ok(value) => value,
        Err(err) => {
            warn!("Fetch for [{}] failed, serving fallback: {}", key, err);
            return Served {
                value: request.fallback,
                origin: Origin::Fallback,
            };
        }
    };

    let ttl_seconds = policy.evaluate(request.kind, &value, clock.now()).ttl_seconds;
    match cache.set(key, value.clone(), ttl_seconds).await {
        Ok(()) => info!("Cache [{}] refreshed, TTL = {}s", key, ttl_seconds),
        Err(err) => warn!("Cache [{}] write failed: {}", key, err),
    }

    Served {
        value,
        origin: Origin::Fetched { ttl_seconds },
    }
}
