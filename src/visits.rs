//! Visit Log
//!
//! Counts dashboard visits. Only the last 24 hours are kept in detail; older
//! visits survive as part of the running total.

use std::collections::{HashSet, VecDeque};

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use tokio::sync::RwLock;

use crate::clock::SharedClock;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Visit {
    pub path: String,
    pub method: String,
    pub ip_address: String,
    pub visited_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct VisitStats {
    pub total: u64,
    pub last_24h: usize,
    /// Distinct IP addresses in the last 24 hours
    pub unique: usize,
}

#[derive(Debug, Default)]
struct VisitWindow {
    total: u64,
    recent: VecDeque<Visit>,
}

impl VisitWindow {
    fn prune(&mut self, now: DateTime<Utc>) {
        let cutoff = now - Duration::hours(24);
        while self.recent.front().is_some_and(|v| v.visited_at < cutoff) {
            self.recent.pop_front();
        }
    }
}

#[derive(Debug)]
pub struct VisitLog {
    window: RwLock<VisitWindow>,
    clock: SharedClock,
}

impl VisitLog {
    pub fn new(clock: SharedClock) -> Self {
        Self {
            window: RwLock::new(VisitWindow::default()),
            clock,
        }
    }

    /// Records a visit and returns the new total.
    pub async fn record(&self, path: &str, method: &str, ip_address: &str) -> u64 {
        let now = self.clock.now();
        let mut window = self.window.write().await;

        window.prune(now);
        window.total += 1;
        window.recent.push_back(Visit {
            path: path.to_string(),
            method: method.to_string(),
            ip_address: ip_address.to_string(),
            visited_at: now,
        });
        window.total
    }

    pub async fn stats(&self) -> VisitStats {
        let cutoff = self.clock.now() - Duration::hours(24);
        let window = self.window.read().await;

        let recent: Vec<&Visit> = window
            .recent
            .iter()
            .filter(|v| v.visited_at >= cutoff)
            .collect();
        let unique: HashSet<&str> = recent.iter().map(|v| v.ip_address.as_str()).collect();

        VisitStats {
            total: window.total,
            last_24h: recent.len(),
            unique: unique.len(),
        }
    }
}
