//! Visit Counter Port
//!
//! Defines the interface for persisting per-IP visit counters.

use crate::domain::entities::VisitCount;
use async_trait::async_trait;

/// Persistent key to monotonic-counter table.
///
/// This is an outbound port; the HTTP layer records one visit per request
/// and lists all counters on the stats page.
#[async_trait]
pub trait VisitCounter: Send + Sync {
    /// Increment the counter for `ip` and return the new value.
    async fn record_visit(&self, ip: &str) -> anyhow::Result<u64>;

    /// Get every counter, ordered by IP.
    async fn all_visits(&self) -> anyhow::Result<Vec<VisitCount>>;
}
