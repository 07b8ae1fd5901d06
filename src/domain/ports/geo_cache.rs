//! Geo Cache Port
//!
//! Defines the interface for the time-bounded geolocation cache.

use crate::domain::entities::GeoRecord;
use std::time::Duration;

/// Time-bounded cache of geolocation records keyed by normalized IP.
///
/// Implementations must be safe to share across request handlers:
/// readers never observe a half-written record, and each operation
/// holds its lock for a single lookup or insert.
pub trait GeoCache: Send + Sync {
    /// Get a copy of the record for `ip` if present and not yet expired.
    fn get(&self, ip: &str) -> Option<GeoRecord>;

    /// Insert or overwrite the record for `ip`, expiring `ttl` from now.
    fn put(&self, ip: &str, record: GeoRecord, ttl: Duration);

    /// Number of stored entries, including stale ones.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
