//! DashMap Geo Cache
//!
//! Implements GeoCache using DashMap for sharded reader/writer access.

use crate::domain::entities::GeoRecord;
use crate::domain::ports::{Clock, GeoCache};
use crate::infrastructure::SystemClock;
use dashmap::DashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
struct CacheEntry {
    record: GeoRecord,
    /// `None` when `now + ttl` is past what `Instant` can represent.
    expires_at: Option<Instant>,
}

impl CacheEntry {
    fn is_fresh(&self, now: Instant) -> bool {
        self.expires_at.map_or(true, |expires_at| now < expires_at)
    }
}

/// DashMap-backed geolocation cache.
///
/// Each `get` takes a shard read lock for one lookup and clones the record
/// out; each `put` takes a shard write lock for one insert. Entries are never
/// removed: expiry is checked lazily on read and a stale entry is replaced by
/// the next successful resolution.
pub struct DashMapGeoCache {
    entries: DashMap<String, CacheEntry>,
    clock: Arc<dyn Clock>,
}

impl DashMapGeoCache {
    /// Create an empty cache driven by the system clock.
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// Create an empty cache driven by the given clock.
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: DashMap::new(),
            clock,
        }
    }
}

impl Default for DashMapGeoCache {
    fn default() -> Self {
        Self::new()
    }
}

impl GeoCache for DashMapGeoCache {
    fn get(&self, ip: &str) -> Option<GeoRecord> {
        let now = self.clock.now();
        let entry = self.entries.get(ip)?;
        if entry.is_fresh(now) {
            Some(entry.record.clone())
        } else {
            None
        }
    }

    fn put(&self, ip: &str, record: GeoRecord, ttl: Duration) {
        let expires_at = self.clock.now().checked_add(ttl);
        self.entries.insert(ip.to_string(), CacheEntry { record, expires_at });
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}
