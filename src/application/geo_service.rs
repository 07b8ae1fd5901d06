//! Geo Service - Geolocation use case
//!
//! Orchestrates address classification, the geo cache and the external
//! resolver. This is the interface the HTTP adapter calls for every request.

use crate::domain::entities::GeoRecord;
use crate::domain::ports::{GeoCache, GeoResolver, ResolveError};
use crate::domain::services::AddressClassifier;
use crate::domain::value_objects::AddressClass;
use std::net::IpAddr;
use std::sync::Arc;
use std::time::Duration;

/// How long a resolved record stays fresh.
pub const DEFAULT_TTL: Duration = Duration::from_secs(24 * 60 * 60);
/// Upper bound on a single external lookup.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(2);

/// Geo service - cache-aside geolocation.
///
/// For each lookup:
/// 1. Invalid or empty input yields the unknown record
/// 2. Local/private addresses yield `("Local/Private", "LAN")` without I/O
/// 3. A fresh cache entry is returned as-is
/// 4. Otherwise the resolver is called; successes are cached for the TTL,
///    failures are returned as unknown and not cached
///
/// Concurrent cold lookups for the same address are not de-duplicated and
/// may each reach the resolver.
pub struct GeoService {
    cache: Arc<dyn GeoCache>,
    resolver: Arc<dyn GeoResolver>,
    ttl: Duration,
    timeout: Duration,
}

impl GeoService {
    /// Create a new geo service.
    pub fn new(
        cache: Arc<dyn GeoCache>,
        resolver: Arc<dyn GeoResolver>,
        ttl: Duration,
        timeout: Duration,
    ) -> Self {
        Self {
            cache,
            resolver,
            ttl,
            timeout,
        }
    }

    /// Resolve `ip` to a country name and code.
    ///
    /// Never fails: every error path degrades to `GeoRecord::unknown()`.
    pub async fn lookup(&self, ip: &str) -> GeoRecord {
        let addr = match AddressClassifier::classify(ip) {
            AddressClass::Routable(addr) => addr,
            AddressClass::Local => return GeoRecord::local(),
            class @ AddressClass::Invalid => {
                tracing::debug!("skipping geo lookup for {:?}: {}", ip, class);
                return GeoRecord::unknown();
            }
        };

        let key = addr.to_string();
        if let Some(record) = self.cache.get(&key) {
            tracing::debug!("geo cache hit for {}", key);
            return record;
        }

        match self.resolve(addr).await {
            Ok(record) => {
                tracing::debug!(
                    "geo resolved {} -> {} ({})",
                    key,
                    record.country,
                    record.code
                );
                self.cache.put(&key, record.clone(), self.ttl);
                record
            }
            Err(e) => {
                tracing::warn!("geo lookup failed for {}: {}", key, e);
                GeoRecord::unknown()
            }
        }
    }

    /// Call the resolver, giving up after the configured timeout.
    async fn resolve(&self, ip: IpAddr) -> Result<GeoRecord, ResolveError> {
        match tokio::time::timeout(self.timeout, self.resolver.resolve(ip)).await {
            Ok(result) => result,
            Err(_) => Err(ResolveError::Timeout),
        }
    }

    /// Number of entries currently held by the cache.
    pub fn cached_entries(&self) -> usize {
        self.cache.len()
    }
}
