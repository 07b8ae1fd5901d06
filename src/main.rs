//! ipcheck - public IP echo with geolocation and visit counters
//!
//! This is the composition root that wires together all the components.

use ipcheck::adapters::inbound::{AppState, HttpServer};
use ipcheck::adapters::outbound::{DashMapGeoCache, IpWhoIsGeoResolver, SqliteVisitStore};
use ipcheck::{load_config, GeoService};
use std::sync::Arc;
use tracing_subscriber::fmt::format::FmtSpan;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration from environment
    let cfg = load_config()?;

    // Setup logging
    let log_level = if cfg.debug {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_span_events(FmtSpan::CLOSE)
        .init();

    tracing::info!(
        "starting ipcheck listen={} db={} geo_ttl={}s geo_timeout={}ms",
        cfg.listen_addr,
        cfg.db_path,
        cfg.geo_ttl_secs,
        cfg.geo_timeout_ms
    );

    // ===== COMPOSITION ROOT =====

    // 1. Create outbound adapters

    // Visit counters (SQLite)
    let visits = Arc::new(SqliteVisitStore::open(&cfg.db_path)?);

    // Geolocation provider (ipwho.is) behind an in-memory cache (DashMap)
    let resolver = Arc::new(IpWhoIsGeoResolver::new(
        cfg.geo_base_url.clone(),
        cfg.geo_timeout(),
    )?);
    let cache = Arc::new(DashMapGeoCache::new());

    // 2. Create application service
    let geo = Arc::new(GeoService::new(
        cache,
        resolver,
        cfg.geo_ttl(),
        cfg.geo_timeout(),
    ));

    // 3. Create inbound adapter and run
    let server = HttpServer::new(cfg.listen_addr.clone(), AppState::new(geo, visits));

    server.run().await
}
