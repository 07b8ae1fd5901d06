mod dashmap_geo_cache;
mod ipwhois_geo_resolver;
mod sqlite_visit_store;

pub use dashmap_geo_cache::DashMapGeoCache;
pub use ipwhois_geo_resolver::{IpWhoIsGeoResolver, DEFAULT_BASE_URL};
pub use sqlite_visit_store::SqliteVisitStore;
