mod clock;
mod geo_cache;
mod geo_resolver;
mod visit_counter;

pub use clock::Clock;
pub use geo_cache::GeoCache;
pub use geo_resolver::{GeoResolver, ResolveError};
pub use visit_counter::VisitCounter;
