//! Application Layer
//!
//! Use cases that orchestrate domain ports.

mod geo_service;

pub use geo_service::{GeoService, DEFAULT_TIMEOUT, DEFAULT_TTL};
