//! ipcheck Library
//!
//! Reports a caller's public IP address, enriches it with country
//! geolocation through a TTL cache, and counts visits per IP.
//! This module exposes the components for the binary and integration tests.

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

// Re-export commonly used types
pub use application::GeoService;
pub use config::load_config;
pub use domain::entities::{GeoRecord, VisitCount};
pub use domain::ports::{Clock, GeoCache, GeoResolver, ResolveError, VisitCounter};
pub use domain::services::AddressClassifier;
pub use domain::value_objects::AddressClass;
