//! Adapters Layer
//!
//! Inbound adapters drive the application (HTTP); outbound adapters
//! implement the domain ports (cache, provider, storage).

pub mod inbound;
pub mod outbound;
