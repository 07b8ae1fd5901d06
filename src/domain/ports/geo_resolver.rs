//! GeoIP Resolver Port
//!
//! Defines the interface for resolving IP addresses to geographic locations.

use crate::domain::entities::GeoRecord;
use async_trait::async_trait;
use std::net::IpAddr;

/// Why an external lookup produced no usable answer.
///
/// Every variant is transient from the caller's point of view: nothing is
/// cached and the next lookup for the same address will try again.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("lookup timed out")]
    Timeout,

    #[error("provider returned HTTP {0}")]
    Status(u16),

    #[error("malformed provider response: {0}")]
    Decode(String),

    #[error("provider reported an unsuccessful lookup")]
    Unsuccessful,
}

/// Resolver for IP address to geographic location.
///
/// This is an outbound port that abstracts the geolocation provider.
/// Implementations may call ipwho.is, ip-api.com, or any other service.
#[async_trait]
pub trait GeoResolver: Send + Sync {
    /// Resolve an IP address to geographic information.
    ///
    /// `Ok` means the provider confirmed the lookup; its fields may still be
    /// empty when the provider has no data for the address.
    async fn resolve(&self, ip: IpAddr) -> Result<GeoRecord, ResolveError>;
}
