//! Value Objects - Immutable domain primitives
//!
//! Value objects are identified by their value rather than identity.
//! They are immutable and can be freely shared.

use std::fmt;
use std::net::IpAddr;

/// Classification of a textual address before any geolocation work.
///
/// Only `Routable` addresses are ever sent to the external provider; they
/// carry the canonical parsed address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressClass {
    /// Loopback, link-local or private-range address
    Local,
    /// Any other valid address; eligible for geolocation
    Routable(IpAddr),
    /// Not parseable as an IPv4 or IPv6 address
    Invalid,
}

impl AddressClass {
    /// Convert to string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Local => "local",
            Self::Routable(_) => "routable",
            Self::Invalid => "invalid",
        }
    }
}

impl fmt::Display for AddressClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
