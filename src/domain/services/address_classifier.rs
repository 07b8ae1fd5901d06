//! Address Classifier Service
//!
//! Pure domain logic for deciding whether an address needs geolocation.
//! This service has NO external dependencies - it's pure Rust.

use crate::domain::value_objects::AddressClass;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

/// Address classifier for the geolocation pipeline.
///
/// An address is `Local` when it is one of:
/// 1. Loopback (127.0.0.0/8, ::1)
/// 2. Private range (10/8, 172.16/12, 192.168/16, fc00::/7)
/// 3. Link-local unicast (169.254/16, fe80::/10)
/// 4. Link-local multicast (224.0.0.0/24, ff02::/16)
///
/// IPv4-mapped IPv6 addresses are collapsed to IPv4 first, so
/// `::ffff:10.0.0.1` classifies the same as `10.0.0.1`.
pub struct AddressClassifier;

impl AddressClassifier {
    /// Trim and parse `input`, returning the canonical address.
    fn normalize(input: &str) -> Option<IpAddr> {
        input
            .trim()
            .parse::<IpAddr>()
            .ok()
            .map(|ip| ip.to_canonical())
    }

    /// Classify a textual address.
    ///
    /// A routable result carries the canonical address; its textual form is
    /// what the cache is keyed on and what the provider is asked about.
    pub fn classify(input: &str) -> AddressClass {
        match Self::normalize(input) {
            None => AddressClass::Invalid,
            Some(ip) if Self::is_local(ip) => AddressClass::Local,
            Some(ip) => AddressClass::Routable(ip),
        }
    }

    /// Whether a parsed address can never be geolocated.
    fn is_local(ip: IpAddr) -> bool {
        match ip.to_canonical() {
            IpAddr::V4(v4) => Self::is_local_v4(v4),
            IpAddr::V6(v6) => Self::is_local_v6(v6),
        }
    }

    fn is_local_v4(ip: Ipv4Addr) -> bool {
        let [a, b, c, _] = ip.octets();
        let link_local_multicast = a == 224 && b == 0 && c == 0;

        ip.is_loopback() || ip.is_private() || ip.is_link_local() || link_local_multicast
    }

    fn is_local_v6(ip: Ipv6Addr) -> bool {
        let first = ip.segments()[0];
        let unique_local = first & 0xfe00 == 0xfc00;
        let link_local_unicast = first & 0xffc0 == 0xfe80;
        // ff02::/16 and any other multicast group with link-local scope
        let link_local_multicast = first & 0xff0f == 0xff02;

        ip.is_loopback() || unique_local || link_local_unicast || link_local_multicast
    }
}
