//! Domain Entities - Core business objects
//!
//! These entities represent the core concepts of the ipcheck domain.
//! They have no external dependencies and contain only business logic.

/// Country label returned for loopback, link-local and private addresses.
pub const LOCAL_COUNTRY: &str = "Local/Private";
/// Country code returned for loopback, link-local and private addresses.
pub const LOCAL_CODE: &str = "LAN";

/// Geographic information resolved from an IP address.
///
/// Empty strings mean "unknown". A record is never partially filled by the
/// cache: readers always see a record exactly as it was written.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeoRecord {
    /// Country name (e.g. "Germany")
    pub country: String,
    /// Country code (ISO 3166-1 alpha-2: DE, US, BR, etc)
    pub code: String,
}

impl GeoRecord {
    pub fn new(country: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            country: country.into(),
            code: code.into(),
        }
    }

    /// The "no data" sentinel: both fields empty.
    pub fn unknown() -> Self {
        Self::default()
    }

    /// Fixed record for addresses that never leave the local network.
    pub fn local() -> Self {
        Self::new(LOCAL_COUNTRY, LOCAL_CODE)
    }

    pub fn is_unknown(&self) -> bool {
        self.country.is_empty() && self.code.is_empty()
    }

    /// Consume the record into a `(country, code)` pair.
    pub fn into_pair(self) -> (String, String) {
        (self.country, self.code)
    }
}

/// Number of requests seen from a single client address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisitCount {
    /// Client IP as extracted from the request
    pub ip: String,
    /// Total visits recorded for this IP
    pub count: u64,
}

impl VisitCount {
    pub fn new(ip: impl Into<String>, count: u64) -> Self {
        Self {
            ip: ip.into(),
            count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ===== GeoRecord Tests =====

    #[test]
    fn test_geo_record_new() {
        let geo = GeoRecord::new("Germany", "DE");

        assert_eq!(geo.country, "Germany");
        assert_eq!(geo.code, "DE");
        assert!(!geo.is_unknown());
    }

    #[test]
    fn test_geo_record_unknown_is_empty() {
        let geo = GeoRecord::unknown();

        assert_eq!(geo.country, "");
        assert_eq!(geo.code, "");
        assert!(geo.is_unknown());
        assert_eq!(geo, GeoRecord::default());
    }

    #[test]
    fn test_geo_record_local_sentinel() {
        let geo = GeoRecord::local();

        assert_eq!(geo.country, "Local/Private");
        assert_eq!(geo.code, "LAN");
        assert!(!geo.is_unknown());
    }

    #[test]
    fn test_geo_record_partial_is_not_unknown() {
        // Only a fully empty record is the sentinel
        assert!(!GeoRecord::new("", "DE").is_unknown());
        assert!(!GeoRecord::new("Germany", "").is_unknown());
    }

    #[test]
    fn test_geo_record_into_pair() {
        let (country, code) = GeoRecord::new("Brazil", "BR").into_pair();
        assert_eq!(country, "Brazil");
        assert_eq!(code, "BR");
    }

    // ===== VisitCount Tests =====

    #[test]
    fn test_visit_count_new() {
        let visit = VisitCount::new("203.0.113.7", 3);

        assert_eq!(visit.ip, "203.0.113.7");
        assert_eq!(visit.count, 3);
    }
}
