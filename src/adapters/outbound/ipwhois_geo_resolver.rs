//! ipwho.is GeoIP Resolver
//!
//! Implements GeoResolver using the ipwho.is HTTP API.

use crate::domain::entities::GeoRecord;
use crate::domain::ports::{GeoResolver, ResolveError};
use async_trait::async_trait;
use serde::Deserialize;
use std::net::IpAddr;
use std::time::Duration;

/// Public ipwho.is endpoint; the address is appended as the last path segment.
pub const DEFAULT_BASE_URL: &str = "https://ipwho.is/";

/// Fields we read from an ipwho.is response. Everything else is ignored.
#[derive(Debug, Deserialize)]
struct IpWhoIsResponse {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    country: Option<String>,
    #[serde(default)]
    country_code: Option<String>,
}

/// ipwho.is geolocation resolver.
///
/// One HTTP GET per lookup, bounded by the client timeout. Only a 2xx
/// response whose JSON body carries `"success": true` counts as a result.
pub struct IpWhoIsGeoResolver {
    client: reqwest::Client,
    base_url: String,
}

impl IpWhoIsGeoResolver {
    /// Create a resolver against `base_url` with a per-request timeout.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    fn url_for(&self, ip: IpAddr) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), ip)
    }

    fn transport_error(e: reqwest::Error) -> ResolveError {
        if e.is_timeout() {
            ResolveError::Timeout
        } else {
            ResolveError::Transport(e.to_string())
        }
    }

    /// Turn a decoded body into a record, trimming both fields.
    fn into_record(resp: IpWhoIsResponse) -> Result<GeoRecord, ResolveError> {
        if !resp.success {
            return Err(ResolveError::Unsuccessful);
        }

        let country = resp.country.unwrap_or_default();
        let code = resp.country_code.unwrap_or_default();
        Ok(GeoRecord::new(country.trim(), code.trim()))
    }
}

#[async_trait]
impl GeoResolver for IpWhoIsGeoResolver {
    async fn resolve(&self, ip: IpAddr) -> Result<GeoRecord, ResolveError> {
        let url = self.url_for(ip);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(Self::transport_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ResolveError::Status(status.as_u16()));
        }

        let body = response.bytes().await.map_err(Self::transport_error)?;
        let parsed: IpWhoIsResponse =
            serde_json::from_slice(&body).map_err(|e| ResolveError::Decode(e.to_string()))?;

        Self::into_record(parsed)
    }
}
