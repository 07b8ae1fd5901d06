use crate::adapters::outbound::DEFAULT_BASE_URL;
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    // HTTP front end
    pub listen_addr: String,
    pub db_path: String,
    pub debug: bool,

    // Geolocation settings
    pub geo_base_url: String,
    pub geo_ttl_secs: u64,
    pub geo_timeout_ms: u64,
}

impl Config {
    pub fn geo_ttl(&self) -> Duration {
        Duration::from_secs(self.geo_ttl_secs)
    }

    pub fn geo_timeout(&self) -> Duration {
        Duration::from_millis(self.geo_timeout_ms)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:8080".to_string(),
            db_path: "data/stats.db".to_string(),
            debug: false,
            geo_base_url: DEFAULT_BASE_URL.to_string(),
            geo_ttl_secs: 86_400,
            geo_timeout_ms: 2_000,
        }
    }
}

pub fn load_config() -> anyhow::Result<Config> {
    let listen_addr = std::env::var("IPCHECK_LISTEN_ADDR")
        .unwrap_or_else(|_| "0.0.0.0:8080".to_string());

    let db_path = std::env::var("IPCHECK_DB_PATH")
        .unwrap_or_else(|_| "data/stats.db".to_string());

    let debug = std::env::var("DEBUG").is_ok();

    // Geolocation settings
    let geo_base_url = std::env::var("IPCHECK_GEO_BASE_URL")
        .map(|v| v.trim().to_string())
        .ok()
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

    let geo_ttl_secs = std::env::var("IPCHECK_GEO_TTL_SECS")
        .unwrap_or_else(|_| "86400".to_string())
        .parse()
        .unwrap_or(86_400);

    let geo_timeout_ms = std::env::var("IPCHECK_GEO_TIMEOUT_MS")
        .unwrap_or_else(|_| "2000".to_string())
        .parse()
        .unwrap_or(2_000);

    Ok(Config {
        listen_addr,
        db_path,
        debug,
        geo_base_url,
        geo_ttl_secs,
        geo_timeout_ms,
    })
}
