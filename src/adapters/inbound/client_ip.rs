//! Client IP extraction
//!
//! Works out the caller's address from proxy headers, falling back to the
//! socket peer.

use axum::http::HeaderMap;
use std::net::{IpAddr, SocketAddr};

const X_FORWARDED_FOR: &str = "x-forwarded-for";
const X_REAL_IP: &str = "x-real-ip";

/// Determine the client IP for a request.
///
/// Order of precedence:
/// 1. First hop of `X-Forwarded-For`
/// 2. `X-Real-IP`
/// 3. The TCP peer address
///
/// Headers are trusted as-is; this service is meant to sit behind a proxy
/// that sets them.
pub fn client_ip(headers: &HeaderMap, peer: Option<SocketAddr>) -> String {
    if let Some(xff) = header_str(headers, X_FORWARDED_FOR) {
        let first = xff.split(',').next().unwrap_or_default().trim();
        let ip = strip_port(first);
        if !ip.is_empty() {
            return ip;
        }
    }

    if let Some(xri) = header_str(headers, X_REAL_IP) {
        let ip = strip_port(xri);
        if !ip.is_empty() {
            return ip;
        }
    }

    peer.map(|addr| addr.ip().to_string()).unwrap_or_default()
}

/// Trimmed, non-empty header value.
fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

/// Remove a trailing `:port` from an address.
///
/// A bare IP comes back in canonical text form; anything that is neither an
/// IP nor `host:port` is returned unchanged.
pub fn strip_port(v: &str) -> String {
    if let Ok(ip) = v.parse::<IpAddr>() {
        return ip.to_string();
    }
    if let Ok(addr) = v.parse::<SocketAddr>() {
        return addr.ip().to_string();
    }
    if let Some((host, _port)) = split_host_port(v) {
        if !host.is_empty() {
            return host.to_string();
        }
    }
    v.to_string()
}

/// Split `host:port` or `[host]:port`. Unbracketed hosts may not contain ':'.
fn split_host_port(v: &str) -> Option<(&str, &str)> {
    if let Some(rest) = v.strip_prefix('[') {
        let (host, after) = rest.split_once(']')?;
        let port = after.strip_prefix(':')?;
        return Some((host, port));
    }

    let (host, port) = v.rsplit_once(':')?;
    if host.contains(':') {
        return None;
    }
    Some((host, port))
}
