//! Integration tests for the geolocation pipeline with Wiremock
//!
//! Exercises GeoService + DashMapGeoCache + IpWhoIsGeoResolver against a
//! mock provider.

use ipcheck::adapters::outbound::{DashMapGeoCache, IpWhoIsGeoResolver};
use ipcheck::infrastructure::ManualClock;
use ipcheck::{GeoRecord, GeoService};
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TTL: Duration = Duration::from_secs(24 * 60 * 60);
const TIMEOUT: Duration = Duration::from_secs(2);

fn germany() -> serde_json::Value {
    serde_json::json!({
        "ip": "8.8.8.8",
        "success": true,
        "country": " Germany ",
        "country_code": "DE "
    })
}

fn build_service(mock_server: &MockServer, timeout: Duration) -> (GeoService, ManualClock) {
    let clock = ManualClock::new();
    let cache = Arc::new(DashMapGeoCache::with_clock(Arc::new(clock.clone())));
    let resolver = Arc::new(IpWhoIsGeoResolver::new(mock_server.uri(), timeout).unwrap());
    (GeoService::new(cache, resolver, TTL, timeout), clock)
}

async fn provider_calls(mock_server: &MockServer) -> usize {
    mock_server.received_requests().await.unwrap().len()
}

/// Trimmed fields are returned and a repeat lookup is served from cache
#[tokio::test]
async fn test_lookup_trims_and_caches() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/8.8.8.8"))
        .respond_with(ResponseTemplate::new(200).set_body_json(germany()))
        .mount(&mock_server)
        .await;

    let (service, _clock) = build_service(&mock_server, TIMEOUT);

    let first = service.lookup("8.8.8.8").await;
    let second = service.lookup("8.8.8.8").await;

    assert_eq!(first.clone().into_pair(), ("Germany".to_string(), "DE".to_string()));
    assert_eq!(second, first);
    assert_eq!(provider_calls(&mock_server).await, 1);
}

/// Expired entries trigger a fresh provider call
#[tokio::test]
async fn test_lookup_after_expiry_refetches() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/8.8.8.8"))
        .respond_with(ResponseTemplate::new(200).set_body_json(germany()))
        .mount(&mock_server)
        .await;

    let (service, clock) = build_service(&mock_server, TIMEOUT);

    service.lookup("8.8.8.8").await;
    clock.advance(TTL + Duration::from_secs(1));
    service.lookup("8.8.8.8").await;

    assert_eq!(provider_calls(&mock_server).await, 2);
}

/// A failed call is not cached; the next lookup reflects the recovery
#[tokio::test]
async fn test_failure_then_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/8.8.8.8"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/8.8.8.8"))
        .respond_with(ResponseTemplate::new(200).set_body_json(germany()))
        .mount(&mock_server)
        .await;

    let (service, _clock) = build_service(&mock_server, TIMEOUT);

    assert_eq!(service.lookup("8.8.8.8").await, GeoRecord::unknown());
    assert_eq!(
        service.lookup("8.8.8.8").await,
        GeoRecord::new("Germany", "DE")
    );
    assert_eq!(provider_calls(&mock_server).await, 2);
}

/// A timed-out call is not cached either
#[tokio::test]
async fn test_timeout_then_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/8.8.8.8"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(germany())
                .set_delay(Duration::from_secs(1)),
        )
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/8.8.8.8"))
        .respond_with(ResponseTemplate::new(200).set_body_json(germany()))
        .mount(&mock_server)
        .await;

    let (service, _clock) = build_service(&mock_server, Duration::from_millis(200));

    assert_eq!(service.lookup("8.8.8.8").await, GeoRecord::unknown());
    assert_eq!(service.cached_entries(), 0);
    assert_eq!(service.lookup("8.8.8.8").await.code, "DE");
}

/// Provider-confirmed "no data" is cached for the TTL
#[tokio::test]
async fn test_success_with_empty_fields_is_cached() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/203.0.113.99"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true,
            "country": "",
            "country_code": ""
        })))
        .mount(&mock_server)
        .await;

    let (service, _clock) = build_service(&mock_server, TIMEOUT);

    assert_eq!(service.lookup("203.0.113.99").await, GeoRecord::unknown());
    assert_eq!(service.lookup("203.0.113.99").await, GeoRecord::unknown());
    assert_eq!(provider_calls(&mock_server).await, 1);
}

/// success=false is a failure and is retried
#[tokio::test]
async fn test_unsuccessful_response_is_retried() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/8.8.8.8"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": false,
            "message": "Invalid IP address"
        })))
        .mount(&mock_server)
        .await;

    let (service, _clock) = build_service(&mock_server, TIMEOUT);

    service.lookup("8.8.8.8").await;
    service.lookup("8.8.8.8").await;

    assert_eq!(provider_calls(&mock_server).await, 2);
}

/// Local and malformed inputs never reach the provider
#[tokio::test]
async fn test_local_and_invalid_inputs_skip_provider() {
    let mock_server = MockServer::start().await;
    let (service, _clock) = build_service(&mock_server, TIMEOUT);

    assert_eq!(service.lookup("127.0.0.1").await, GeoRecord::local());
    assert_eq!(service.lookup("192.168.0.1").await, GeoRecord::local());
    assert_eq!(service.lookup("fe80::1").await, GeoRecord::local());
    assert_eq!(service.lookup("not-an-ip").await, GeoRecord::unknown());
    assert_eq!(service.lookup("999.999.999.999").await, GeoRecord::unknown());
    assert_eq!(service.lookup("").await, GeoRecord::unknown());

    assert_eq!(provider_calls(&mock_server).await, 0);
}

/// Many concurrent cold lookups all see a complete record
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_cold_lookups() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/8.8.8.8"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(germany())
                .set_delay(Duration::from_millis(20)),
        )
        .mount(&mock_server)
        .await;

    let (service, _clock) = build_service(&mock_server, TIMEOUT);
    let service = Arc::new(service);

    let lookups = (0..100).map(|_| {
        let service = service.clone();
        async move { service.lookup("8.8.8.8").await }
    });
    let results = futures::future::join_all(lookups).await;

    for record in &results {
        assert!(
            *record == GeoRecord::new("Germany", "DE") || record.is_unknown(),
            "torn record: {:?}",
            record
        );
    }

    let calls = provider_calls(&mock_server).await;
    assert!(calls >= 1 && calls <= 100);

    // Warm cache: no further provider traffic
    service.lookup("8.8.8.8").await;
    assert_eq!(provider_calls(&mock_server).await, calls);
}
