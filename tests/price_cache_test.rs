use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use fluxtrade::services::PriceService;

fn coingecko_body() -> serde_json::Value {
    json!({
        "ethereum": { "usd": 2000.0, "usd_24h_change": 1.5 },
        "usd-coin": { "usd": 1.0, "usd_24h_change": 0.01 },
        "dai": { "usd": 0.999, "usd_24h_change": -0.02 },
        "wrapped-bitcoin": { "usd": 45000.0, "usd_24h_change": 3.2 }
    })
}

#[tokio::test]
async fn test_second_lookup_within_window_skips_upstream() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/simple/price"))
        .and(query_param("vs_currencies", "usd"))
        .respond_with(ResponseTemplate::new(200).set_body_json(coingecko_body()))
        .expect(1)
        .mount(&server)
        .await;

    let service = PriceService::new(server.uri(), Duration::from_secs(300));

    let first = service.get_prices().await;
    let second = service.get_prices().await;

    assert_eq!(first["ETH"].price, 2000.0);
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_upstream_error_degrades_to_previous_snapshot() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/simple/price"))
        .respond_with(ResponseTemplate::new(200).set_body_json(coingecko_body()))
        .expect(1)
        .mount(&server)
        .await;

    // Zero TTL forces a refresh attempt on every lookup.
    let service = PriceService::new(server.uri(), Duration::from_secs(0));

    let fresh = service.get_prices().await;
    assert_eq!(fresh["WBTC"].price, 45000.0);

    // Swap the mock for a failing upstream; the cached snapshot must
    // still be served.
    server.reset().await;
    Mock::given(method("GET"))
        .and(path("/simple/price"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let degraded = service.get_prices().await;
    assert_eq!(degraded, fresh);
}

#[tokio::test]
async fn test_malformed_payload_falls_back() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/simple/price"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ethereum": {}})))
        .mount(&server)
        .await;

    let service = PriceService::new(server.uri(), Duration::from_secs(300));

    let prices = service.get_prices().await;
    // Nothing cached yet, so the hard-coded fallback set is served.
    assert_eq!(prices.len(), 4);
    assert_eq!(prices["ETH"].price, 1850.0);
}
