//! Coinbase provider tests against a mock HTTP server

use candlescope::services::coinbase::CoinbaseMarketDataProvider;
use candlescope::services::market_data::MarketDataProvider;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_fetch_candles_parses_and_sorts_ascending() {
    let server = MockServer::start().await;

    // Coinbase returns rows newest-first as [time, low, high, open, close, volume]
    let body = json!([
        [1_700_007_200, 99.0, 102.0, 100.0, 101.0, 12.5],
        [1_700_003_600, 98.0, 101.0, 99.5, 100.0, 10.0],
        [1_700_000_000, 97.0, 100.0, 98.0, 99.5, 8.0]
    ]);

    Mock::given(method("GET"))
        .and(path("/products/BTC-USD/candles"))
        .and(query_param("granularity", "3600"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&server)
        .await;

    let provider = CoinbaseMarketDataProvider::with_base_url(server.uri());
    let candles = provider
        .fetch_candles("BTC-USD", "1h")
        .await
        .expect("fetch should succeed");

    assert_eq!(candles.len(), 3);
    assert!(candles
        .windows(2)
        .all(|pair| pair[0].timestamp < pair[1].timestamp));

    assert_eq!(candles[0].timestamp, 1_700_000_000);
    assert_eq!(candles[0].low, 97.0);
    assert_eq!(candles[0].high, 100.0);
    assert_eq!(candles[0].open, 98.0);
    assert_eq!(candles[0].close, 99.5);
    assert_eq!(candles[0].volume, 8.0);
}

#[tokio::test]
async fn test_fetch_candles_maps_interval_granularity() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/products/ETH-USD/candles"))
        .and(query_param("granularity", "86400"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let provider = CoinbaseMarketDataProvider::with_base_url(server.uri());
    let candles = provider
        .fetch_candles("ETH-USD", "1d")
        .await
        .expect("fetch should succeed");

    assert!(candles.is_empty());
}
