//! Coinbase Exchange market data provider

use crate::config;
use crate::models::candle::Candle;
use crate::services::market_data::MarketDataProvider;
use async_trait::async_trait;
use backon::{ExponentialBuilder, Retryable};
use std::time::Duration;
use tracing::warn;

const DEFAULT_BASE_URL: &str = "https://api.exchange.coinbase.com";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

const MAX_RETRIES: usize = 5;
const INITIAL_DELAY: Duration = Duration::from_secs(5);
const BACKOFF_FACTOR: f32 = 2.0;

pub struct CoinbaseMarketDataProvider {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl CoinbaseMarketDataProvider {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL.to_string())
    }

    /// Override the API endpoint (tests point this at a mock server).
    pub fn with_base_url(base_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
            api_key: config::get_coinbase_api_key(),
        }
    }

    async fn get_candles_once(
        &self,
        pair: &str,
        granularity: u64,
    ) -> Result<Vec<Candle>, Box<dyn std::error::Error + Send + Sync>> {
        let url = format!(
            "{}/products/{}/candles?granularity={}",
            self.base_url, pair, granularity
        );

        let mut request = self.client.get(&url).timeout(REQUEST_TIMEOUT);
        if let Some(ref key) = self.api_key {
            request = request.header("CB-ACCESS-KEY", key);
        }

        let response = request.send().await?.error_for_status()?;

        // Rows arrive newest-first as [time, low, high, open, close, volume]
        let rows: Vec<(i64, f64, f64, f64, f64, f64)> = response.json().await?;

        let mut candles: Vec<Candle> = rows
            .into_iter()
            .map(|(time, low, high, open, close, volume)| {
                Candle::new(time, open, high, low, close, volume)
            })
            .collect();
        candles.sort_by_key(|candle| candle.timestamp);

        Ok(candles)
    }
}

impl Default for CoinbaseMarketDataProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MarketDataProvider for CoinbaseMarketDataProvider {
    fn exchange(&self) -> &str {
        "coinbase"
    }

    async fn fetch_candles(
        &self,
        pair: &str,
        interval: &str,
    ) -> Result<Vec<Candle>, Box<dyn std::error::Error + Send + Sync>> {
        let granularity = granularity_seconds(interval);

        (|| self.get_candles_once(pair, granularity))
            .retry(
                ExponentialBuilder::default()
                    .with_min_delay(INITIAL_DELAY)
                    .with_factor(BACKOFF_FACTOR)
                    .with_max_times(MAX_RETRIES),
            )
            .notify(|err, dur: Duration| {
                warn!(
                    pair = %pair,
                    error = %err,
                    backoff_secs = dur.as_secs(),
                    "Coinbase fetch failed for {}, backing off {}s",
                    pair,
                    dur.as_secs()
                );
            })
            .await
    }
}

/// Map a human interval to Coinbase granularity seconds.
pub fn granularity_seconds(interval: &str) -> u64 {
    match interval {
        "1h" => 3600,
        "4h" => 14400,
        "1d" => 86400,
        _ => 3600,
    }
}
