//! Market data provider interface for exchange integrations.

use crate::models::candle::Candle;
use async_trait::async_trait;

#[async_trait]
pub trait MarketDataProvider {
    /// Exchange identifier used in persistence keys (e.g. "coinbase").
    fn exchange(&self) -> &str;

    /// Fetch recent candles for a pair, ascending by timestamp.
    async fn fetch_candles(
        &self,
        pair: &str,
        interval: &str,
    ) -> Result<Vec<Candle>, Box<dyn std::error::Error + Send + Sync>>;
}
