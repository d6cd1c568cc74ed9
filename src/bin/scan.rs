//! One-shot scan: fetch, persist, analyze, report.
//!
//! Usage: scan [PAIR] [INTERVAL]

use candlescope::config;
use candlescope::db::SignalDatabase;
use candlescope::logging;
use candlescope::services::coinbase::CoinbaseMarketDataProvider;
use candlescope::services::market_data::MarketDataProvider;
use candlescope::signals::engine::SignalEngine;
use dotenvy::dotenv;
use std::env;
use tracing::{info, warn};

/// History window loaded back from the database for analysis.
const ANALYSIS_WINDOW: i64 = 500;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    dotenv().ok();
    logging::init_logging();

    let pair = env::args().nth(1).unwrap_or_else(|| "BTC-USD".to_string());
    let interval = env::args().nth(2).unwrap_or_else(config::get_candle_interval);

    info!(pair = %pair, interval = %interval, "Scanning {} ({})", pair, interval);

    let provider = CoinbaseMarketDataProvider::new();
    let candles = provider.fetch_candles(&pair, &interval).await?;
    if candles.is_empty() {
        warn!(pair = %pair, "No candles returned for {}", pair);
        return Ok(());
    }
    info!(count = candles.len(), "Fetched {} candles", candles.len());

    let database = SignalDatabase::new().await?;
    let inserted = database
        .store_candles(provider.exchange(), &pair, &interval, &candles)
        .await?;
    info!(inserted = inserted, "Logged {} new candles", inserted);

    let history = database
        .get_candles(provider.exchange(), &pair, &interval, ANALYSIS_WINDOW)
        .await?;

    let engine = SignalEngine::default();
    let signals = engine.analyze(&history);

    if signals.is_empty() {
        info!(pair = %pair, "No actionable events detected for {}", pair);
        return Ok(());
    }

    info!(count = signals.len(), "Found {} potential trade signals", signals.len());
    for signal in &signals {
        info!(
            timestamp = signal.timestamp,
            signal_type = %signal.signal_type,
            confidence = ?signal.confidence,
            "{} | {} | {} | RSI: {} | {}",
            signal.timestamp,
            signal.signal_type,
            signal
                .pattern_detected
                .map(|p| p.to_string())
                .unwrap_or_else(|| "N/A".to_string()),
            signal
                .rsi
                .map(|r| r.to_string())
                .unwrap_or_else(|| "N/A".to_string()),
            signal.reason.join(", ")
        );
    }

    let stored = database
        .store_signals(provider.exchange(), &pair, &interval, &signals)
        .await?;
    info!(stored = stored, "Persisted {} new signal records", stored);

    Ok(())
}
