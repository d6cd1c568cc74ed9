//! Environment-driven configuration

use std::env;

/// Pairs tracked when TRACKED_PAIRS is unset.
pub const DEFAULT_TRACKED_PAIRS: &[&str] = &["BTC-USD", "ETH-USD", "XRP-USD", "USDT-USD", "SOL-USD"];

pub fn get_environment() -> String {
    env::var("ENVIRONMENT").unwrap_or_else(|_| "sandbox".to_string())
}

pub fn get_database_url() -> String {
    env::var("DATABASE_URL")
        .unwrap_or_else(|_| "host=localhost port=5432 user=candlescope dbname=candlescope".to_string())
}

pub fn get_redis_url() -> String {
    env::var("REDIS_URL").unwrap_or_else(|_| "redis://127.0.0.1:6379".to_string())
}

/// Optional Coinbase API key sent as CB-ACCESS-KEY.
pub fn get_coinbase_api_key() -> Option<String> {
    env::var("COINBASE_API_KEY").ok().filter(|key| !key.is_empty())
}

/// Pairs to track, comma-separated in TRACKED_PAIRS.
pub fn get_tracked_pairs() -> Vec<String> {
    match env::var("TRACKED_PAIRS") {
        Ok(raw) => raw
            .split(',')
            .map(|pair| pair.trim().to_string())
            .filter(|pair| !pair.is_empty())
            .collect(),
        Err(_) => DEFAULT_TRACKED_PAIRS.iter().map(|p| p.to_string()).collect(),
    }
}

/// Candle interval requested from the exchange ("1h", "4h", "1d").
pub fn get_candle_interval() -> String {
    env::var("CANDLE_INTERVAL").unwrap_or_else(|_| "1h".to_string())
}

/// Seconds between polling cycles over the tracked pairs.
pub fn get_poll_interval_seconds() -> u64 {
    env::var("POLL_INTERVAL_SECONDS")
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(300)
}
