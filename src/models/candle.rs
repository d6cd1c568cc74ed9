//! Candlestick data model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Timestamps with a magnitude above this are epoch milliseconds.
/// Persisted history mixes second- and millisecond-resolution rows, so
/// this cutoff must not change.
const MILLIS_CUTOFF: i64 = 1_000_000_000_000;

/// One OHLCV candle. Timestamps are epoch seconds or milliseconds as
/// delivered by the exchange; the engine never mutates a candle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    pub timestamp: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl Candle {
    pub fn new(timestamp: i64, open: f64, high: f64, low: f64, close: f64, volume: f64) -> Self {
        Self {
            timestamp,
            open,
            high,
            low,
            close,
            volume,
        }
    }

    /// Timestamp normalized to epoch seconds.
    pub fn timestamp_secs(&self) -> i64 {
        if self.timestamp > MILLIS_CUTOFF {
            self.timestamp / 1000
        } else {
            self.timestamp
        }
    }

    /// Wall-clock open time, `None` for out-of-range timestamps.
    pub fn datetime(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.timestamp_secs(), 0)
    }

    pub fn is_bullish(&self) -> bool {
        self.close > self.open
    }

    pub fn is_bearish(&self) -> bool {
        self.close < self.open
    }

    pub fn body(&self) -> f64 {
        (self.close - self.open).abs()
    }

    pub fn upper_shadow(&self) -> f64 {
        self.high - self.open.max(self.close)
    }

    pub fn lower_shadow(&self) -> f64 {
        self.open.min(self.close) - self.low
    }
}
