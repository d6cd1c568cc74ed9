//! Signal engine: indicator computation, event scanning and record
//! assembly over an immutable candle slice.

use crate::models::candle::Candle;
use crate::models::signal::SignalRecord;
use crate::signals::scanner::{scan_index, IndicatorSeries};
use crate::signals::scoring::calculate_confidence;

/// Engine parameters.
///
/// Defaults follow the standard 50/200 trend EMAs, 14-period RSI,
/// 12/26/9 MACD and 20-period 2σ Bollinger Bands.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub short_ema_period: usize,
    pub long_ema_period: usize,
    pub rsi_period: usize,
    pub rsi_oversold: f64,
    pub rsi_overbought: f64,
    pub macd_fast_period: usize,
    pub macd_slow_period: usize,
    pub macd_signal_period: usize,
    pub bollinger_period: usize,
    pub bollinger_std_dev: f64,
    /// Attach a confidence score to each record.
    pub evaluate_confidence: bool,
    /// How many of the most recent records `analyze` keeps.
    pub recent_limit: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            short_ema_period: 50,
            long_ema_period: 200,
            rsi_period: 14,
            rsi_oversold: 30.0,
            rsi_overbought: 70.0,
            macd_fast_period: 12,
            macd_slow_period: 26,
            macd_signal_period: 9,
            bollinger_period: 20,
            bollinger_std_dev: 2.0,
            evaluate_confidence: true,
            recent_limit: 5,
        }
    }
}

/// Walks a candle series once and emits signal records for every index
/// where at least one family fired. Pure: two calls over the same
/// slice produce identical records.
pub struct SignalEngine {
    config: EngineConfig,
}

impl SignalEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Minimum candle history before any index can be scanned.
    pub fn min_candles(&self) -> usize {
        self.config.long_ema_period
    }

    /// Analyze a candle series and keep only the most recent records.
    pub fn analyze(&self, candles: &[Candle]) -> Vec<SignalRecord> {
        let mut signals = self.analyze_all(candles);
        if signals.len() > self.config.recent_limit {
            signals.drain(..signals.len() - self.config.recent_limit);
        }
        signals
    }

    /// Analyze without trimming to the recent window.
    ///
    /// Series shorter than the long EMA lookback yield an empty vec;
    /// that is a normal outcome, not an error.
    pub fn analyze_all(&self, candles: &[Candle]) -> Vec<SignalRecord> {
        if candles.len() < self.config.long_ema_period {
            return Vec::new();
        }

        let series = IndicatorSeries::compute(candles, &self.config);
        let mut signals = Vec::new();

        // The scan starts at the long EMA period so every indicator is
        // defined at i and i-1
        for i in self.config.long_ema_period..candles.len() {
            if let Some(events) = scan_index(&series, i, &self.config) {
                let rsi_at_signal = series.rsi[i].map(round2);
                let confidence = if self.config.evaluate_confidence {
                    Some(calculate_confidence(&events.components, rsi_at_signal))
                } else {
                    None
                };

                signals.push(SignalRecord {
                    timestamp: candles[i].timestamp,
                    signal_type: events.components.direction(),
                    pattern_detected: events.components.pattern,
                    rsi: rsi_at_signal,
                    ema_cross: events.components.ema_cross,
                    macd_histogram: series.macd.histogram[i].map(round2),
                    reason: events.reasons,
                    confidence,
                });
            }
        }

        signals
    }
}

impl Default for SignalEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

/// Round to two decimals for display fields and reason strings.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
