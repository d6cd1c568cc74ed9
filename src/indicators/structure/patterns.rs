//! Candlestick pattern detection

use crate::models::candle::Candle;
use crate::models::signal::CandlePattern;
use std::collections::HashMap;

/// Scan adjacent candle pairs and classify discrete shapes.
///
/// At most one pattern per index; Engulfing outranks the Hammer /
/// Hanging Man shape when a candle matches both.
pub fn detect_patterns(candles: &[Candle]) -> HashMap<usize, CandlePattern> {
    let mut patterns = HashMap::new();
    if candles.len() < 2 {
        return patterns;
    }

    for i in 1..candles.len() {
        let prev = &candles[i - 1];
        let curr = &candles[i];

        // Current body strictly contains the prior body
        if prev.is_bearish()
            && curr.is_bullish()
            && curr.close > prev.open
            && curr.open < prev.close
        {
            patterns.insert(i, CandlePattern::BullishEngulfing);
            continue;
        }
        if prev.is_bullish()
            && curr.is_bearish()
            && curr.close < prev.open
            && curr.open > prev.close
        {
            patterns.insert(i, CandlePattern::BearishEngulfing);
            continue;
        }

        // Doji-like candles (zero body) are never hammers
        let body = curr.body();
        if body > 0.0 {
            let is_hammer_shape =
                curr.lower_shadow() >= 2.0 * body && curr.upper_shadow() <= 0.5 * body;

            if is_hammer_shape && prev.is_bearish() {
                patterns.insert(i, CandlePattern::Hammer);
            } else if is_hammer_shape && prev.is_bullish() {
                patterns.insert(i, CandlePattern::HangingMan);
            }
        }
    }

    patterns
}
