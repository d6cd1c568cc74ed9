//! Signal data models

use serde::{Deserialize, Serialize};
use std::fmt;

/// Verdict attached to a signal record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SignalType {
    Buy,
    Sell,
    Watch,
}

impl fmt::Display for SignalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SignalType::Buy => write!(f, "Buy"),
            SignalType::Sell => write!(f, "Sell"),
            SignalType::Watch => write!(f, "Watch"),
        }
    }
}

/// Short/long EMA crossover event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EmaCross {
    GoldenCross,
    DeathCross,
}

impl fmt::Display for EmaCross {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EmaCross::GoldenCross => write!(f, "Golden Cross"),
            EmaCross::DeathCross => write!(f, "Death Cross"),
        }
    }
}

/// MACD line crossing its signal line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MacdCross {
    Bullish,
    Bearish,
}

/// Close breaking out of a Bollinger band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BollingerCross {
    Upper,
    Lower,
}

/// RSI crossing a 30/70 threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RsiCross {
    Oversold,
    Overbought,
}

/// Discrete candlestick shapes over adjacent candle pairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CandlePattern {
    BullishEngulfing,
    BearishEngulfing,
    Hammer,
    HangingMan,
}

impl fmt::Display for CandlePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CandlePattern::BullishEngulfing => write!(f, "Bullish Engulfing"),
            CandlePattern::BearishEngulfing => write!(f, "Bearish Engulfing"),
            CandlePattern::Hammer => write!(f, "Hammer"),
            CandlePattern::HangingMan => write!(f, "Hanging Man"),
        }
    }
}

/// Families that fired at a single candle index.
///
/// Built fresh per index, never carried over from the previous one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SignalComponents {
    pub pattern: Option<CandlePattern>,
    pub ema_cross: Option<EmaCross>,
    pub macd_cross: Option<MacdCross>,
    pub bollinger_cross: Option<BollingerCross>,
    pub rsi_cross: Option<RsiCross>,
}

impl SignalComponents {
    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }

    /// Number of families present.
    pub fn count(&self) -> usize {
        [
            self.pattern.is_some(),
            self.ema_cross.is_some(),
            self.macd_cross.is_some(),
            self.bollinger_cross.is_some(),
            self.rsi_cross.is_some(),
        ]
        .iter()
        .filter(|present| **present)
        .count()
    }

    /// Resolve the record direction. First matching rule wins; the
    /// order is a fixed tie-break policy, not incidental.
    pub fn direction(&self) -> SignalType {
        if self.ema_cross == Some(EmaCross::GoldenCross) {
            return SignalType::Buy;
        }
        if self.pattern == Some(CandlePattern::BullishEngulfing) {
            return SignalType::Buy;
        }
        if self.macd_cross == Some(MacdCross::Bullish) {
            return SignalType::Buy;
        }
        if self.pattern == Some(CandlePattern::Hammer) {
            return SignalType::Buy;
        }

        if self.ema_cross == Some(EmaCross::DeathCross) {
            return SignalType::Sell;
        }
        if self.pattern == Some(CandlePattern::BearishEngulfing) {
            return SignalType::Sell;
        }
        if self.macd_cross == Some(MacdCross::Bearish) {
            return SignalType::Sell;
        }
        if self.pattern == Some(CandlePattern::HangingMan) {
            return SignalType::Sell;
        }

        SignalType::Watch
    }
}

/// One emitted signal event, immutable once assembled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalRecord {
    pub timestamp: i64,
    pub signal_type: SignalType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern_detected: Option<CandlePattern>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rsi: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ema_cross: Option<EmaCross>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub macd_histogram: Option<f64>,
    pub reason: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<u8>,
}
