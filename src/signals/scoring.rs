//! Confluence-based confidence scoring

use crate::models::signal::{BollingerCross, EmaCross, MacdCross, RsiCross, SignalComponents, SignalType};

const PATTERN_WEIGHT: u32 = 40;
const EMA_CROSS_WEIGHT: u32 = 60;
const BOLLINGER_CROSS_WEIGHT: u32 = 15;
const MACD_CROSS_WEIGHT: u32 = 25;
const RSI_CROSS_WEIGHT: u32 = 20;

const TREND_MOMENTUM_BONUS: u32 = 25;
const VOLATILITY_REVERSAL_BONUS: u32 = 20;
const PATTERN_CONFIRMATION_BONUS: u32 = 15;
const RSI_CONFIRMATION_BONUS: u32 = 20;

/// Score the confluence of fired components, capped at 100.
///
/// Base weights are summed per present family, agreement bonuses are
/// additive and independent, and a final directional RSI check adds a
/// confirmation bonus when the RSI value is defined.
pub fn calculate_confidence(components: &SignalComponents, rsi_value: Option<f64>) -> u8 {
    let mut score: u32 = 0;

    if components.pattern.is_some() {
        score += PATTERN_WEIGHT;
    }
    if components.ema_cross.is_some() {
        score += EMA_CROSS_WEIGHT;
    }
    if components.bollinger_cross.is_some() {
        score += BOLLINGER_CROSS_WEIGHT;
    }
    if components.macd_cross.is_some() {
        score += MACD_CROSS_WEIGHT;
    }
    if components.rsi_cross.is_some() {
        score += RSI_CROSS_WEIGHT;
    }

    // Trend (EMA) agreeing with momentum (MACD)
    if let (Some(ema), Some(macd)) = (components.ema_cross, components.macd_cross) {
        let both_bullish = ema == EmaCross::GoldenCross && macd == MacdCross::Bullish;
        let both_bearish = ema == EmaCross::DeathCross && macd == MacdCross::Bearish;
        if both_bullish || both_bearish {
            score += TREND_MOMENTUM_BONUS;
        }
    }

    // Volatility break (Bollinger) agreeing with an RSI extreme
    if let (Some(bollinger), Some(rsi)) = (components.bollinger_cross, components.rsi_cross) {
        let lower_oversold =
            bollinger == BollingerCross::Lower && rsi == RsiCross::Oversold;
        let upper_overbought =
            bollinger == BollingerCross::Upper && rsi == RsiCross::Overbought;
        if lower_oversold || upper_overbought {
            score += VOLATILITY_REVERSAL_BONUS;
        }
    }

    // Pattern confirmed by at least one other family
    if components.pattern.is_some() && components.count() > 1 {
        score += PATTERN_CONFIRMATION_BONUS;
    }

    // Directional RSI confirmation
    if let Some(rsi) = rsi_value {
        match components.direction() {
            SignalType::Buy if rsi > 50.0 && rsi < 70.0 => score += RSI_CONFIRMATION_BONUS,
            SignalType::Sell if rsi < 50.0 && rsi > 30.0 => score += RSI_CONFIRMATION_BONUS,
            _ => {}
        }
    }

    score.min(100) as u8
}
