//! Event scanner: edge-triggered crossing detection per candle index

use crate::indicators::momentum::{calculate_macd, calculate_rsi, MacdSeries};
use crate::indicators::structure::detect_patterns;
use crate::indicators::trend::calculate_ema;
use crate::indicators::volatility::{calculate_bollinger_bands, BollingerSeries};
use crate::models::candle::Candle;
use crate::models::signal::{
    BollingerCross, CandlePattern, EmaCross, MacdCross, RsiCross, SignalComponents,
};
use crate::signals::engine::{round2, EngineConfig};
use std::collections::HashMap;

/// Every indicator series the scanner consults, aligned to the input
/// candle slice.
pub struct IndicatorSeries {
    pub closes: Vec<f64>,
    pub rsi: Vec<Option<f64>>,
    pub ema_short: Vec<Option<f64>>,
    pub ema_long: Vec<Option<f64>>,
    pub macd: MacdSeries,
    pub bollinger: BollingerSeries,
    pub patterns: HashMap<usize, CandlePattern>,
}

impl IndicatorSeries {
    /// Compute every series once for the whole candle slice.
    pub fn compute(candles: &[Candle], config: &EngineConfig) -> Self {
        let closes: Vec<f64> = candles.iter().map(|c| c.close).collect();

        let rsi = calculate_rsi(&closes, config.rsi_period);
        let ema_short = calculate_ema(&closes, config.short_ema_period);
        let ema_long = calculate_ema(&closes, config.long_ema_period);
        let macd = calculate_macd(
            &closes,
            config.macd_fast_period,
            config.macd_slow_period,
            config.macd_signal_period,
        );
        let bollinger =
            calculate_bollinger_bands(&closes, config.bollinger_period, config.bollinger_std_dev);
        let patterns = detect_patterns(candles);

        Self {
            closes,
            rsi,
            ema_short,
            ema_long,
            macd,
            bollinger,
            patterns,
        }
    }
}

/// Components and reason strings collected at one index.
#[derive(Debug, Clone)]
pub struct IndexEvents {
    pub components: SignalComponents,
    pub reasons: Vec<String>,
}

/// Check all five signal families at index `i`.
///
/// Every check is edge-triggered on the `i-1 -> i` step; a family that
/// merely stays above or below its reference does not fire. Returns
/// `None` when nothing fired. `i` must be at least 1.
pub fn scan_index(series: &IndicatorSeries, i: usize, config: &EngineConfig) -> Option<IndexEvents> {
    let mut components = SignalComponents::default();
    let mut reasons = Vec::new();

    // 1. Candlestick pattern at this index
    if let Some(&pattern) = series.patterns.get(&i) {
        components.pattern = Some(pattern);
        reasons.push(pattern.to_string());
    }

    // 2. EMA cross event
    if let (Some(short_prev), Some(long_prev), Some(short_now), Some(long_now)) = (
        series.ema_short[i - 1],
        series.ema_long[i - 1],
        series.ema_short[i],
        series.ema_long[i],
    ) {
        if short_prev <= long_prev && short_now > long_now {
            components.ema_cross = Some(EmaCross::GoldenCross);
            reasons.push(format!(
                "Golden Cross (EMA {}/{})",
                config.short_ema_period, config.long_ema_period
            ));
        } else if short_prev >= long_prev && short_now < long_now {
            components.ema_cross = Some(EmaCross::DeathCross);
            reasons.push(format!(
                "Death Cross (EMA {}/{})",
                config.short_ema_period, config.long_ema_period
            ));
        }
    }

    // 3. MACD crossover, skipped while either line is undefined
    if let (Some(macd_prev), Some(signal_prev), Some(macd_now), Some(signal_now)) = (
        series.macd.macd[i - 1],
        series.macd.signal[i - 1],
        series.macd.macd[i],
        series.macd.signal[i],
    ) {
        if macd_prev <= signal_prev && macd_now > signal_now {
            components.macd_cross = Some(MacdCross::Bullish);
            reasons.push("MACD Bullish Cross".to_string());
        } else if macd_prev >= signal_prev && macd_now < signal_now {
            components.macd_cross = Some(MacdCross::Bearish);
            reasons.push("MACD Bearish Cross".to_string());
        }
    }

    // 4. Bollinger band break
    if let (Some(upper_prev), Some(upper_now), Some(lower_prev), Some(lower_now)) = (
        series.bollinger.upper[i - 1],
        series.bollinger.upper[i],
        series.bollinger.lower[i - 1],
        series.bollinger.lower[i],
    ) {
        let close_prev = series.closes[i - 1];
        let close_now = series.closes[i];
        if close_prev <= upper_prev && close_now > upper_now {
            components.bollinger_cross = Some(BollingerCross::Upper);
            reasons.push("Price broke upper Bollinger Band".to_string());
        } else if close_prev >= lower_prev && close_now < lower_now {
            components.bollinger_cross = Some(BollingerCross::Lower);
            reasons.push("Price broke lower Bollinger Band".to_string());
        }
    }

    // 5. RSI threshold crossing
    if let (Some(rsi_prev), Some(rsi_now)) = (series.rsi[i - 1], series.rsi[i]) {
        if rsi_prev >= config.rsi_oversold && rsi_now < config.rsi_oversold {
            components.rsi_cross = Some(RsiCross::Oversold);
            reasons.push(format!("RSI crossed into Oversold ({})", round2(rsi_now)));
        } else if rsi_prev <= config.rsi_overbought && rsi_now > config.rsi_overbought {
            components.rsi_cross = Some(RsiCross::Overbought);
            reasons.push(format!("RSI crossed into Overbought ({})", round2(rsi_now)));
        }
    }

    if reasons.is_empty() {
        None
    } else {
        Some(IndexEvents {
            components,
            reasons,
        })
    }
}
