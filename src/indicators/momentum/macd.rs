//! MACD (Moving Average Convergence Divergence) indicator

use crate::indicators::trend::{calculate_ema, calculate_ema_series};

/// Aligned MACD output series.
#[derive(Debug, Clone)]
pub struct MacdSeries {
    pub macd: Vec<Option<f64>>,
    pub signal: Vec<Option<f64>>,
    pub histogram: Vec<Option<f64>>,
}

impl MacdSeries {
    fn undefined(len: usize) -> Self {
        Self {
            macd: vec![None; len],
            signal: vec![None; len],
            histogram: vec![None; len],
        }
    }
}

/// Calculate the MACD line, signal line and histogram.
///
/// MACD = EMA(fast) - EMA(slow)
/// Signal = EMA(MACD, signal_period)
/// Histogram = MACD - Signal
///
/// Each output is undefined wherever any constituent EMA is.
pub fn calculate_macd(
    closes: &[f64],
    fast_period: usize,
    slow_period: usize,
    signal_period: usize,
) -> MacdSeries {
    if closes.len() < slow_period {
        return MacdSeries::undefined(closes.len());
    }

    let ema_fast = calculate_ema(closes, fast_period);
    let ema_slow = calculate_ema(closes, slow_period);

    let macd: Vec<Option<f64>> = ema_fast
        .iter()
        .zip(&ema_slow)
        .map(|(fast, slow)| match (fast, slow) {
            (Some(fast), Some(slow)) => Some(fast - slow),
            _ => None,
        })
        .collect();

    let signal = calculate_ema_series(&macd, signal_period);

    let histogram = macd
        .iter()
        .zip(&signal)
        .map(|(macd, signal)| match (macd, signal) {
            (Some(macd), Some(signal)) => Some(macd - signal),
            _ => None,
        })
        .collect();

    MacdSeries {
        macd,
        signal,
        histogram,
    }
}
