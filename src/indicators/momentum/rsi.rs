//! RSI (Relative Strength Index) indicator

/// Calculate RSI over a full close series using Wilder smoothing.
///
/// RSI = 100 - (100 / (1 + RS))
/// RS = Average Gain / Average Loss
///
/// The averages are seeded at index `period` with the simple mean of
/// the first `period` deltas and smoothed recursively afterwards:
/// `avg[i] = (avg[i-1] * (period - 1) + value[i-1]) / period`.
/// Output is aligned to the input; indices before `period` are
/// undefined, and a series no longer than `period` comes back
/// all-undefined.
pub fn calculate_rsi(closes: &[f64], period: usize) -> Vec<Option<f64>> {
    let mut rsi = vec![None; closes.len()];
    if period == 0 || closes.len() <= period {
        return rsi;
    }

    let mut gains = Vec::with_capacity(closes.len() - 1);
    let mut losses = Vec::with_capacity(closes.len() - 1);
    for pair in closes.windows(2) {
        let delta = pair[1] - pair[0];
        if delta > 0.0 {
            gains.push(delta);
            losses.push(0.0);
        } else {
            gains.push(0.0);
            losses.push(-delta);
        }
    }

    let mut avg_gain = gains[..period].iter().sum::<f64>() / period as f64;
    let mut avg_loss = losses[..period].iter().sum::<f64>() / period as f64;
    rsi[period] = Some(rsi_from_averages(avg_gain, avg_loss));

    for i in period + 1..closes.len() {
        avg_gain = (avg_gain * (period as f64 - 1.0) + gains[i - 1]) / period as f64;
        avg_loss = (avg_loss * (period as f64 - 1.0) + losses[i - 1]) / period as f64;
        rsi[i] = Some(rsi_from_averages(avg_gain, avg_loss));
    }

    rsi
}

fn rsi_from_averages(avg_gain: f64, avg_loss: f64) -> f64 {
    // Zero average loss reads as infinite relative strength
    if avg_loss == 0.0 {
        return 100.0;
    }
    let rs = avg_gain / avg_loss;
    100.0 - (100.0 / (1.0 + rs))
}
