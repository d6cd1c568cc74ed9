//! Bollinger Bands indicator

/// Aligned band series; the first `period - 1` entries are undefined.
#[derive(Debug, Clone)]
pub struct BollingerSeries {
    pub upper: Vec<Option<f64>>,
    pub middle: Vec<Option<f64>>,
    pub lower: Vec<Option<f64>>,
}

/// Calculate Bollinger Bands over a trailing window.
///
/// Middle Band = SMA(period)
/// Upper Band = Middle + (std_dev * σ)
/// Lower Band = Middle - (std_dev * σ)
///
/// σ is the population standard deviation of the window.
pub fn calculate_bollinger_bands(closes: &[f64], period: usize, std_dev: f64) -> BollingerSeries {
    let len = closes.len();
    let mut bands = BollingerSeries {
        upper: vec![None; len],
        middle: vec![None; len],
        lower: vec![None; len],
    };
    if period == 0 || len < period {
        return bands;
    }

    for i in period - 1..len {
        let window = &closes[i + 1 - period..=i];
        let mean = window.iter().sum::<f64>() / period as f64;
        let variance = window
            .iter()
            .map(|close| (close - mean).powi(2))
            .sum::<f64>()
            / period as f64;
        let sigma = variance.sqrt();

        bands.middle[i] = Some(mean);
        bands.upper[i] = Some(mean + std_dev * sigma);
        bands.lower[i] = Some(mean - std_dev * sigma);
    }

    bands
}
