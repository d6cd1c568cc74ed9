//! Unit tests for the Bollinger Bands indicator

use candlescope::indicators::volatility::calculate_bollinger_bands;

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {}, got {}",
        expected,
        actual
    );
}

#[test]
fn test_bollinger_insufficient_data() {
    let bands = calculate_bollinger_bands(&[1.0, 2.0, 3.0], 20, 2.0);
    assert!(bands.upper.iter().all(|v| v.is_none()));
    assert!(bands.middle.iter().all(|v| v.is_none()));
    assert!(bands.lower.iter().all(|v| v.is_none()));
}

#[test]
fn test_bollinger_lookback_boundary() {
    let closes: Vec<f64> = (0..30).map(|i| 100.0 + i as f64).collect();
    let bands = calculate_bollinger_bands(&closes, 20, 2.0);
    assert!(bands.middle[..19].iter().all(|v| v.is_none()));
    assert!(bands.middle[19..].iter().all(|v| v.is_some()));
}

#[test]
fn test_bollinger_population_std_dev() {
    let closes = [1.0, 2.0, 3.0, 4.0, 5.0];
    let bands = calculate_bollinger_bands(&closes, 5, 2.0);
    let sigma = 2.0_f64.sqrt();
    assert_close(bands.middle[4].unwrap(), 3.0);
    assert_close(bands.upper[4].unwrap(), 3.0 + 2.0 * sigma);
    assert_close(bands.lower[4].unwrap(), 3.0 - 2.0 * sigma);
}

#[test]
fn test_bollinger_window_slides() {
    let closes = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
    let bands = calculate_bollinger_bands(&closes, 5, 2.0);
    assert_close(bands.middle[4].unwrap(), 3.0);
    assert_close(bands.middle[5].unwrap(), 4.0);
}

#[test]
fn test_bollinger_collapses_on_constant_prices() {
    let bands = calculate_bollinger_bands(&[10.0; 25], 20, 2.0);
    assert_eq!(bands.upper[24], Some(10.0));
    assert_eq!(bands.middle[24], Some(10.0));
    assert_eq!(bands.lower[24], Some(10.0));
}
