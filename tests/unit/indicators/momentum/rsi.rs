//! Unit tests for the RSI indicator

use candlescope::indicators::momentum::calculate_rsi;

#[test]
fn test_rsi_insufficient_data() {
    let closes: Vec<f64> = (0..14).map(|i| 100.0 + i as f64).collect();
    assert!(calculate_rsi(&closes, 14).iter().all(|v| v.is_none()));
}

#[test]
fn test_rsi_defined_from_period_index() {
    let closes: Vec<f64> = (0..30).map(|i| 100.0 + i as f64).collect();
    let rsi = calculate_rsi(&closes, 14);
    assert!(rsi[..14].iter().all(|v| v.is_none()));
    assert!(rsi[14..].iter().all(|v| v.is_some()));
}

#[test]
fn test_rsi_saturates_at_100_on_monotone_rise() {
    let closes: Vec<f64> = (0..40).map(|i| 100.0 + i as f64).collect();
    let rsi = calculate_rsi(&closes, 14);
    // No losses anywhere: relative strength is treated as infinite
    assert!(rsi[14..].iter().all(|v| *v == Some(100.0)));
}

#[test]
fn test_rsi_is_zero_on_monotone_fall() {
    let closes: Vec<f64> = (0..40).map(|i| 100.0 - i as f64).collect();
    let rsi = calculate_rsi(&closes, 14);
    assert!(rsi[14..].iter().all(|v| *v == Some(0.0)));
}

#[test]
fn test_rsi_stays_bounded() {
    let closes: Vec<f64> = (0..60)
        .map(|i| 100.0 + ((i * 7) % 13) as f64 - 6.0)
        .collect();
    let rsi = calculate_rsi(&closes, 14);
    for value in rsi.iter().flatten() {
        assert!((0.0..=100.0).contains(value), "RSI out of bounds: {}", value);
    }
}

#[test]
fn test_rsi_wilder_smoothing_values() {
    // Alternating +1/-1 deltas with period 2: seed averages are both
    // 0.5, the next step smooths in a gain of 1
    let rsi = calculate_rsi(&[10.0, 11.0, 10.0, 11.0], 2);
    assert_eq!(rsi[0], None);
    assert_eq!(rsi[1], None);
    assert_eq!(rsi[2], Some(50.0));
    assert_eq!(rsi[3], Some(75.0));
}
