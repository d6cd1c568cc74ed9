//! End-to-end scenarios over scripted candle series

use candlescope::models::candle::Candle;
use candlescope::models::signal::{CandlePattern, EmaCross, SignalType};
use candlescope::signals::engine::SignalEngine;

const BASE_TS: i64 = 1_700_000_000;
const STEP_SECS: i64 = 3600;

fn flat_candle(i: usize, price: f64) -> Candle {
    Candle::new(
        BASE_TS + i as i64 * STEP_SECS,
        price,
        price,
        price,
        price,
        1000.0,
    )
}

fn ts(i: usize) -> i64 {
    BASE_TS + i as i64 * STEP_SECS
}

/// Flat at 100 through index 199, flat at 101 from index 200: the
/// short EMA flips above the long EMA exactly once, at index 200.
fn golden_cross_series() -> Vec<Candle> {
    (0..250)
        .map(|i| flat_candle(i, if i < 200 { 100.0 } else { 101.0 }))
        .collect()
}

/// Mirror of the golden cross series, dropping to 99 at index 200.
fn death_cross_series() -> Vec<Candle> {
    (0..250)
        .map(|i| flat_candle(i, if i < 200 { 100.0 } else { 99.0 }))
        .collect()
}

#[test]
fn test_scripted_golden_cross_fires_exactly_once() {
    let engine = SignalEngine::default();
    let signals = engine.analyze_all(&golden_cross_series());

    let crosses: Vec<_> = signals.iter().filter(|s| s.ema_cross.is_some()).collect();
    assert_eq!(crosses.len(), 1, "EMA pair must fire exactly once");

    let cross = crosses[0];
    assert_eq!(cross.timestamp, ts(200));
    assert_eq!(cross.signal_type, SignalType::Buy);
    assert_eq!(cross.ema_cross, Some(EmaCross::GoldenCross));
    assert!(cross
        .reason
        .iter()
        .any(|r| r == "Golden Cross (EMA 50/200)"));
    assert!(cross.confidence.expect("confidence attached") >= 80);

    // The adjacent indices carry no EMA event
    assert!(!signals.iter().any(|s| s.timestamp == ts(199)));
    assert!(signals
        .iter()
        .filter(|s| s.timestamp == ts(201))
        .all(|s| s.ema_cross.is_none()));
}

#[test]
fn test_scripted_death_cross_is_a_sell() {
    let engine = SignalEngine::default();
    let signals = engine.analyze_all(&death_cross_series());

    let crosses: Vec<_> = signals.iter().filter(|s| s.ema_cross.is_some()).collect();
    assert_eq!(crosses.len(), 1);

    let cross = crosses[0];
    assert_eq!(cross.timestamp, ts(200));
    assert_eq!(cross.signal_type, SignalType::Sell);
    assert_eq!(cross.ema_cross, Some(EmaCross::DeathCross));
    assert!(cross.reason.iter().any(|r| r == "Death Cross (EMA 50/200)"));

    // The one-candle crash also breaks the lower band and drags the
    // RSI straight through the oversold threshold
    assert!(cross
        .reason
        .iter()
        .any(|r| r == "Price broke lower Bollinger Band"));
    assert!(cross.reason.iter().any(|r| r == "RSI crossed into Oversold (0)"));
    assert_eq!(cross.rsi, Some(0.0));
    assert_eq!(cross.confidence, Some(100));
}

#[test]
fn test_engulfing_pattern_in_context() {
    // Flat series with a two-candle reversal: a bearish candle at 209
    // engulfed by a bullish one at 210
    let mut candles: Vec<Candle> = (0..250).map(|i| flat_candle(i, 100.0)).collect();
    candles[209] = Candle::new(ts(209), 100.4, 100.5, 99.7, 99.8, 1000.0);
    candles[210] = Candle::new(ts(210), 99.7, 100.6, 99.6, 100.5, 1000.0);

    let engine = SignalEngine::default();
    let signals = engine.analyze_all(&candles);

    let record = signals
        .iter()
        .find(|s| s.timestamp == ts(210))
        .expect("pattern record at index 210");
    assert_eq!(record.pattern_detected, Some(CandlePattern::BullishEngulfing));
    assert_eq!(record.signal_type, SignalType::Buy);
    assert!(record.reason.iter().any(|r| r == "Bullish Engulfing"));
}

#[test]
fn test_every_record_is_well_formed() {
    let engine = SignalEngine::default();
    let signals = engine.analyze_all(&golden_cross_series());

    assert!(!signals.is_empty());
    for signal in &signals {
        assert!(!signal.reason.is_empty());
        assert!(signal.confidence.expect("confidence attached") <= 100);
    }
}

#[test]
fn test_indices_before_lookback_are_never_scanned() {
    // An engulfing pair placed before the lookback boundary is invisible
    let mut candles: Vec<Candle> = (0..250).map(|i| flat_candle(i, 100.0)).collect();
    candles[100] = Candle::new(ts(100), 100.4, 100.5, 99.7, 99.8, 1000.0);
    candles[101] = Candle::new(ts(101), 99.7, 100.6, 99.6, 100.5, 1000.0);

    let engine = SignalEngine::default();
    let signals = engine.analyze_all(&candles);
    assert!(!signals.iter().any(|s| s.timestamp == ts(101)));
}
