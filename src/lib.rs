//! Candlescope: candlestick signal detection for exchange pairs.
//!
//! Fetches OHLCV candles, runs a multi-indicator engine over the
//! series (RSI, EMA crosses, MACD, Bollinger Bands, candlestick
//! patterns) and persists scored signal records.

pub mod config;
pub mod core;
pub mod db;
pub mod indicators;
pub mod jobs;
pub mod logging;
pub mod models;
pub mod services;
pub mod signals;
