//! Structural analysis: candlestick patterns

pub mod patterns;

pub use patterns::*;
