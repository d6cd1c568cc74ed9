//! Indicator library: pure, full-series computations aligned to the
//! input candles. Undefined leading values are explicit `None`s.

pub mod momentum;
pub mod structure;
pub mod trend;
pub mod volatility;
