//! Signal detection and scoring.

pub mod engine;
pub mod scanner;
pub mod scoring;

pub use engine::{EngineConfig, SignalEngine};
pub use scanner::{IndexEvents, IndicatorSeries};
pub use scoring::calculate_confidence;
