//! Job types for the fetch -> analyze -> store pipeline

use crate::models::signal::SignalRecord;
use serde::{Deserialize, Serialize};

/// Fetch fresh candles for a pair and persist them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchCandlesJob {
    pub pair: String,
    pub interval: String,
}

/// Run the signal engine over the stored history of a pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzeSignalsJob {
    pub pair: String,
    pub interval: String,
}

/// Persist the records produced by an analysis run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreSignalsJob {
    pub pair: String,
    pub interval: String,
    pub signals: Vec<SignalRecord>,
}
