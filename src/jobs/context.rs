//! Shared state handed to job handlers

use crate::db::SignalDatabase;
use crate::services::market_data::MarketDataProvider;
use crate::signals::engine::SignalEngine;
use std::sync::Arc;

pub struct JobContext {
    pub provider: Arc<dyn MarketDataProvider + Send + Sync>,
    pub database: Arc<SignalDatabase>,
    pub engine: Arc<SignalEngine>,
}

impl JobContext {
    pub fn new(
        provider: Arc<dyn MarketDataProvider + Send + Sync>,
        database: Arc<SignalDatabase>,
        engine: Arc<SignalEngine>,
    ) -> Self {
        Self {
            provider,
            database,
            engine,
        }
    }
}
