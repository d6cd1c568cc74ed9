//! Job handlers for the signal pipeline

use crate::jobs::context::JobContext;
use crate::jobs::types::{AnalyzeSignalsJob, FetchCandlesJob, StoreSignalsJob};
use apalis::prelude::*;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// History window loaded from the database for each analysis run.
const ANALYSIS_WINDOW: i64 = 500;

/// Fetch candles from the exchange and persist them.
///
/// Enqueues AnalyzeSignalsJob once fresh rows are stored.
pub async fn handle_fetch_candles(
    job: FetchCandlesJob,
    ctx: Data<Arc<JobContext>>,
    analyze_storage: Data<apalis_redis::RedisStorage<AnalyzeSignalsJob>>,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    debug!(pair = %job.pair, interval = %job.interval, "FetchCandlesJob: fetching candles for {}", job.pair);

    let candles = ctx.provider.fetch_candles(&job.pair, &job.interval).await?;
    if candles.is_empty() {
        warn!(pair = %job.pair, "FetchCandlesJob: no candles returned for {}", job.pair);
        return Ok(());
    }

    let inserted = ctx
        .database
        .store_candles(ctx.provider.exchange(), &job.pair, &job.interval, &candles)
        .await?;

    debug!(
        pair = %job.pair,
        fetched = candles.len(),
        inserted = inserted,
        "FetchCandlesJob: stored {} new of {} fetched candles for {}",
        inserted,
        candles.len(),
        job.pair
    );

    let next_job = AnalyzeSignalsJob {
        pair: job.pair.clone(),
        interval: job.interval.clone(),
    };
    let mut storage = (*analyze_storage).clone();
    storage.push(next_job).await.map_err(|e| {
        Box::new(std::io::Error::other(format!(
            "Failed to enqueue AnalyzeSignalsJob: {}",
            e
        ))) as Box<dyn std::error::Error + Send + Sync>
    })?;

    Ok(())
}

/// Run the engine over the stored history of a pair.
///
/// Enqueues StoreSignalsJob when any signal events were found. Too
/// little history is a normal outcome and ends the pipeline quietly.
pub async fn handle_analyze_signals(
    job: AnalyzeSignalsJob,
    ctx: Data<Arc<JobContext>>,
    store_storage: Data<apalis_redis::RedisStorage<StoreSignalsJob>>,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let candles = ctx
        .database
        .get_candles(
            ctx.provider.exchange(),
            &job.pair,
            &job.interval,
            ANALYSIS_WINDOW,
        )
        .await?;

    if candles.len() < ctx.engine.min_candles() {
        debug!(
            pair = %job.pair,
            count = candles.len(),
            min = ctx.engine.min_candles(),
            "AnalyzeSignalsJob: not enough history ({} < {}) for {}",
            candles.len(),
            ctx.engine.min_candles(),
            job.pair
        );
        return Ok(());
    }

    let signals = ctx.engine.analyze(&candles);
    if signals.is_empty() {
        debug!(pair = %job.pair, "AnalyzeSignalsJob: no signal events for {}", job.pair);
        return Ok(());
    }

    for signal in &signals {
        info!(
            pair = %job.pair,
            timestamp = signal.timestamp,
            signal_type = %signal.signal_type,
            confidence = ?signal.confidence,
            "AnalyzeSignalsJob: {} {} at {} (confidence: {:?})",
            job.pair,
            signal.signal_type,
            signal.timestamp,
            signal.confidence
        );
    }

    let next_job = StoreSignalsJob {
        pair: job.pair.clone(),
        interval: job.interval.clone(),
        signals,
    };
    let mut storage = (*store_storage).clone();
    storage.push(next_job).await.map_err(|e| {
        Box::new(std::io::Error::other(format!(
            "Failed to enqueue StoreSignalsJob: {}",
            e
        ))) as Box<dyn std::error::Error + Send + Sync>
    })?;

    Ok(())
}

/// Persist signal records. Final step of the pipeline.
pub async fn handle_store_signals(
    job: StoreSignalsJob,
    ctx: Data<Arc<JobContext>>,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let inserted = ctx
        .database
        .store_signals(
            ctx.provider.exchange(),
            &job.pair,
            &job.interval,
            &job.signals,
        )
        .await?;

    info!(
        pair = %job.pair,
        total = job.signals.len(),
        inserted = inserted,
        "StoreSignalsJob: persisted {} new of {} signals for {}",
        inserted,
        job.signals.len(),
        job.pair
    );

    Ok(())
}
