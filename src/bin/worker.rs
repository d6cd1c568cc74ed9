//! Candlescope Worker
//!
//! Polls the exchange for every tracked pair, runs the signal engine
//! over the stored history and persists the resulting records. Jobs
//! flow through a Redis-backed queue so multiple instances can share
//! the load.

use candlescope::config;
use candlescope::core::runtime::PipelineRuntime;
use candlescope::core::scheduler::PollScheduler;
use candlescope::db::SignalDatabase;
use candlescope::jobs::context::JobContext;
use candlescope::jobs::types::{AnalyzeSignalsJob, FetchCandlesJob, StoreSignalsJob};
use candlescope::logging;
use candlescope::services::coinbase::CoinbaseMarketDataProvider;
use candlescope::services::market_data::MarketDataProvider;
use candlescope::signals::engine::SignalEngine;
use apalis_redis::RedisStorage;
use dotenvy::dotenv;
use std::sync::Arc;
use tokio::signal;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    logging::init_logging();

    let env = config::get_environment();
    info!("Starting Candlescope Worker");
    info!(environment = %env, "Environment");

    let pairs = config::get_tracked_pairs();
    let interval = config::get_candle_interval();
    let poll_seconds = config::get_poll_interval_seconds();

    if pairs.is_empty() {
        return Err("TRACKED_PAIRS resolved to an empty list".into());
    }
    info!(pairs = ?pairs, interval = %interval, "Tracking {} pairs at interval {}", pairs.len(), interval);
    info!(poll_seconds = poll_seconds, "Polling every {} seconds", poll_seconds);

    info!("Initializing Postgres connection...");
    let database = match SignalDatabase::new().await {
        Ok(db) => {
            info!("Postgres connected");
            Arc::new(db)
        }
        Err(e) => {
            warn!(error = %e, "Failed to connect to Postgres - exiting");
            return Err(format!("Postgres connection required for worker: {}", e).into());
        }
    };

    let provider: Arc<dyn MarketDataProvider + Send + Sync> =
        Arc::new(CoinbaseMarketDataProvider::new());
    let engine = Arc::new(SignalEngine::default());

    info!("Initializing Apalis Redis storage...");
    let redis_url = config::get_redis_url();
    let conn = apalis_redis::connect(redis_url).await?;
    let fetch_storage: Arc<RedisStorage<FetchCandlesJob>> =
        Arc::new(RedisStorage::new(conn.clone()));
    let analyze_storage: Arc<RedisStorage<AnalyzeSignalsJob>> =
        Arc::new(RedisStorage::new(conn.clone()));
    let store_storage: Arc<RedisStorage<StoreSignalsJob>> = Arc::new(RedisStorage::new(conn));
    info!("Apalis Redis storage initialized");

    let job_context = Arc::new(JobContext::new(provider, database, engine));

    info!("Starting pipeline workers...");
    let runtime = PipelineRuntime::new(
        job_context,
        fetch_storage.clone(),
        analyze_storage,
        store_storage,
    );
    let worker_handles = runtime
        .start_workers()
        .await
        .map_err(|e| format!("Failed to start workers: {}", e))?;

    info!("Starting poll scheduler...");
    let scheduler = PollScheduler::new(fetch_storage, pairs, interval, poll_seconds)
        .map_err(|e| format!("Failed to create scheduler: {}", e))?;
    scheduler
        .start()
        .await
        .map_err(|e| format!("Failed to start scheduler: {}", e))?;

    info!("Worker started, waiting for shutdown signal...");
    tokio::select! {
        _ = signal::ctrl_c() => {
            info!("Shutting down worker...");
            scheduler.stop().await;
            for handle in worker_handles {
                handle.abort();
            }
            info!("Worker stopped");
        }
    }

    Ok(())
}
