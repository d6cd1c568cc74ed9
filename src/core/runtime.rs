//! Apalis worker setup for the signal pipeline jobs

use crate::jobs::context::JobContext;
use crate::jobs::handlers;
use crate::jobs::types::{AnalyzeSignalsJob, FetchCandlesJob, StoreSignalsJob};
use apalis::prelude::*;
use apalis_redis::RedisStorage;
use std::sync::Arc;
use tracing::info;

/// Pipeline runtime wiring the three workers to their queues.
pub struct PipelineRuntime {
    job_context: Arc<JobContext>,
    fetch_storage: Arc<RedisStorage<FetchCandlesJob>>,
    analyze_storage: Arc<RedisStorage<AnalyzeSignalsJob>>,
    store_storage: Arc<RedisStorage<StoreSignalsJob>>,
}

impl PipelineRuntime {
    pub fn new(
        job_context: Arc<JobContext>,
        fetch_storage: Arc<RedisStorage<FetchCandlesJob>>,
        analyze_storage: Arc<RedisStorage<AnalyzeSignalsJob>>,
        store_storage: Arc<RedisStorage<StoreSignalsJob>>,
    ) -> Self {
        Self {
            job_context,
            fetch_storage,
            analyze_storage,
            store_storage,
        }
    }

    /// Start all workers and return handles for graceful shutdown.
    pub async fn start_workers(
        &self,
    ) -> Result<Vec<tokio::task::JoinHandle<()>>, Box<dyn std::error::Error + Send + Sync>> {
        let mut handles = Vec::new();

        // Worker for FetchCandlesJob
        let fetch_storage = (*self.fetch_storage).clone();
        let analyze_storage = self.analyze_storage.clone();
        let job_context = self.job_context.clone();
        let fetch_handle = tokio::spawn(async move {
            let worker = WorkerBuilder::new("fetch-candles-worker")
                .data(job_context.clone())
                .data(analyze_storage.clone())
                .backend(fetch_storage)
                .build_fn(handlers::handle_fetch_candles);

            info!("PipelineRuntime: FetchCandlesJob worker started");
            worker.run().await;
        });
        handles.push(fetch_handle);

        // Worker for AnalyzeSignalsJob
        let analyze_storage_worker = (*self.analyze_storage).clone();
        let store_storage = self.store_storage.clone();
        let job_context_analyze = self.job_context.clone();
        let analyze_handle = tokio::spawn(async move {
            let worker = WorkerBuilder::new("analyze-signals-worker")
                .data(job_context_analyze.clone())
                .data(store_storage.clone())
                .backend(analyze_storage_worker)
                .build_fn(handlers::handle_analyze_signals);

            info!("PipelineRuntime: AnalyzeSignalsJob worker started");
            worker.run().await;
        });
        handles.push(analyze_handle);

        // Worker for StoreSignalsJob
        let store_storage_worker = (*self.store_storage).clone();
        let job_context_store = self.job_context.clone();
        let store_handle = tokio::spawn(async move {
            let worker = WorkerBuilder::new("store-signals-worker")
                .data(job_context_store.clone())
                .backend(store_storage_worker)
                .build_fn(handlers::handle_store_signals);

            info!("PipelineRuntime: StoreSignalsJob worker started");
            worker.run().await;
        });
        handles.push(store_handle);

        Ok(handles)
    }
}
