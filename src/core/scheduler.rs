//! Cron-based scheduler enqueuing fetch jobs for every tracked pair

use crate::jobs::types::FetchCandlesJob;
use apalis::prelude::*;
use apalis_redis::RedisStorage;
use cron::Schedule;
use std::str::FromStr;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, error, info};

/// Periodically pushes a FetchCandlesJob per pair onto the queue.
pub struct PollScheduler {
    storage: Arc<RedisStorage<FetchCandlesJob>>,
    pairs: Vec<String>,
    interval: String,
    schedule: Schedule,
    handle: Arc<RwLock<Option<tokio::task::JoinHandle<()>>>>,
}

impl PollScheduler {
    /// Build a scheduler firing every `poll_seconds` for the given
    /// pairs; `interval` is the candle interval passed to fetch jobs.
    pub fn new(
        storage: Arc<RedisStorage<FetchCandlesJob>>,
        pairs: Vec<String>,
        interval: String,
        poll_seconds: u64,
    ) -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        if poll_seconds == 0 {
            return Err("Scheduler disabled: poll_seconds is 0".into());
        }

        // Cron format: second minute hour day month weekday
        let cron_expr = if poll_seconds >= 60 {
            format!("0 */{} * * * *", poll_seconds / 60)
        } else {
            format!("*/{} * * * * *", poll_seconds)
        };

        let schedule = Schedule::from_str(&cron_expr).map_err(|e| {
            Box::new(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("Invalid cron expression '{}': {}", cron_expr, e),
            )) as Box<dyn std::error::Error + Send + Sync>
        })?;

        info!(
            poll_seconds = poll_seconds,
            cron = %cron_expr,
            pairs = ?pairs,
            "PollScheduler: created with interval {}s (cron: {})",
            poll_seconds,
            cron_expr
        );

        Ok(Self {
            storage,
            pairs,
            interval,
            schedule,
            handle: Arc::new(RwLock::new(None)),
        })
    }

    pub async fn start(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let storage = self.storage.clone();
        let pairs = self.pairs.clone();
        let interval = self.interval.clone();
        let schedule = self.schedule.clone();
        let handle_slot = self.handle.clone();

        let handle = tokio::spawn(async move {
            info!("PollScheduler: started, waiting for cron schedule...");

            loop {
                let mut upcoming = schedule.upcoming(chrono::Utc);
                if let Some(next_tick) = upcoming.next() {
                    let now = chrono::Utc::now();
                    if next_tick > now {
                        let duration = (next_tick - now).to_std().unwrap_or_default();
                        tokio::time::sleep(duration).await;
                    }
                } else {
                    tokio::time::sleep(tokio::time::Duration::from_secs(60)).await;
                    continue;
                }

                info!(
                    pair_count = pairs.len(),
                    "PollScheduler: cron tick, enqueuing FetchCandlesJob for {} pairs",
                    pairs.len()
                );

                for pair in &pairs {
                    let job = FetchCandlesJob {
                        pair: pair.clone(),
                        interval: interval.clone(),
                    };

                    let mut storage = (*storage).clone();
                    match storage.push(job).await {
                        Ok(_) => {
                            debug!(pair = %pair, "PollScheduler: enqueued FetchCandlesJob for {}", pair);
                        }
                        Err(e) => {
                            error!(
                                pair = %pair,
                                error = %e,
                                "PollScheduler: failed to enqueue FetchCandlesJob for {}",
                                pair
                            );
                        }
                    }
                }
            }
        });

        {
            let mut slot = handle_slot.write().await;
            *slot = Some(handle);
        }

        info!("PollScheduler: started successfully");
        Ok(())
    }

    pub async fn stop(&self) {
        let mut handle = self.handle.write().await;
        if let Some(h) = handle.take() {
            h.abort();
            info!("PollScheduler: stopped");
        }
    }
}
