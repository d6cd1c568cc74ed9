//! PostgreSQL persistence for candles and signal records

use crate::config;
use crate::models::candle::Candle;
use crate::models::signal::SignalRecord;
use std::fmt::Display;
use tokio_postgres::{Client, NoTls};
use tracing::error;

type DbError = Box<dyn std::error::Error + Send + Sync>;

fn db_error(context: &str, err: impl Display) -> DbError {
    Box::new(std::io::Error::other(format!("{}: {}", context, err)))
}

pub struct SignalDatabase {
    client: Client,
}

impl SignalDatabase {
    pub async fn new() -> Result<Self, DbError> {
        let database_url = config::get_database_url();
        let (client, connection) = tokio_postgres::connect(&database_url, NoTls)
            .await
            .map_err(|e| db_error("Failed to connect to Postgres", e))?;

        // Drive the connection until it closes
        tokio::spawn(async move {
            if let Err(e) = connection.await {
                error!(error = %e, "Postgres connection error");
            }
        });

        let db = Self { client };
        db.init_schema().await?;

        Ok(db)
    }

    async fn init_schema(&self) -> Result<(), DbError> {
        self.client
            .execute(
                "CREATE TABLE IF NOT EXISTS candles (
                    id BIGSERIAL PRIMARY KEY,
                    timestamp BIGINT NOT NULL,
                    exchange TEXT NOT NULL,
                    symbol TEXT NOT NULL,
                    interval TEXT NOT NULL,
                    open DOUBLE PRECISION NOT NULL,
                    high DOUBLE PRECISION NOT NULL,
                    low DOUBLE PRECISION NOT NULL,
                    close DOUBLE PRECISION NOT NULL,
                    volume DOUBLE PRECISION NOT NULL,
                    UNIQUE (timestamp, exchange, symbol, interval)
                )",
                &[],
            )
            .await
            .map_err(|e| db_error("Failed to create candles table", e))?;

        self.client
            .execute(
                "CREATE TABLE IF NOT EXISTS signals (
                    id BIGSERIAL PRIMARY KEY,
                    timestamp BIGINT NOT NULL,
                    exchange TEXT NOT NULL,
                    symbol TEXT NOT NULL,
                    timeframe TEXT NOT NULL,
                    signal_type TEXT NOT NULL,
                    pattern_detected TEXT,
                    rsi DOUBLE PRECISION,
                    macd_histogram DOUBLE PRECISION,
                    ema_cross TEXT,
                    reason TEXT NOT NULL,
                    confidence INTEGER,
                    UNIQUE (timestamp, exchange, symbol, timeframe)
                )",
                &[],
            )
            .await
            .map_err(|e| db_error("Failed to create signals table", e))?;

        Ok(())
    }

    /// Insert candles, ignoring rows already present for the
    /// (timestamp, exchange, symbol, interval) key. Returns the number
    /// of rows actually inserted.
    pub async fn store_candles(
        &self,
        exchange: &str,
        pair: &str,
        interval: &str,
        candles: &[Candle],
    ) -> Result<u64, DbError> {
        let statement = self
            .client
            .prepare(
                "INSERT INTO candles
                    (timestamp, exchange, symbol, interval, open, high, low, close, volume)
                 VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
                 ON CONFLICT (timestamp, exchange, symbol, interval) DO NOTHING",
            )
            .await
            .map_err(|e| db_error("Failed to prepare candle insert", e))?;

        let mut inserted = 0;
        for candle in candles {
            inserted += self
                .client
                .execute(
                    &statement,
                    &[
                        &candle.timestamp,
                        &exchange,
                        &pair,
                        &interval,
                        &candle.open,
                        &candle.high,
                        &candle.low,
                        &candle.close,
                        &candle.volume,
                    ],
                )
                .await
                .map_err(|e| db_error("Failed to insert candle", e))?;
        }

        Ok(inserted)
    }

    /// The most recent `limit` candles in ascending timestamp order.
    pub async fn get_candles(
        &self,
        exchange: &str,
        pair: &str,
        interval: &str,
        limit: i64,
    ) -> Result<Vec<Candle>, DbError> {
        let rows = self
            .client
            .query(
                "SELECT timestamp, open, high, low, close, volume
                 FROM candles
                 WHERE exchange = $1 AND symbol = $2 AND interval = $3
                 ORDER BY timestamp DESC
                 LIMIT $4",
                &[&exchange, &pair, &interval, &limit],
            )
            .await
            .map_err(|e| db_error("Failed to load candles", e))?;

        let mut candles: Vec<Candle> = rows
            .iter()
            .map(|row| {
                Candle::new(
                    row.get(0),
                    row.get(1),
                    row.get(2),
                    row.get(3),
                    row.get(4),
                    row.get(5),
                )
            })
            .collect();
        candles.reverse();

        Ok(candles)
    }

    /// Insert signal records, deduplicating on the
    /// (timestamp, exchange, symbol, timeframe) key.
    pub async fn store_signals(
        &self,
        exchange: &str,
        pair: &str,
        timeframe: &str,
        signals: &[SignalRecord],
    ) -> Result<u64, DbError> {
        let statement = self
            .client
            .prepare(
                "INSERT INTO signals
                    (timestamp, exchange, symbol, timeframe, signal_type, pattern_detected,
                     rsi, macd_histogram, ema_cross, reason, confidence)
                 VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
                 ON CONFLICT (timestamp, exchange, symbol, timeframe) DO NOTHING",
            )
            .await
            .map_err(|e| db_error("Failed to prepare signal insert", e))?;

        let mut inserted = 0;
        for signal in signals {
            inserted += self
                .client
                .execute(
                    &statement,
                    &[
                        &signal.timestamp,
                        &exchange,
                        &pair,
                        &timeframe,
                        &signal.signal_type.to_string(),
                        &signal.pattern_detected.map(|p| p.to_string()),
                        &signal.rsi,
                        &signal.macd_histogram,
                        &signal.ema_cross.map(|c| c.to_string()),
                        &signal.reason.join(", "),
                        &signal.confidence.map(i32::from),
                    ],
                )
                .await
                .map_err(|e| db_error("Failed to insert signal", e))?;
        }

        Ok(inserted)
    }
}
