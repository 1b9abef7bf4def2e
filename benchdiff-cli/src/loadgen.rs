// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! HTTP load generator.
//!
//! Hammers a single URL with a fixed number of concurrent workers for a fixed
//! duration, optionally capped by a global request rate, and summarizes the
//! observed latencies. Failed requests are timed and counted like successful
//! ones: the run measures what a client sees, errors included.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use reqwest::{Client, Url};
use thiserror::Error;
use tokio::sync::{watch, Mutex};
use tokio::task::JoinSet;
use tokio::time::{Interval, MissedTickBehavior};

use benchdiff_core::LoadSummary;

/// Default per-request timeout.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Errors from setting up or running a load run.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),

    #[error("Load worker failed: {0}")]
    Worker(#[from] tokio::task::JoinError),
}

/// Parameters of a load run.
#[derive(Debug, Clone)]
pub struct LoadConfig {
    /// Target URL
    pub url: Url,
    /// Number of concurrent workers
    pub conns: usize,
    /// How long workers keep issuing requests
    pub duration: Duration,
    /// Global request rate limit, 0 = unlimited
    pub qps: u64,
    /// Per-request timeout
    pub request_timeout: Duration,
}

/// State shared by all workers of one run.
struct Shared {
    client: Client,
    url: Url,
    ticker: Option<Mutex<Interval>>,
    latencies: Mutex<Vec<Duration>>,
    completed: AtomicU64,
}

/// Load generator for one target.
pub struct LoadGenerator {
    config: LoadConfig,
    client: Client,
}

impl LoadGenerator {
    /// Create a load generator with its own HTTP client.
    pub fn new(config: LoadConfig) -> Result<Self, LoadError> {
        let client = Client::builder().timeout(config.request_timeout).build()?;
        Ok(Self { config, client })
    }

    /// Run the load and summarize it.
    ///
    /// Returns `None` when no request completed at all.
    pub async fn run(&self) -> Result<Option<LoadSummary>, LoadError> {
        let config = &self.config;
        tracing::info!(
            url = %config.url,
            conns = config.conns,
            duration_ms = config.duration.as_millis() as u64,
            qps = config.qps,
            "Starting load run"
        );

        let ticker = (config.qps > 0).then(|| {
            let period = Duration::from_secs(1) / u32::try_from(config.qps).unwrap_or(u32::MAX);
            let mut interval = tokio::time::interval(period.max(Duration::from_nanos(1)));
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            Mutex::new(interval)
        });

        let shared = Arc::new(Shared {
            client: self.client.clone(),
            url: config.url.clone(),
            ticker,
            latencies: Mutex::new(Vec::with_capacity(100_000)),
            completed: AtomicU64::new(0),
        });

        let (stop_tx, stop_rx) = watch::channel(false);
        let mut workers = JoinSet::new();
        for worker_id in 0..config.conns {
            workers.spawn(worker(worker_id, Arc::clone(&shared), stop_rx.clone()));
        }

        tokio::time::sleep(config.duration).await;
        // Receivers are held by the workers, so a send error only means none are left.
        let _ = stop_tx.send(true);

        while let Some(result) = workers.join_next().await {
            result?;
        }

        let completed = shared.completed.load(Ordering::Relaxed);
        let latencies = std::mem::take(&mut *shared.latencies.lock().await);
        tracing::info!(completed, "Load run finished");

        Ok(LoadSummary::from_latencies(
            latencies,
            completed,
            config.duration,
        ))
    }
}

async fn worker(worker_id: usize, shared: Arc<Shared>, mut stop: watch::Receiver<bool>) {
    loop {
        if *stop.borrow() {
            break;
        }

        if let Some(ticker) = &shared.ticker {
            tokio::select! {
                _ = stop.changed() => break,
                _ = async { ticker.lock().await.tick().await } => {}
            }
        }

        let start = Instant::now();
        match shared.client.get(shared.url.clone()).send().await {
            Ok(response) => {
                // Drain the body so the connection can be reused.
                if let Err(e) = response.bytes().await {
                    tracing::debug!(worker_id, error = %e, "Failed to read response body");
                }
            }
            Err(e) => tracing::debug!(worker_id, error = %e, "Request failed"),
        }
        let latency = start.elapsed();

        shared.latencies.lock().await.push(latency);
        shared.completed.fetch_add(1, Ordering::Relaxed);
    }
}
