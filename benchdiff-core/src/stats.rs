// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Latency statistics for a load run.
//!
//! [`LoadSummary`] is what the load generator prints at the end of a run. Its
//! `Display` output is exactly the log format [`crate::parser`] reads.

use std::fmt;
use std::time::Duration;

use crate::types::BenchmarkRecord;
use crate::units;

/// Nearest-rank percentile of an ascending-sorted slice.
///
/// Index is `ceil(p / 100 * n) - 1`, clamped into the slice. Returns `None`
/// for an empty slice.
pub fn percentile(sorted: &[Duration], p: f64) -> Option<Duration> {
    if sorted.is_empty() {
        return None;
    }
    let rank = ((p / 100.0) * sorted.len() as f64).ceil() as usize;
    let index = rank.saturating_sub(1).min(sorted.len() - 1);
    Some(sorted[index])
}

/// Summary of a completed load run.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadSummary {
    /// Number of recorded latencies
    pub samples: u64,
    /// Completed requests per second of configured run time
    pub rps: f64,
    pub p50: Duration,
    pub p95: Duration,
    pub p99: Duration,
}

impl LoadSummary {
    /// Summarize a run. Returns `None` when nothing was recorded.
    ///
    /// `completed` is the request counter and `run_time` the configured
    /// duration, so RPS does not include the time spent draining workers.
    pub fn from_latencies(
        mut latencies: Vec<Duration>,
        completed: u64,
        run_time: Duration,
    ) -> Option<Self> {
        if latencies.is_empty() {
            return None;
        }
        latencies.sort_unstable();

        let secs = run_time.as_secs_f64();
        let rps = if secs > 0.0 {
            completed as f64 / secs
        } else {
            0.0
        };

        Some(Self {
            samples: latencies.len() as u64,
            rps,
            p50: percentile(&latencies, 50.0)?,
            p95: percentile(&latencies, 95.0)?,
            p99: percentile(&latencies, 99.0)?,
        })
    }

    /// Metrics as the parser would read them back from the printed log.
    pub fn to_record(&self) -> BenchmarkRecord {
        let ms = |d: Duration| d.as_nanos() as f64 / 1e6;
        BenchmarkRecord {
            samples: i64::try_from(self.samples).ok(),
            rps: Some(self.rps),
            p50: Some(ms(self.p50)),
            p95: Some(ms(self.p95)),
            p99: Some(ms(self.p99)),
        }
    }
}

impl fmt::Display for LoadSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Samples: {}", self.samples)?;
        writeln!(f, "RPS: {:.2}", self.rps)?;
        writeln!(f, "p50: {}", units::format_duration(self.p50))?;
        writeln!(f, "p95: {}", units::format_duration(self.p95))?;
        write!(f, "p99: {}", units::format_duration(self.p99))
    }
}
