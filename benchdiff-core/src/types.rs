// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Record types shared by the parser, differ and reporter.
//!
//! A [`BenchmarkRecord`] holds the five metrics a benchmark log can report.
//! Each metric is independently optional: `None` means the line was never
//! seen, which is not the same as a reported zero.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{BenchDiffError, BenchDiffResult};
use crate::units;

/// The fixed set of labels recognized in a benchmark log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    Samples,
    Rps,
    P50,
    P95,
    P99,
}

impl Metric {
    /// All metrics in log order.
    pub const ALL: [Metric; 5] = [
        Metric::Samples,
        Metric::Rps,
        Metric::P50,
        Metric::P95,
        Metric::P99,
    ];

    /// Latency percentiles, in reporting order.
    pub const PERCENTILES: [Metric; 3] = [Metric::P50, Metric::P95, Metric::P99];

    /// Label as written at the start of a log line, without the colon.
    pub fn label(self) -> &'static str {
        match self {
            Metric::Samples => "Samples",
            Metric::Rps => "RPS",
            Metric::P50 => "p50",
            Metric::P95 => "p95",
            Metric::P99 => "p99",
        }
    }

    /// Field name used in records and JSON output.
    pub fn key(self) -> &'static str {
        match self {
            Metric::Samples => "samples",
            Metric::Rps => "rps",
            Metric::P50 => "p50",
            Metric::P95 => "p95",
            Metric::P99 => "p99",
        }
    }

    /// How the captured token of this metric is converted.
    pub fn kind(self) -> FieldKind {
        match self {
            Metric::Samples => FieldKind::Count,
            Metric::Rps => FieldKind::Rate,
            Metric::P50 | Metric::P95 | Metric::P99 => FieldKind::Duration,
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Value shape of a metric field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Whole number of requests.
    Count,
    /// Requests per second.
    Rate,
    /// Latency token with an optional unit suffix, normalized to milliseconds.
    Duration,
}

impl FieldKind {
    /// Convert a captured token into a typed reading.
    pub fn convert(self, metric: Metric, token: &str) -> BenchDiffResult<Reading> {
        match self {
            FieldKind::Count => token
                .parse::<i64>()
                .map(Reading::Count)
                .map_err(|e| BenchDiffError::InvalidNumber {
                    metric,
                    token: token.to_string(),
                    reason: e.to_string(),
                }),
            FieldKind::Rate => {
                let value = token
                    .parse::<f64>()
                    .map_err(|e| BenchDiffError::InvalidNumber {
                        metric,
                        token: token.to_string(),
                        reason: e.to_string(),
                    })?;
                finite(metric, token, value).map(Reading::Rate)
            }
            FieldKind::Duration => {
                let value = units::to_ms(token).map_err(|e| BenchDiffError::InvalidNumber {
                    metric,
                    token: token.to_string(),
                    reason: e.to_string(),
                })?;
                finite(metric, token, value).map(Reading::Millis)
            }
        }
    }
}

fn finite(metric: Metric, token: &str, value: f64) -> BenchDiffResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(BenchDiffError::NonFinite {
            metric,
            token: token.to_string(),
        })
    }
}

/// A converted metric value, tagged with its kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Reading {
    Count(i64),
    Rate(f64),
    Millis(f64),
}

/// Metrics extracted from one benchmark log.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkRecord {
    /// Number of completed requests
    pub samples: Option<i64>,
    /// Requests per second
    pub rps: Option<f64>,
    /// Median latency in milliseconds
    pub p50: Option<f64>,
    /// 95th percentile latency in milliseconds
    pub p95: Option<f64>,
    /// 99th percentile latency in milliseconds
    pub p99: Option<f64>,
}

impl BenchmarkRecord {
    /// Store a reading, replacing any earlier value for the same metric.
    pub(crate) fn set(&mut self, metric: Metric, reading: Reading) {
        match (metric, reading) {
            (Metric::Samples, Reading::Count(v)) => self.samples = Some(v),
            (Metric::Rps, Reading::Rate(v)) => self.rps = Some(v),
            (Metric::P50, Reading::Millis(v)) => self.p50 = Some(v),
            (Metric::P95, Reading::Millis(v)) => self.p95 = Some(v),
            (Metric::P99, Reading::Millis(v)) => self.p99 = Some(v),
            (metric, reading) => {
                tracing::warn!(%metric, ?reading, "Reading kind does not match metric, ignored");
            }
        }
    }

    /// Value of a floating-point metric (`rps` or a percentile).
    ///
    /// `samples` is an integer count and is never read through this accessor.
    pub fn float(&self, metric: Metric) -> Option<f64> {
        match metric {
            Metric::Samples => None,
            Metric::Rps => self.rps,
            Metric::P50 => self.p50,
            Metric::P95 => self.p95,
            Metric::P99 => self.p99,
        }
    }

    /// True when no metric was found at all.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
