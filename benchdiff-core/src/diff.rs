// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Field-wise difference between a baseline and a candidate record.

use serde::{Deserialize, Serialize};

use crate::types::{BenchmarkRecord, Metric};

/// `candidate - baseline` for every metric.
///
/// A field is `None` whenever either side lacks it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DeltaRecord {
    pub rps: Option<f64>,
    pub p50: Option<f64>,
    pub p95: Option<f64>,
    pub p99: Option<f64>,
    pub samples: Option<i64>,
}

impl DeltaRecord {
    /// Delta of a floating-point metric.
    pub fn float(&self, metric: Metric) -> Option<f64> {
        match metric {
            Metric::Samples => None,
            Metric::Rps => self.rps,
            Metric::P50 => self.p50,
            Metric::P95 => self.p95,
            Metric::P99 => self.p99,
        }
    }
}

/// Compute the delta between two records.
pub fn delta(baseline: &BenchmarkRecord, candidate: &BenchmarkRecord) -> DeltaRecord {
    let float = |metric| match (baseline.float(metric), candidate.float(metric)) {
        (Some(a), Some(b)) => Some(b - a),
        _ => None,
    };

    DeltaRecord {
        rps: float(Metric::Rps),
        p50: float(Metric::P50),
        p95: float(Metric::P95),
        p99: float(Metric::P99),
        samples: match (baseline.samples, candidate.samples) {
            (Some(a), Some(b)) => b.checked_sub(a),
            _ => None,
        },
    }
}

/// Relative change of `candidate` against `baseline`, in percent.
///
/// `None` unless both values are present and non-zero, so a zero baseline
/// never reaches the division.
pub fn percent_change(baseline: Option<f64>, candidate: Option<f64>) -> Option<f64> {
    match (baseline, candidate) {
        (Some(a), Some(b)) if a != 0.0 && b != 0.0 => Some((b - a) / a * 100.0),
        _ => None,
    }
}
