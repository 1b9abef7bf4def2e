// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Rendering of a baseline/candidate comparison.
//!
//! Two output formats are supported: a human-readable summary with
//! percentage changes, and a pretty-printed JSON document
//! `{ "sidecar": .., "ebpf": .., "delta": .. }`.

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use crate::config::ReportConfig;
use crate::diff::{self, DeltaRecord};
use crate::error::BenchDiffResult;
use crate::types::{BenchmarkRecord, Metric};

/// Output format selected on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Human,
    Json,
}

/// Baseline, candidate and their delta, as serialized with `--json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonReport {
    /// Baseline run
    pub sidecar: BenchmarkRecord,
    /// Candidate run
    pub ebpf: BenchmarkRecord,
    /// `ebpf - sidecar`
    pub delta: DeltaRecord,
}

impl ComparisonReport {
    /// Compare two records.
    pub fn new(baseline: BenchmarkRecord, candidate: BenchmarkRecord) -> Self {
        let delta = diff::delta(&baseline, &candidate);
        Self {
            sidecar: baseline,
            ebpf: candidate,
            delta,
        }
    }

    /// Render in the requested format.
    pub fn render(&self, format: OutputFormat, config: &ReportConfig) -> BenchDiffResult<String> {
        match format {
            OutputFormat::Json => self.to_json(),
            OutputFormat::Human => Ok(self.to_human(config)),
        }
    }

    /// Pretty-printed JSON, two-space indentation, absent fields as `null`.
    pub fn to_json(&self) -> BenchDiffResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Human-readable summary.
    pub fn to_human(&self, config: &ReportConfig) -> String {
        let base = config.baseline_label.as_str();
        let cand = config.candidate_label.as_str();

        let mut out = String::new();
        let _ = writeln!(out, "=== {} ===", base);
        let _ = writeln!(out, "{}", record_line(&self.sidecar));
        let _ = writeln!(out, "=== {} ===", cand);
        let _ = writeln!(out, "{}", record_line(&self.ebpf));
        let _ = writeln!(out, "=== Delta ({} - {}) ===", cand, base);
        let _ = writeln!(out, "{}", delta_line(&self.delta));

        if let Some(change) = diff::percent_change(self.sidecar.rps, self.ebpf.rps) {
            let _ = writeln!(out, "RPS change: {:+.2}%", change);
        }
        for metric in Metric::PERCENTILES {
            if let Some(change) =
                diff::percent_change(self.sidecar.float(metric), self.ebpf.float(metric))
            {
                let _ = writeln!(out, "{} latency change: {:+.2}% (ms)", metric, change);
            }
        }

        out
    }
}

/// Render a comparison of already-diffed records with the default labels.
pub fn report(
    baseline: &BenchmarkRecord,
    candidate: &BenchmarkRecord,
    delta: &DeltaRecord,
    format: OutputFormat,
) -> BenchDiffResult<String> {
    let report = ComparisonReport {
        sidecar: *baseline,
        ebpf: *candidate,
        delta: *delta,
    };
    report.render(format, &ReportConfig::default())
}

fn value<T: std::fmt::Debug>(v: Option<T>) -> String {
    v.map(|v| format!("{:?}", v))
        .unwrap_or_else(|| "n/a".to_string())
}

fn record_line(record: &BenchmarkRecord) -> String {
    format!(
        "samples={} rps={} p50={} p95={} p99={}",
        value(record.samples),
        value(record.rps),
        value(record.p50),
        value(record.p95),
        value(record.p99)
    )
}

fn delta_line(delta: &DeltaRecord) -> String {
    format!(
        "rps={} p50={} p95={} p99={} samples={}",
        value(delta.rps),
        value(delta.p50),
        value(delta.p95),
        value(delta.p99),
        value(delta.samples)
    )
}
