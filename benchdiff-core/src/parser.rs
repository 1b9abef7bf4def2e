// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Benchmark log parser.
//!
//! Scans a log line by line and picks out the five metric lines the load
//! generator prints:
//!
//! ```text
//! Samples: 1000
//! RPS: 200.00
//! p50: 10ms
//! p95: 25ms
//! p99: 50ms
//! ```
//!
//! Everything else is ignored. When a label occurs more than once the last
//! occurrence wins.

use std::path::Path;

use lazy_static::lazy_static;
use regex::Regex;

use crate::error::{BenchDiffError, BenchDiffResult};
use crate::types::{BenchmarkRecord, FieldKind, Metric};

lazy_static! {
    /// Label matchers, one per metric, built once per process.
    static ref PATTERNS: Vec<(Metric, Regex)> = Metric::ALL
        .iter()
        .map(|&metric| {
            let regex = Regex::new(&pattern_for(metric)).expect("metric pattern is a valid regex");
            (metric, regex)
        })
        .collect();
}

/// Anchored pattern for a metric line; group 1 captures the value token.
fn pattern_for(metric: Metric) -> String {
    let token = match metric.kind() {
        FieldKind::Count => r"[0-9]+",
        FieldKind::Rate => r"[0-9.]+",
        FieldKind::Duration => r"[0-9.a-z\x{00b5}\x{03bc}]+",
    };
    format!(r"^{}:\s+({})", regex::escape(metric.label()), token)
}

/// Parse the benchmark log at `path`.
pub fn parse(path: impl AsRef<Path>) -> BenchDiffResult<BenchmarkRecord> {
    let path = path.as_ref();
    tracing::debug!(path = %path.display(), "Parsing benchmark log");

    let bytes = std::fs::read(path).map_err(|e| BenchDiffError::Io {
        context: "reading benchmark log",
        path: path.to_path_buf(),
        source: e,
    })?;

    parse_bytes(&bytes)
}

/// Parse raw log bytes. Invalid UTF-8 sequences are dropped.
pub fn parse_bytes(bytes: &[u8]) -> BenchDiffResult<BenchmarkRecord> {
    let mut text = String::with_capacity(bytes.len());
    let mut dropped = 0usize;
    for chunk in bytes.utf8_chunks() {
        text.push_str(chunk.valid());
        dropped += chunk.invalid().len();
    }
    if dropped > 0 {
        tracing::debug!(dropped, "Skipped malformed bytes in benchmark log");
    }

    parse_str(&text)
}

/// Parse log text already in memory.
pub fn parse_str(text: &str) -> BenchDiffResult<BenchmarkRecord> {
    let mut record = BenchmarkRecord::default();

    for (index, line) in text.split(['\r', '\n']).enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let Some((metric, token)) = PATTERNS.iter().find_map(|(metric, regex)| {
            regex
                .captures(line)
                .and_then(|caps| caps.get(1))
                .map(|m| (*metric, m.as_str()))
        }) else {
            continue;
        };

        let reading = metric.kind().convert(metric, token)?;
        tracing::trace!(line = index + 1, %metric, token, "Matched metric line");
        record.set(metric, reading);
    }

    Ok(record)
}
