// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! benchdiff Core Library
//!
//! Parses the summary a load generator prints at the end of a benchmark run,
//! diffs a baseline run (sidecar proxy) against a candidate run (eBPF data
//! plane), and renders the comparison as text or JSON.

pub mod config;
pub mod diff;
pub mod error;
pub mod parser;
pub mod report;
pub mod stats;
pub mod types;
pub mod units;

// Re-export commonly used types
pub use config::{ConfigLoader, ReportConfig};
pub use diff::{delta, percent_change, DeltaRecord};
pub use error::{BenchDiffError, BenchDiffResult};
pub use parser::{parse, parse_bytes, parse_str};
pub use report::{report, ComparisonReport, OutputFormat};
pub use stats::{percentile, LoadSummary};
pub use types::{BenchmarkRecord, FieldKind, Metric, Reading};
