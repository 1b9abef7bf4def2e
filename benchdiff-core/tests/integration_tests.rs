// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! End-to-end tests for the parse, diff and report pipeline.
//!
//! These tests write real benchmark logs to disk and run them through the
//! public API the `parse-bench` binary uses.

use std::path::PathBuf;

use benchdiff_core::{
    delta, parse, BenchDiffError, ComparisonReport, OutputFormat, ReportConfig,
};
use tempfile::TempDir;

const SIDECAR_LOG: &str = "\
Samples: 1000
RPS: 200.0
p50: 10ms
p95: 25ms
p99: 50ms
";

const EBPF_LOG: &str = "\
Samples: 1000
RPS: 300.0
p50: 8ms
p95: 20ms
p99: 40ms
";

fn write_log(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).expect("Failed to write benchmark log");
    path
}

#[test]
fn test_sidecar_vs_ebpf_end_to_end() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let sidecar = parse(write_log(&temp_dir, "sidecar.txt", SIDECAR_LOG)).unwrap();
    let ebpf = parse(write_log(&temp_dir, "ebpf.txt", EBPF_LOG)).unwrap();

    let d = delta(&sidecar, &ebpf);
    assert_eq!(d.rps, Some(100.0));
    assert_eq!(d.p50, Some(-2.0));
    assert_eq!(d.p95, Some(-5.0));
    assert_eq!(d.p99, Some(-10.0));
    assert_eq!(d.samples, Some(0));

    let text = ComparisonReport::new(sidecar, ebpf)
        .render(OutputFormat::Human, &ReportConfig::default())
        .unwrap();
    assert!(text.contains("RPS change: +50.00%"));
    assert!(text.contains("p50 latency change: -20.00% (ms)"));
}

#[test]
fn test_json_output_parses_back() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let sidecar = parse(write_log(&temp_dir, "sidecar.txt", SIDECAR_LOG)).unwrap();
    let ebpf = parse(write_log(&temp_dir, "ebpf.txt", "RPS: 310.5\np99: 2.5s\n")).unwrap();

    let report = ComparisonReport::new(sidecar, ebpf);
    let json = report
        .render(OutputFormat::Json, &ReportConfig::default())
        .unwrap();

    let parsed: ComparisonReport = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed.sidecar, sidecar);
    assert_eq!(parsed.ebpf, ebpf);
    assert_eq!(parsed.delta, report.delta);
    assert_eq!(parsed.delta.p99, Some(2450.0));
    assert_eq!(parsed.delta.samples, None);
}

#[test]
fn test_noisy_log_with_repeated_labels() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log = "\
warmup...
RPS: 10.0
Samples: 5
--- final ---
RPS: 250.25
Samples: 5000
p50: 1.2ms
p95: 4.8ms
p99: 900\u{00b5}s
";
    let record = parse(write_log(&temp_dir, "run.txt", log)).unwrap();
    assert_eq!(record.rps, Some(250.25));
    assert_eq!(record.samples, Some(5000));
    assert_eq!(record.p99, Some(0.9));
}

#[test]
fn test_malformed_value_aborts_parse() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = write_log(&temp_dir, "bad.txt", "Samples: 10\np50: 1..2ms\n");
    assert!(matches!(
        parse(path),
        Err(BenchDiffError::InvalidNumber { .. })
    ));
}
