// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Tests for the `parse-bench` and `bench-load` binaries.

use std::path::PathBuf;
use std::process::{Command, Output};

use tempfile::TempDir;

const SIDECAR_LOG: &str = "Samples: 1000\nRPS: 200.0\np50: 10ms\np95: 25ms\np99: 50ms\n";
const EBPF_LOG: &str = "Samples: 1000\nRPS: 300.0\np50: 8ms\np95: 20ms\np99: 40ms\n";

fn parse_bench(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_parse-bench"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to run parse-bench")
}

fn write_logs(dir: &TempDir) -> (PathBuf, PathBuf) {
    let sidecar = dir.path().join("sidecar.txt");
    let ebpf = dir.path().join("ebpf.txt");
    std::fs::write(&sidecar, SIDECAR_LOG).expect("Failed to write sidecar log");
    std::fs::write(&ebpf, EBPF_LOG).expect("Failed to write eBPF log");
    (sidecar, ebpf)
}

#[test]
fn test_missing_arguments_exit_code() {
    let output = parse_bench(&["only-one.txt"]);
    assert_eq!(output.status.code(), Some(2));

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Usage"), "stdout: {}", stdout);

    let output = parse_bench(&[]);
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_human_report() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let (sidecar, ebpf) = write_logs(&temp_dir);

    let output = parse_bench(&[sidecar.to_str().unwrap(), ebpf.to_str().unwrap()]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("=== Sidecar ==="));
    assert!(stdout.contains("RPS change: +50.00%"));
    assert!(stdout.contains("p50 latency change: -20.00% (ms)"));
}

fn assert_json_report(output: &Output) {
    assert!(output.status.success(), "status: {:?}", output.status);

    let value: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout is valid JSON");
    assert_eq!(value["sidecar"]["rps"], 200.0);
    assert_eq!(value["ebpf"]["p99"], 40.0);
    assert_eq!(value["delta"]["rps"], 100.0);
    assert_eq!(value["delta"]["samples"], 0);
}

#[test]
fn test_json_flag_anywhere() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let (sidecar, ebpf) = write_logs(&temp_dir);
    let (sidecar, ebpf) = (sidecar.to_str().unwrap(), ebpf.to_str().unwrap());

    assert_json_report(&parse_bench(&["--json", sidecar, ebpf]));
    assert_json_report(&parse_bench(&[sidecar, "--json", ebpf]));
    assert_json_report(&parse_bench(&[sidecar, ebpf, "--json"]));
}

#[test]
fn test_extra_arguments_are_ignored() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let (sidecar, ebpf) = write_logs(&temp_dir);
    let (sidecar, ebpf) = (sidecar.to_str().unwrap(), ebpf.to_str().unwrap());

    let output = parse_bench(&[sidecar, ebpf, "extra", "--foo"]);
    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("=== eBPF ===\n"), "stdout: {}", stdout);
    assert!(stdout.contains("RPS change: +50.00%"));

    // The JSON switch still counts when it trails the ignored arguments.
    assert_json_report(&parse_bench(&[sidecar, ebpf, "extra", "--json"]));
}

#[test]
fn test_custom_labels_from_config() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let (sidecar, ebpf) = write_logs(&temp_dir);
    let config = temp_dir.path().join("benchdiff.yaml");
    std::fs::write(&config, "report:\n  baseline_label: Istio\n  candidate_label: Cilium\n")
        .expect("Failed to write config");

    let output = parse_bench(&[
        "--config",
        config.to_str().unwrap(),
        sidecar.to_str().unwrap(),
        ebpf.to_str().unwrap(),
    ]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("=== Delta (Cilium - Istio) ==="));
}

#[test]
fn test_unreadable_file_fails() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let (sidecar, _) = write_logs(&temp_dir);
    let missing = temp_dir.path().join("missing.txt");

    let output = parse_bench(&[sidecar.to_str().unwrap(), missing.to_str().unwrap()]);
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("missing.txt"));
}

#[test]
fn test_bench_load_rejects_invalid_url() {
    let output = Command::new(env!("CARGO_BIN_EXE_bench-load"))
        .args(["--url", "not a url", "--dur", "10ms"])
        .output()
        .expect("Failed to run bench-load");

    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("invalid url"));
}

#[test]
fn test_bench_load_rejects_dangling_duration_segment() {
    let output = Command::new(env!("CARGO_BIN_EXE_bench-load"))
        .args(["--url", "http://127.0.0.1:9/ping", "--dur", "1m30"])
        .output()
        .expect("Failed to run bench-load");

    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("1m30"));
}
