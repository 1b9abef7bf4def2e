// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Logging setup shared by the binaries.

use tracing_subscriber::EnvFilter;

/// Initialize the tracing subscriber.
///
/// Logs go to stderr: stdout carries the report or benchmark summary and must
/// stay machine-readable. `RUST_LOG` overrides the level picked by `verbose`.
pub fn init(verbose: bool) {
    let log_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
