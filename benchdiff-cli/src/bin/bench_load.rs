// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! HTTP load generator printing a summary `parse-bench` can read.

use std::time::Duration;

use benchdiff_cli::loadgen::DEFAULT_REQUEST_TIMEOUT;
use benchdiff_cli::{LoadConfig, LoadGenerator};
use benchdiff_core::units::parse_duration;
use clap::Parser;
use reqwest::Url;

#[derive(Parser)]
#[command(name = "bench-load")]
#[command(version, about = "Generate HTTP load and print latency percentiles")]
struct Args {
    /// Target URL
    #[arg(long, default_value = "http://app:8080/ping")]
    url: String,

    /// Number of concurrent workers
    #[arg(long, default_value_t = 32)]
    conns: usize,

    /// Run duration (e.g. 10s, 500ms, 1m30s)
    #[arg(long, default_value = "10s", value_parser = parse_duration)]
    dur: Duration,

    /// Global QPS limit (0 = unlimited)
    #[arg(long, default_value_t = 0)]
    qps: u64,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let url = match Url::parse(&args.url) {
        Ok(url) => url,
        Err(e) => {
            eprintln!("invalid url: {}", e);
            std::process::exit(2);
        }
    };

    benchdiff_cli::logging::init(args.verbose);

    let generator = LoadGenerator::new(LoadConfig {
        url,
        conns: args.conns,
        duration: args.dur,
        qps: args.qps,
        request_timeout: DEFAULT_REQUEST_TIMEOUT,
    })?;

    match generator.run().await? {
        Some(summary) => println!("{}", summary),
        None => println!("no samples collected"),
    }

    Ok(())
}
