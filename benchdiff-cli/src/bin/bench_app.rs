// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Benchmark target service `bench-load` runs against.

use std::path::PathBuf;

use benchdiff_cli::app::{self, AccessLog, AppState};
use clap::Parser;
use tokio::net::TcpListener;

#[derive(Parser)]
#[command(name = "bench-app")]
#[command(version, about = "HTTP app serving /ping, /work and /metrics")]
struct Args {
    /// Listen address
    #[arg(long, default_value = "0.0.0.0:8080")]
    addr: String,

    /// Append JSON access log lines to this file as well as stdout
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    benchdiff_cli::logging::init(args.verbose);

    let access_log = match &args.log_file {
        Some(path) => AccessLog::with_file(path)?,
        None => AccessLog::stdout(),
    };

    let listener = TcpListener::bind(&args.addr).await?;
    app::serve(listener, AppState::new(access_log)).await?;

    Ok(())
}
