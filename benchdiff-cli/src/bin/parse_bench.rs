// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Compare a sidecar benchmark log against an eBPF benchmark log.

use std::path::PathBuf;

use benchdiff_core::{parser, ComparisonReport, ConfigLoader, OutputFormat, ReportConfig};
use clap::error::ErrorKind;
use clap::Parser;

#[derive(Parser)]
#[command(name = "parse-bench")]
#[command(version, about = "Diff sidecar and eBPF benchmark summaries")]
struct Args {
    /// Baseline benchmark log (sidecar run)
    baseline: PathBuf,

    /// Candidate benchmark log (eBPF run)
    candidate: PathBuf,

    /// Emit JSON instead of the text summary
    #[arg(long)]
    json: bool,

    /// Anything after the two logs is ignored
    #[arg(hide = true, allow_hyphen_values = true)]
    rest: Vec<String>,

    /// Report configuration file (YAML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) if e.kind() == ErrorKind::MissingRequiredArgument => {
            print!("{}", e.render());
            std::process::exit(2);
        }
        Err(e) => e.exit(),
    };

    benchdiff_cli::logging::init(args.verbose);

    let config = match &args.config {
        Some(path) => ConfigLoader::load_file(path)?,
        None => ReportConfig::default(),
    };

    let baseline = parser::parse(&args.baseline)?;
    let candidate = parser::parse(&args.candidate)?;
    tracing::debug!(?baseline, ?candidate, "Parsed benchmark logs");

    if !args.rest.is_empty() {
        tracing::debug!(ignored = ?args.rest, "Ignoring extra arguments");
    }

    let format = if args.json || args.rest.iter().any(|a| a == "--json") {
        OutputFormat::Json
    } else {
        OutputFormat::Human
    };

    let output = ComparisonReport::new(baseline, candidate).render(format, &config)?;
    print!("{}", output);
    if format == OutputFormat::Json {
        println!();
    }

    Ok(())
}
