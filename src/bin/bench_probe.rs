use std::time::Duration;

use anyhow::Context;
use bench_service::config::LogFormat;
use bench_service::probe::{self, cli::ProbeArgs, client::ProbeClient, scenario::Scenario};
use bench_service::utils::{
    logger,
    validation::{validate_range, validate_url},
};
use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = ProbeArgs::parse();

    logger::init_logger(args.verbose, LogFormat::Compact);

    validate_url("target", &args.target)?;
    validate_range("time_scale", args.time_scale, 0.001, 100.0)?;

    let scenario = Scenario::from_kind(args.scenario).scaled(args.time_scale);
    let timeout = Duration::from_secs(args.timeout_secs);
    let client = ProbeClient::new(&args.target, args.prime_n, timeout)
        .context("failed to build HTTP client")?;

    let report = probe::run(client, scenario, &args.target).await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", report);
    }

    if !report.passed() {
        tracing::error!("Thresholds breached: {}", report.violations.join("; "));
        std::process::exit(1);
    }

    Ok(())
}
