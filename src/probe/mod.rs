//! Closed-loop load generator replaying the benchmark scenarios against a
//! running service.

#[cfg(feature = "cli")]
pub mod cli;
pub mod client;
pub mod report;
pub mod scenario;

use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::Utc;
use tokio::task::JoinSet;

use crate::utils::error::Result;
use client::{ProbeClient, RequestKind, Sample};
use report::ProbeReport;
use scenario::Scenario;

/// How long an idle VU waits before checking whether it became active.
const IDLE_POLL: Duration = Duration::from_millis(50);

/// Runs `scenario` to completion and summarises every request made.
pub async fn run(client: ProbeClient, scenario: Scenario, target: &str) -> Result<ProbeReport> {
    let scenario = Arc::new(scenario);
    let started_at = Utc::now();
    let start = Instant::now();

    tracing::info!(
        scenario = %scenario.name,
        max_vus = scenario.max_target(),
        duration = ?scenario.total_duration(),
        "Starting probe against {}",
        target
    );

    let mut vus = JoinSet::new();
    for vu in 0..scenario.max_target() {
        vus.spawn(virtual_user(vu, client.clone(), Arc::clone(&scenario), start));
    }

    let mut samples = Vec::new();
    while let Some(result) = vus.join_next().await {
        samples.extend(result?);
    }

    let report = ProbeReport::new(
        &scenario.name,
        target,
        started_at,
        start.elapsed(),
        &samples,
        scenario.thresholds,
    );
    tracing::info!(
        total = report.total_requests,
        failed = report.failed_requests,
        p95_ms = report.latency.p95_ms,
        "Probe finished"
    );
    Ok(report)
}

/// VU number `index` only issues requests while the ramp has at least
/// `index + 1` users active.
async fn virtual_user(
    index: usize,
    client: ProbeClient,
    scenario: Arc<Scenario>,
    start: Instant,
) -> Vec<Sample> {
    let total = scenario.total_duration();
    let mut samples = Vec::new();
    let mut iteration = 0u64;

    loop {
        let elapsed = start.elapsed();
        if elapsed >= total {
            break;
        }

        if index >= scenario.target_at(elapsed) {
            tokio::time::sleep(IDLE_POLL.min(total - elapsed)).await;
            continue;
        }

        let sample = client.execute(RequestKind::for_iteration(iteration)).await;
        samples.push(sample);
        iteration += 1;

        tokio::time::sleep(scenario.think_time).await;
    }

    samples
}
