use std::fmt;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::core::round_ms;
use crate::probe::client::{RequestKind, Sample};
use crate::probe::scenario::Thresholds;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LatencySummary {
    pub p50_ms: f64,
    pub p95_ms: f64,
    pub max_ms: f64,
    pub mean_ms: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProbeReport {
    pub scenario: String,
    pub target: String,
    pub started_at: DateTime<Utc>,
    pub elapsed_ms: f64,
    pub total_requests: usize,
    pub failed_requests: usize,
    pub compute_requests: usize,
    pub health_requests: usize,
    pub failure_rate: f64,
    pub latency: LatencySummary,
    pub thresholds: Thresholds,
    pub violations: Vec<String>,
}

/// Nearest-rank percentile over an ascending slice.
pub fn percentile(sorted: &[Duration], p: f64) -> Duration {
    if sorted.is_empty() {
        return Duration::ZERO;
    }
    let rank = ((p / 100.0) * sorted.len() as f64).ceil() as usize;
    sorted[rank.clamp(1, sorted.len()) - 1]
}

impl LatencySummary {
    pub fn from_samples(samples: &[Sample]) -> Self {
        let mut latencies: Vec<Duration> = samples.iter().map(|s| s.latency).collect();
        latencies.sort_unstable();

        let Some(&max) = latencies.last() else {
            return Self::default();
        };
        let total: Duration = latencies.iter().sum();

        Self {
            p50_ms: round_ms(percentile(&latencies, 50.0)),
            p95_ms: round_ms(percentile(&latencies, 95.0)),
            max_ms: round_ms(max),
            mean_ms: round_ms(total / latencies.len() as u32),
        }
    }
}

impl ProbeReport {
    pub fn new(
        scenario: &str,
        target: &str,
        started_at: DateTime<Utc>,
        elapsed: Duration,
        samples: &[Sample],
        thresholds: Thresholds,
    ) -> Self {
        let total_requests = samples.len();
        let failed_requests = samples.iter().filter(|s| !s.ok).count();
        let compute_requests = samples
            .iter()
            .filter(|s| s.kind == RequestKind::Compute)
            .count();
        let failure_rate = if total_requests == 0 {
            0.0
        } else {
            failed_requests as f64 / total_requests as f64
        };
        let latency = LatencySummary::from_samples(samples);

        let mut violations = Vec::new();
        if total_requests == 0 {
            violations.push("no requests completed".to_string());
        }
        if failure_rate >= thresholds.max_failure_rate {
            violations.push(format!(
                "failure rate {:.2}% is not below {:.2}%",
                failure_rate * 100.0,
                thresholds.max_failure_rate * 100.0
            ));
        }
        if latency.p95_ms >= thresholds.p95_ms {
            violations.push(format!(
                "p95 latency {:.3}ms is not below {:.0}ms",
                latency.p95_ms, thresholds.p95_ms
            ));
        }

        Self {
            scenario: scenario.to_string(),
            target: target.to_string(),
            started_at,
            elapsed_ms: round_ms(elapsed),
            total_requests,
            failed_requests,
            compute_requests,
            health_requests: total_requests - compute_requests,
            failure_rate,
            latency,
            thresholds,
            violations,
        }
    }

    pub fn passed(&self) -> bool {
        self.violations.is_empty()
    }
}

impl fmt::Display for ProbeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "scenario {} against {}", self.scenario, self.target)?;
        writeln!(f, "  started:   {}", self.started_at.to_rfc3339())?;
        writeln!(f, "  elapsed:   {:.3}ms", self.elapsed_ms)?;
        writeln!(
            f,
            "  requests:  {} ({} compute, {} health), {} failed ({:.2}%)",
            self.total_requests,
            self.compute_requests,
            self.health_requests,
            self.failed_requests,
            self.failure_rate * 100.0
        )?;
        writeln!(
            f,
            "  latency:   p50 {:.3}ms, p95 {:.3}ms, max {:.3}ms, mean {:.3}ms",
            self.latency.p50_ms, self.latency.p95_ms, self.latency.max_ms, self.latency.mean_ms
        )?;
        if self.passed() {
            write!(f, "  thresholds: passed")
        } else {
            write!(f, "  thresholds: FAILED ({})", self.violations.join("; "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(kind: RequestKind, ms: u64, ok: bool) -> Sample {
        Sample {
            kind,
            latency: Duration::from_millis(ms),
            ok,
        }
    }

    const LIMITS: Thresholds = Thresholds {
        max_failure_rate: 0.05,
        p95_ms: 5000.0,
    };

    fn run_report(scenario: &str, elapsed: Duration, samples: &[Sample]) -> ProbeReport {
        ProbeReport::new(scenario, "http://x", Utc::now(), elapsed, samples, LIMITS)
    }

    #[test]
    fn test_percentile_nearest_rank() {
        let sorted: Vec<Duration> = (1..=20).map(Duration::from_millis).collect();
        assert_eq!(percentile(&sorted, 50.0), Duration::from_millis(10));
        assert_eq!(percentile(&sorted, 95.0), Duration::from_millis(19));
        assert_eq!(percentile(&sorted, 100.0), Duration::from_millis(20));
        assert_eq!(percentile(&sorted, 0.0), Duration::from_millis(1));
        assert_eq!(percentile(&[], 95.0), Duration::ZERO);
    }

    #[test]
    fn test_passing_run() {
        let samples: Vec<Sample> = (0..20)
            .map(|i| sample(RequestKind::for_iteration(i), 10 + i, true))
            .collect();
        let report = run_report("load", Duration::from_secs(1), &samples);

        assert!(report.passed(), "{:?}", report.violations);
        assert_eq!(report.total_requests, 20);
        assert_eq!(report.health_requests, 4);
        assert_eq!(report.latency.max_ms, 29.0);
    }

    #[test]
    fn test_failure_rate_threshold_is_strict() {
        let mut samples: Vec<Sample> =
            (0..19).map(|_| sample(RequestKind::Compute, 5, true)).collect();
        samples.push(sample(RequestKind::Compute, 5, false));
        let report = run_report("load", Duration::from_secs(1), &samples);

        assert_eq!(report.failure_rate, 0.05);
        assert!(!report.passed());
    }

    #[test]
    fn test_slow_run_fails_latency() {
        let samples = vec![sample(RequestKind::Compute, 6000, true)];
        let report = run_report("soak", Duration::from_secs(6), &samples);
        assert_eq!(report.violations.len(), 1);
        assert!(report.violations[0].starts_with("p95 latency"));
    }

    #[test]
    fn test_empty_run_fails() {
        let report = ProbeReport::new("spike", "http://x", Utc::now(), Duration::ZERO, &[], LIMITS);
        assert!(!report.passed());
        assert_eq!(report.latency, LatencySummary::default());
    }
}
