use clap::Parser;

use crate::probe::scenario::ScenarioKind;

#[derive(Debug, Parser)]
#[command(name = "bench-probe")]
#[command(about = "Replay load, spike or soak traffic against a running bench service")]
pub struct ProbeArgs {
    /// Base URL of the service under test
    #[arg(short, long, env = "TARGET_URL", default_value = "http://localhost:8080")]
    pub target: String,

    /// Traffic shape to replay
    #[arg(short, long, value_enum, default_value = "load")]
    pub scenario: ScenarioKind,

    /// Upper bound sent as /compute?n=
    #[arg(long, env = "PRIME_N", default_value = "10000")]
    pub prime_n: u64,

    /// Multiply every stage duration by this factor (e.g. 0.1 for a quick run)
    #[arg(long, default_value = "1.0")]
    pub time_scale: f64,

    /// Per-request timeout in seconds
    #[arg(long, default_value = "30")]
    pub timeout_secs: u64,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    // the only test touching TARGET_URL / PRIME_N, so no cross-test races
    #[test]
    fn test_target_and_prime_n_from_environment() {
        std::env::set_var("TARGET_URL", "http://bench.internal:30080");
        std::env::set_var("PRIME_N", "5000");

        let args = ProbeArgs::try_parse_from(["bench"]).unwrap();
        assert_eq!(args.target, "http://bench.internal:30080");
        assert_eq!(args.prime_n, 5000);

        let args = ProbeArgs::try_parse_from([
            "bench",
            "--target",
            "http://other:8080",
            "--prime-n",
            "7",
        ])
        .unwrap();
        assert_eq!(args.target, "http://other:8080");
        assert_eq!(args.prime_n, 7);

        std::env::remove_var("TARGET_URL");
        std::env::remove_var("PRIME_N");

        let args = ProbeArgs::try_parse_from(["bench", "--scenario", "spike"]).unwrap();
        assert_eq!(args.target, "http://localhost:8080");
        assert_eq!(args.prime_n, 10_000);
        assert_eq!(args.scenario, ScenarioKind::Spike);
    }
}
