use std::time::Duration;

use serde::Serialize;

/// Ramp to `target` virtual users over `duration`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Stage {
    pub duration: Duration,
    pub target: usize,
}

impl Stage {
    pub const fn new(duration: Duration, target: usize) -> Self {
        Self { duration, target }
    }
}

/// Pass/fail limits checked against the finished run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Thresholds {
    /// Failed requests must stay strictly below this fraction.
    pub max_failure_rate: f64,
    /// 95th percentile latency must stay strictly below this.
    pub p95_ms: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum ScenarioKind {
    Load,
    Spike,
    Soak,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scenario {
    pub name: String,
    pub stages: Vec<Stage>,
    pub think_time: Duration,
    pub thresholds: Thresholds,
}

const fn secs(s: u64) -> Duration {
    Duration::from_secs(s)
}

impl Scenario {
    /// Gradual ramp to 50 VUs and back.
    pub fn load() -> Self {
        Self {
            name: "load".to_string(),
            stages: vec![
                Stage::new(secs(30), 10),
                Stage::new(secs(60), 30),
                Stage::new(secs(60), 50),
                Stage::new(secs(60), 30),
                Stage::new(secs(90), 0),
            ],
            think_time: Duration::from_millis(500),
            thresholds: Thresholds {
                max_failure_rate: 0.05,
                p95_ms: 5000.0,
            },
        }
    }

    /// Sudden jump to 100 VUs held for a minute.
    pub fn spike() -> Self {
        Self {
            name: "spike".to_string(),
            stages: vec![
                Stage::new(secs(10), 5),
                Stage::new(secs(5), 100),
                Stage::new(secs(60), 100),
                Stage::new(secs(30), 50),
                Stage::new(secs(30), 0),
            ],
            think_time: Duration::from_millis(300),
            thresholds: Thresholds {
                max_failure_rate: 0.10,
                p95_ms: 10_000.0,
            },
        }
    }

    /// Flat 30 VUs for nine minutes.
    pub fn soak() -> Self {
        Self {
            name: "soak".to_string(),
            stages: vec![
                Stage::new(secs(30), 30),
                Stage::new(secs(540), 30),
                Stage::new(secs(30), 0),
            ],
            think_time: Duration::from_millis(300),
            thresholds: Thresholds {
                max_failure_rate: 0.05,
                p95_ms: 5000.0,
            },
        }
    }

    pub fn from_kind(kind: ScenarioKind) -> Self {
        match kind {
            ScenarioKind::Load => Self::load(),
            ScenarioKind::Spike => Self::spike(),
            ScenarioKind::Soak => Self::soak(),
        }
    }

    /// Same shape with every stage duration multiplied by `factor`.
    pub fn scaled(mut self, factor: f64) -> Self {
        for stage in &mut self.stages {
            stage.duration = stage.duration.mul_f64(factor);
        }
        self
    }

    pub fn total_duration(&self) -> Duration {
        self.stages.iter().map(|s| s.duration).sum()
    }

    pub fn max_target(&self) -> usize {
        self.stages.iter().map(|s| s.target).max().unwrap_or(0)
    }

    /// Active VU count at `elapsed`, interpolated linearly from the previous
    /// stage's target (0 before the first stage).
    pub fn target_at(&self, elapsed: Duration) -> usize {
        let mut stage_start = Duration::ZERO;
        let mut previous = 0usize;

        for stage in &self.stages {
            let stage_end = stage_start + stage.duration;
            if elapsed < stage_end {
                let progress = (elapsed - stage_start).as_secs_f64() / stage.duration.as_secs_f64();
                let from = previous as f64;
                let to = stage.target as f64;
                return (from + (to - from) * progress).round() as usize;
            }
            stage_start = stage_end;
            previous = stage.target;
        }

        previous
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_durations() {
        assert_eq!(Scenario::load().total_duration(), secs(300));
        assert_eq!(Scenario::spike().total_duration(), secs(135));
        assert_eq!(Scenario::soak().total_duration(), secs(600));
        assert_eq!(Scenario::spike().max_target(), 100);
    }

    #[test]
    fn test_linear_ramp() {
        let scenario = Scenario::load();
        assert_eq!(scenario.target_at(Duration::ZERO), 0);
        assert_eq!(scenario.target_at(secs(15)), 5);
        assert_eq!(scenario.target_at(secs(30)), 10);
        assert_eq!(scenario.target_at(secs(60)), 20);
        assert_eq!(scenario.target_at(secs(150)), 50);
        assert_eq!(scenario.target_at(secs(300)), 0);
        assert_eq!(scenario.target_at(secs(1000)), 0);
    }

    #[test]
    fn test_plateau_holds_target() {
        let scenario = Scenario::soak();
        assert_eq!(scenario.target_at(secs(31)), 30);
        assert_eq!(scenario.target_at(secs(400)), 30);
    }

    #[test]
    fn test_scaled_keeps_shape() {
        let scenario = Scenario::spike().scaled(0.1);
        assert_eq!(scenario.total_duration(), Duration::from_millis(13_500));
        assert_eq!(scenario.stages[1].target, 100);
        assert_eq!(scenario.think_time, Duration::from_millis(300));
    }
}
