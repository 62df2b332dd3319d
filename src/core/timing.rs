use std::time::{Duration, Instant};

/// Milliseconds rounded to three decimal places (microsecond resolution).
pub fn round_ms(duration: Duration) -> f64 {
    let ms = duration.as_secs_f64() * 1000.0;
    (ms * 1000.0).round() / 1000.0
}

/// Runs `f` and returns its output with the wall-clock time it took.
pub fn timed<T>(f: impl FnOnce() -> T) -> (T, f64) {
    let start = Instant::now();
    let output = f();
    (output, round_ms(start.elapsed()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_ms() {
        assert_eq!(round_ms(Duration::from_nanos(1_234_567)), 1.235);
        assert_eq!(round_ms(Duration::from_nanos(1_234_499)), 1.234);
        assert_eq!(round_ms(Duration::from_secs(2)), 2000.0);
        assert_eq!(round_ms(Duration::ZERO), 0.0);
    }

    #[test]
    fn test_timed_returns_output() {
        let (value, ms) = timed(|| 21 * 2);
        assert_eq!(value, 42);
        assert!(ms >= 0.0 && ms.is_finite());
    }
}
