//! Frame rate measurement over a fixed reporting period.

use std::time::Instant;

/// Counts frames since the last rate report.
///
/// After `period` ticks the counter yields the measured frames-per-second
/// over the elapsed wall-clock time and resets both the count and the
/// start timestamp. Purely transient, nothing persists across runs.
#[derive(Debug)]
pub struct RateCounter {
    period: u32,
    count: u32,
    start: Instant,
}

impl RateCounter {
    /// Create a counter that reports every `period` frames.
    pub fn new(period: u32) -> Self {
        Self {
            period: period.max(1),
            count: 0,
            start: Instant::now(),
        }
    }

    #[cfg(test)]
    fn with_start(period: u32, start: Instant) -> Self {
        Self {
            period: period.max(1),
            count: 0,
            start,
        }
    }

    /// Record one processed frame.
    ///
    /// Returns `Some(fps)` when the reporting period is reached, `None`
    /// otherwise.
    pub fn tick(&mut self) -> Option<f64> {
        self.tick_at(Instant::now())
    }

    fn tick_at(&mut self, now: Instant) -> Option<f64> {
        self.count += 1;
        if self.count < self.period {
            return None;
        }

        let elapsed = now.duration_since(self.start).as_secs_f64();
        let fps = f64::from(self.count) / elapsed;
        self.count = 0;
        self.start = now;
        Some(fps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_no_report_before_period() {
        let start = Instant::now();
        let mut counter = RateCounter::with_start(50, start);
        for i in 1..50 {
            let now = start + Duration::from_millis(i * 10);
            assert!(counter.tick_at(now).is_none(), "unexpected report at tick {}", i);
        }
    }

    #[test]
    fn test_rate_equals_count_over_elapsed() {
        let start = Instant::now();
        let mut counter = RateCounter::with_start(50, start);
        for i in 1..50 {
            let now = start + Duration::from_millis(i * 40);
            assert!(counter.tick_at(now).is_none());
        }
        // 50 frames over exactly 2 seconds
        let fps = counter
            .tick_at(start + Duration::from_secs(2))
            .expect("should report at period");
        assert!((fps - 25.0).abs() < 1e-9, "fps = {}", fps);
    }

    #[test]
    fn test_counter_resets_after_report() {
        let start = Instant::now();
        let mut counter = RateCounter::with_start(2, start);
        assert!(counter.tick_at(start + Duration::from_millis(500)).is_none());
        let first = counter.tick_at(start + Duration::from_secs(1)).unwrap();
        assert!((first - 2.0).abs() < 1e-9);

        // Second period is measured from the previous report, not from creation
        let t1 = start + Duration::from_secs(1);
        assert!(counter.tick_at(t1 + Duration::from_millis(100)).is_none());
        let second = counter.tick_at(t1 + Duration::from_secs(4)).unwrap();
        assert!((second - 0.5).abs() < 1e-9, "fps = {}", second);
    }

    #[test]
    fn test_period_zero_is_clamped_to_one() {
        let start = Instant::now();
        let mut counter = RateCounter::with_start(0, start);
        assert!(counter.tick_at(start + Duration::from_secs(1)).is_some());
    }
}
