//! Fixed-cadence tick accounting.

use std::time::Duration;

const NANOS_PER_SEC: u128 = 1_000_000_000;

/// Converts elapsed wall-clock time into whole ticks at a fixed interval.
///
/// Leftover time below one interval is carried into the next call, so a
/// host calling at an irregular frame rate still gets one tick per interval
/// on average.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use u_collect::simulation::TickDriver;
///
/// let mut driver = TickDriver::new(Duration::from_millis(100));
/// assert_eq!(driver.accumulate(Duration::from_millis(250)), 2);
/// assert_eq!(driver.accumulate(Duration::from_millis(60)), 1); // 50 + 60
/// driver.reset();
/// assert_eq!(driver.accumulate(Duration::from_millis(90)), 0);
/// ```
#[derive(Debug, Clone)]
pub struct TickDriver {
    interval: Duration,
    carried: Duration,
}

impl TickDriver {
    /// Creates a driver with nothing carried.
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            carried: Duration::ZERO,
        }
    }

    /// Adds `elapsed` and returns how many ticks are now due.
    ///
    /// Always 0 for a zero interval.
    pub fn accumulate(&mut self, elapsed: Duration) -> u32 {
        if self.interval.is_zero() {
            return 0;
        }
        self.carried = self.carried.saturating_add(elapsed);
        let interval = self.interval.as_nanos();
        let due = self.carried.as_nanos() / interval;
        let rest = self.carried.as_nanos() % interval;
        self.carried = Duration::new(
            (rest / NANOS_PER_SEC) as u64,
            (rest % NANOS_PER_SEC) as u32,
        );
        u32::try_from(due).unwrap_or(u32::MAX)
    }

    /// Discards carried time.
    pub fn reset(&mut self) {
        self.carried = Duration::ZERO;
    }

    /// Tick interval.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Time carried toward the next tick.
    pub fn carried(&self) -> Duration {
        self.carried
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_intervals() {
        let mut d = TickDriver::new(Duration::from_millis(100));
        assert_eq!(d.accumulate(Duration::from_millis(100)), 1);
        assert_eq!(d.accumulate(Duration::from_millis(300)), 3);
        assert_eq!(d.carried(), Duration::ZERO);
    }

    #[test]
    fn test_carries_remainder() {
        let mut d = TickDriver::new(Duration::from_millis(100));
        assert_eq!(d.accumulate(Duration::from_millis(40)), 0);
        assert_eq!(d.accumulate(Duration::from_millis(40)), 0);
        assert_eq!(d.accumulate(Duration::from_millis(40)), 1);
        assert_eq!(d.carried(), Duration::from_millis(20));
    }

    #[test]
    fn test_reset_discards_pending() {
        let mut d = TickDriver::new(Duration::from_millis(100));
        d.accumulate(Duration::from_millis(99));
        d.reset();
        assert_eq!(d.accumulate(Duration::from_millis(1)), 0);
    }

    #[test]
    fn test_zero_interval() {
        let mut d = TickDriver::new(Duration::ZERO);
        assert_eq!(d.accumulate(Duration::from_secs(10)), 0);
    }

    #[test]
    fn test_huge_elapsed_saturates() {
        let mut d = TickDriver::new(Duration::from_nanos(1));
        assert_eq!(d.accumulate(Duration::from_secs(u64::MAX)), u32::MAX);
    }
}
