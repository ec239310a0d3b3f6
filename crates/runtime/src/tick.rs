use std::time::Duration;

/// One polling interval of a readiness wait.
///
/// Ticks are counted, not measured: elapsed time is derived from the index so
/// a wait can be replayed deterministically with a simulated clock.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Tick {
    /// 0 before the first check, then 1-based.
    pub index: u64,
    pub interval: Duration,
}

impl Tick {
    pub fn start(interval: Duration) -> Self {
        Self { index: 0, interval }
    }

    pub fn next(self) -> Self {
        Self {
            index: self.index + 1,
            interval: self.interval,
        }
    }

    /// Nominal time since the wait started.
    pub fn elapsed(&self) -> Duration {
        self.interval
            .saturating_mul(u32::try_from(self.index).unwrap_or(u32::MAX))
    }
}

#[cfg(test)]
mod tests {
    use super::Tick;
    use std::time::Duration;

    #[test]
    fn next_advances_index_and_elapsed() {
        let t0 = Tick::start(Duration::from_millis(10));
        let t2 = t0.next().next();
        assert_eq!(t2.index, 2);
        assert_eq!(t2.elapsed(), Duration::from_millis(20));
        assert_eq!(t0.elapsed(), Duration::ZERO);
    }
}
