/// Deterministic tick budget bounding a readiness wait.
///
/// Timeouts are converted to a tick count up front so that a wait expires
/// after the same number of checks regardless of timer jitter.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct TickBudget {
    remaining_ticks: u64,
}

impl TickBudget {
    pub fn new(ticks: u64) -> Self {
        Self {
            remaining_ticks: ticks,
        }
    }

    /// A practically-unbounded budget (still deterministic).
    pub fn unlimited() -> Self {
        Self::new(u64::MAX)
    }

    pub fn remaining_ticks(&self) -> u64 {
        self.remaining_ticks
    }

    pub fn is_exhausted(&self) -> bool {
        self.remaining_ticks == 0
    }

    /// Attempts to spend one tick.
    ///
    /// Returns `true` if the budget had a tick left.
    pub fn try_consume(&mut self) -> bool {
        if self.remaining_ticks == 0 {
            return false;
        }
        self.remaining_ticks -= 1;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::TickBudget;

    #[test]
    fn consumes_ticks() {
        let mut b = TickBudget::new(2);
        assert!(b.try_consume());
        assert_eq!(b.remaining_ticks(), 1);
        assert!(b.try_consume());
        assert!(b.is_exhausted());
        assert!(!b.try_consume());
    }

    #[test]
    fn unlimited_is_not_exhausted_after_many_ticks() {
        let mut b = TickBudget::unlimited();
        for _ in 0..10_000 {
            assert!(b.try_consume());
        }
        assert!(!b.is_exhausted());
    }
}
