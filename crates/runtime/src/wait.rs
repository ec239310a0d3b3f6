use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use crate::bindings::BindingSource;
use crate::budget::TickBudget;
use crate::error::GateError;
use crate::gate::{ReadinessGate, ReadinessSet};

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(10);
pub const DEFAULT_WAIT_TIMEOUT: Duration = Duration::from_secs(30);

/// How often to check bindings and how long to keep trying.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct WaitPolicy {
    interval: Duration,
    timeout: Option<Duration>,
}

impl WaitPolicy {
    /// Polls until the bindings appear or the wait is cancelled.
    pub fn unbounded() -> Self {
        Self {
            interval: DEFAULT_POLL_INTERVAL,
            timeout: None,
        }
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval.max(Duration::from_millis(1));
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// The timeout as a tick count, rounded up; at least one tick.
    pub fn budget(&self) -> TickBudget {
        let Some(timeout) = self.timeout else {
            return TickBudget::unlimited();
        };
        let interval = self.interval.as_nanos().max(1);
        let ticks = timeout.as_nanos().div_ceil(interval).max(1);
        TickBudget::new(u64::try_from(ticks).unwrap_or(u64::MAX))
    }
}

impl Default for WaitPolicy {
    fn default() -> Self {
        Self {
            interval: DEFAULT_POLL_INTERVAL,
            timeout: Some(DEFAULT_WAIT_TIMEOUT),
        }
    }
}

/// Cloneable flag that stops a pending readiness wait at its next tick.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }

    /// Whether both tokens share one flag.
    pub fn same_as(&self, other: &CancelToken) -> bool {
        Arc::ptr_eq(&self.cancelled, &other.cancelled)
    }
}

/// Waits for every binding in `set` and returns their values in set order.
///
/// `sleep` suspends for one interval; it is injected so the same wait runs on
/// a tokio runtime and on the browser event loop. The first check happens
/// after one interval. Cancellation is observed at the next tick.
pub async fn wait_ready<S, Sleep, Fut>(
    source: &S,
    set: &ReadinessSet,
    policy: WaitPolicy,
    cancel: &CancelToken,
    mut sleep: Sleep,
) -> Result<Vec<S::Value>, GateError>
where
    S: BindingSource,
    Sleep: FnMut(Duration) -> Fut,
    Fut: Future<Output = ()>,
{
    let mut resolved = None;
    let mut gate = ReadinessGate::new(set.clone(), policy, cancel.clone(), |values| {
        resolved = Some(values)
    });

    let state = loop {
        sleep(policy.interval()).await;
        let state = gate.poll(source);
        if state.is_terminal() {
            break state;
        }
    };
    drop(gate);

    match (resolved, state.into_error()) {
        (Some(values), _) => Ok(values),
        (None, Some(err)) => Err(err),
        (None, None) => Err(GateError::Cancelled),
    }
}

#[cfg(test)]
mod tests {
    use super::{CancelToken, WaitPolicy, wait_ready};
    use crate::bindings::InMemoryBindings;
    use crate::error::GateError;
    use crate::gate::ReadinessSet;
    use pretty_assertions::assert_eq;
    use serde_json::{Value, json};
    use std::time::Duration;
    use tokio::time::{Instant, sleep};

    #[test]
    fn default_policy_is_bounded() {
        let policy = WaitPolicy::default();
        assert_eq!(policy.interval(), Duration::from_millis(10));
        assert_eq!(policy.budget().remaining_ticks(), 3_000);
        assert_eq!(WaitPolicy::unbounded().timeout(), None);
    }

    #[test]
    fn zero_interval_is_clamped() {
        let policy = WaitPolicy::default().with_interval(Duration::ZERO);
        assert_eq!(policy.interval(), Duration::from_millis(1));
    }

    #[test]
    fn clones_share_the_flag() {
        let token = CancelToken::new();
        let clone = token.clone();
        assert!(clone.same_as(&token));
        assert!(!CancelToken::new().same_as(&token));
        clone.cancel();
        assert!(token.is_cancelled());
    }

    #[tokio::test(start_paused = true)]
    async fn resolves_when_bindings_appear_later() {
        let scope = InMemoryBindings::new();
        scope.define("L", json!({}));
        let set = ReadinessSet::new(["OFDB_MAP_PINS", "L"]).unwrap();
        let cancel = CancelToken::new();
        let started = Instant::now();

        let producer = async {
            sleep(Duration::from_millis(35)).await;
            scope.define("OFDB_MAP_PINS", json!([{"lat": 1, "lng": 2}]));
        };
        let waiter = wait_ready(&scope, &set, WaitPolicy::unbounded(), &cancel, sleep);

        let ((), values) = tokio::join!(producer, waiter);
        assert_eq!(values.unwrap(), vec![json!([{"lat": 1, "lng": 2}]), json!({})]);
        // Resolved on the first tick after the definition.
        let elapsed = started.elapsed();
        assert!(elapsed >= Duration::from_millis(35), "{elapsed:?}");
        assert!(elapsed < Duration::from_millis(50), "{elapsed:?}");
    }

    #[tokio::test(start_paused = true)]
    async fn times_out_without_bindings() {
        let scope: InMemoryBindings<Value> = InMemoryBindings::new();
        let set = ReadinessSet::new(["OFDB_MAP_ZOOM"]).unwrap();
        let policy = WaitPolicy::default().with_timeout(Duration::from_millis(100));

        let err = wait_ready(&scope, &set, policy, &CancelToken::new(), sleep)
            .await
            .unwrap_err();
        assert_eq!(err, GateError::TimedOut { ticks: 10 });
    }

    #[tokio::test(start_paused = true)]
    async fn cancellation_ends_the_wait() {
        let scope: InMemoryBindings<Value> = InMemoryBindings::new();
        let set = ReadinessSet::new(["OFDB_MAP_ZOOM"]).unwrap();
        let cancel = CancelToken::new();

        let canceller = async {
            sleep(Duration::from_millis(55)).await;
            cancel.cancel();
        };
        let waiter = wait_ready(&scope, &set, WaitPolicy::unbounded(), &cancel, sleep);

        let ((), result) = tokio::join!(canceller, waiter);
        assert_eq!(result, Err(GateError::Cancelled));
    }
}
