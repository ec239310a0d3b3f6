use std::collections::BTreeSet;

use tracing::{debug, trace, warn};

use crate::bindings::BindingSource;
use crate::budget::TickBudget;
use crate::error::GateError;
use crate::tick::Tick;
use crate::wait::{CancelToken, WaitPolicy};

/// Fixed, ordered list of binding names a gate waits for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadinessSet {
    names: Vec<String>,
}

impl ReadinessSet {
    pub fn new<I, S>(names: I) -> Result<Self, GateError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        let mut seen = BTreeSet::new();
        for name in &names {
            if name.is_empty() {
                return Err(GateError::EmptyBindingName);
            }
            if !seen.insert(name.as_str()) {
                return Err(GateError::DuplicateBinding(name.clone()));
            }
        }
        Ok(Self { names })
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Values for every name in order, or `None` while any is undefined.
    pub fn resolve<S: BindingSource>(&self, source: &S) -> Option<Vec<S::Value>> {
        let mut values = Vec::with_capacity(self.names.len());
        for name in &self.names {
            match source.lookup(name) {
                Some(value) => values.push(value),
                None => {
                    trace!("binding `{name}` not defined yet");
                    return None;
                }
            }
        }
        Some(values)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum GateState {
    Waiting,
    Resolved { at_tick: u64 },
    Cancelled,
    TimedOut { ticks: u64 },
}

impl GateState {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, GateState::Waiting)
    }
}

/// Tick-driven wait for a [`ReadinessSet`].
///
/// Each [`poll`](ReadinessGate::poll) is one interval tick. On the first tick
/// where every binding is defined the callback receives the values in set
/// order; it runs at most once. Once the gate has left `Waiting` further polls
/// are no-ops.
pub struct ReadinessGate<V, F>
where
    F: FnOnce(Vec<V>),
{
    set: ReadinessSet,
    callback: Option<F>,
    state: GateState,
    tick: Tick,
    budget: TickBudget,
    cancel: CancelToken,
    _value: std::marker::PhantomData<fn(V)>,
}

impl<V, F> ReadinessGate<V, F>
where
    F: FnOnce(Vec<V>),
{
    pub fn new(set: ReadinessSet, policy: WaitPolicy, cancel: CancelToken, callback: F) -> Self {
        Self {
            set,
            callback: Some(callback),
            state: GateState::Waiting,
            tick: Tick::start(policy.interval()),
            budget: policy.budget(),
            cancel,
            _value: std::marker::PhantomData,
        }
    }

    pub fn state(&self) -> GateState {
        self.state
    }

    /// Number of ticks polled so far.
    pub fn ticks(&self) -> u64 {
        self.tick.index
    }

    pub fn poll<S>(&mut self, source: &S) -> GateState
    where
        S: BindingSource<Value = V>,
    {
        if self.state.is_terminal() {
            return self.state;
        }
        if self.cancel.is_cancelled() {
            debug!(ticks = self.tick.index, "readiness wait cancelled");
            self.state = GateState::Cancelled;
            return self.state;
        }

        self.tick = self.tick.next();
        self.budget.try_consume();

        if let Some(values) = self.set.resolve(source) {
            debug!(
                ticks = self.tick.index,
                elapsed_ms = self.tick.elapsed().as_millis() as u64,
                "bindings {:?} ready",
                self.set.names()
            );
            self.state = GateState::Resolved {
                at_tick: self.tick.index,
            };
            if let Some(callback) = self.callback.take() {
                callback(values);
            }
        } else if self.budget.is_exhausted() {
            warn!(
                ticks = self.tick.index,
                "bindings {:?} still undefined, giving up",
                self.set.names()
            );
            self.state = GateState::TimedOut {
                ticks: self.tick.index,
            };
        }
        self.state
    }
}

impl GateState {
    pub(crate) fn into_error(self) -> Option<GateError> {
        match self {
            GateState::TimedOut { ticks } => Some(GateError::TimedOut { ticks }),
            GateState::Cancelled => Some(GateError::Cancelled),
            GateState::Waiting | GateState::Resolved { .. } => None,
        }
    }
}
