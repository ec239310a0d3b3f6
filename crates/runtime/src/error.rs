use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GateError {
    #[error("binding `{0}` is listed more than once")]
    DuplicateBinding(String),
    #[error("binding names must not be empty")]
    EmptyBindingName,
    #[error("bindings still undefined after {ticks} ticks")]
    TimedOut { ticks: u64 },
    #[error("readiness wait was cancelled")]
    Cancelled,
}
