use runtime::GateError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum MapError {
    #[error("map backend failed: {0}")]
    Backend(String),
    #[error("binding `{name}` is malformed: {reason}")]
    Binding { name: String, reason: String },
    #[error("map config could not be encoded: {0}")]
    Encode(String),
    #[error(transparent)]
    Gate(#[from] GateError),
}
