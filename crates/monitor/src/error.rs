//! Error types for the monitoring layer.

use thiserror::Error;
use timing::TimingError;

/// Errors that can occur while orchestrating monitored invocations.
#[derive(Debug, Error)]
pub enum MonitorError {
    /// The underlying timer rejected an operation
    #[error(transparent)]
    Timing(#[from] TimingError),

    /// A structured payload could not be serialized
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for monitoring operations.
pub type MonitorResult<T> = Result<T, MonitorError>;
