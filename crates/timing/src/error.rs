//! Error types for the timing engine.

use thiserror::Error;

/// Errors that can occur while driving a performance timer.
#[derive(Debug, Error)]
pub enum TimingError {
    /// The operation name passed to `start` was empty or blank
    #[error("operation name must not be empty")]
    EmptyOperationName,

    /// `stop` (or a pre-stop mutator) was called on a timer that has
    /// already been stopped
    #[error("timer '{0}' is already stopped")]
    AlreadyStopped(String),
}

/// Result type for timing operations.
pub type TimingResult<T> = Result<T, TimingError>;
