//! Logging backend abstraction.
//!
//! The engine produces (level, logger-name, message) tuples; dispatch and
//! adapter selection beyond this seam belong to the surrounding
//! application. [`TracingSink`] is the default adapter; [`MemorySink`]
//! records emissions in memory and doubles as the test sink.

use std::sync::{Arc, Mutex};

use crate::config::LogLevel;

/// Destination for rendered monitoring output.
pub trait LogSink {
    fn log(&self, level: LogLevel, logger: &str, message: &str);
}

/// Default sink forwarding to `tracing` events.
///
/// The logical logger name travels as a `logger` field because event
/// targets must be compile-time constants.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl LogSink for TracingSink {
    fn log(&self, level: LogLevel, logger: &str, message: &str) {
        match level {
            LogLevel::Trace => tracing::trace!(logger = logger, "{}", message),
            LogLevel::Debug => tracing::debug!(logger = logger, "{}", message),
            LogLevel::Info => tracing::info!(logger = logger, "{}", message),
            LogLevel::Warn => tracing::warn!(logger = logger, "{}", message),
            LogLevel::Error => tracing::error!(logger = logger, "{}", message),
        }
    }
}

/// One record captured by a [`MemorySink`].
#[derive(Debug, Clone, PartialEq)]
pub struct LogRecord {
    pub level: LogLevel,
    pub logger: String,
    pub message: String,
}

/// Recording sink keeping every emission in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    records: Arc<Mutex<Vec<LogRecord>>>,
}

impl MemorySink {
    /// Create an empty recording sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything logged so far.
    pub fn records(&self) -> Vec<LogRecord> {
        self.records.lock().map(|r| r.clone()).unwrap_or_default()
    }

    /// Discard captured records.
    pub fn clear(&self) {
        if let Ok(mut records) = self.records.lock() {
            records.clear();
        }
    }
}

impl LogSink for MemorySink {
    fn log(&self, level: LogLevel, logger: &str, message: &str) {
        if let Ok(mut records) = self.records.lock() {
            records.push(LogRecord {
                level,
                logger: logger.to_string(),
                message: message.to_string(),
            });
        }
    }
}
