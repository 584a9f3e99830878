//! RAII binding of one start/stop pairing.
//!
//! Failing to stop a timer on some exit path corrupts the thread-local
//! current-timer slot. [`MonitoredScope`] makes that impossible for callers
//! that hold the guard: if it is still live when dropped (early return,
//! panic unwind), it stops and logs the timer itself, marking it failed on
//! unwind.

use timing::PerfTimer;

use crate::config::MonitorConfig;
use crate::error::MonitorResult;
use crate::identity::MethodIdentity;
use crate::logger::MethodMonitor;
use crate::sink::LogSink;

/// Guard that guarantees its timer is stopped and logged exactly once.
pub struct MonitoredScope<'a, S: LogSink> {
    monitor: &'a MethodMonitor<S>,
    config: &'a MonitorConfig,
    timer: PerfTimer,
    finished: bool,
}

impl<'a, S: LogSink> MonitoredScope<'a, S> {
    /// Start a timer for `identity` and bind it to this guard.
    pub fn enter(
        monitor: &'a MethodMonitor<S>,
        config: &'a MonitorConfig,
        identity: &MethodIdentity,
    ) -> MonitorResult<Self> {
        let timer = monitor.start(config, identity)?;
        Ok(Self {
            monitor,
            config,
            timer,
            finished: false,
        })
    }

    /// The timer this scope guards.
    pub fn timer(&self) -> &PerfTimer {
        &self.timer
    }

    /// Mark the monitored operation as failed.
    pub fn mark_failed(&self) -> MonitorResult<()> {
        Ok(self.timer.mark_failed()?)
    }

    /// Append a comment to the timing record.
    pub fn add_comment(&self, text: &str) -> MonitorResult<()> {
        Ok(self.timer.add_comment(text)?)
    }

    /// Report the processed-item count.
    pub fn set_item_count(&self, count: u64) -> MonitorResult<()> {
        Ok(self.timer.set_item_count(count)?)
    }

    /// Stop and log on the normal path, surfacing any error to the caller.
    pub fn finish(mut self) -> MonitorResult<()> {
        self.finished = true;
        self.monitor.stop_and_log(self.config, &self.timer)
    }
}

impl<S: LogSink> Drop for MonitoredScope<'_, S> {
    fn drop(&mut self) {
        if self.finished || !self.timer.is_running() {
            return;
        }
        if std::thread::panicking() {
            let _ = self.timer.mark_failed();
        }
        if let Err(err) = self.monitor.stop_and_log(self.config, &self.timer) {
            tracing::warn!(error = %err, "failed to log monitored scope on drop");
        }
    }
}
