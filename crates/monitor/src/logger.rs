//! Invocation-logging orchestrator.

use serde::Serialize;
use timing::{format_duration_ms, PerfTimer, TimerEntry};

use crate::config::{MonitorConfig, OutputMode, PayloadStyle};
use crate::error::MonitorResult;
use crate::identity::{EndpointResolver, HttpEndpoint, MethodIdentity};
use crate::mdc;
use crate::render::{render_tree, tree_snapshot};
use crate::sink::{LogSink, TracingSink};

/// Explicit outcome data supplied at stop time.
///
/// Replaces name-based reflective lookups into caller state: the monitored
/// code hands its failure flag, comments, and item count over directly.
#[derive(Debug, Clone, Default)]
pub struct StopOutcome {
    pub failed: bool,
    pub comments: Vec<String>,
    pub item_count: Option<u64>,
}

impl StopOutcome {
    /// A successful outcome with no extra data.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the operation as failed.
    pub fn failed(mut self) -> Self {
        self.failed = true;
        self
    }

    /// Append a comment.
    pub fn with_comment(mut self, text: &str) -> Self {
        self.comments.push(text.to_string());
        self
    }

    /// Report the processed-item count.
    pub fn with_item_count(mut self, count: u64) -> Self {
        self.item_count = Some(count);
        self
    }
}

/// Orchestrator tying the timing engine to a log sink.
///
/// The interception layer calls [`start`](MethodMonitor::start) before the
/// monitored method runs and [`stop_and_log`](MethodMonitor::stop_and_log)
/// after it returns — on every path, success or failure. The monitor never
/// catches or transforms errors from monitored code.
#[derive(Default)]
pub struct MethodMonitor<S: LogSink = TracingSink> {
    sink: S,
    resolver: Option<Box<dyn EndpointResolver>>,
}

impl MethodMonitor<TracingSink> {
    /// Monitor emitting through `tracing`.
    pub fn new() -> Self {
        Self::with_sink(TracingSink)
    }
}

impl<S: LogSink> MethodMonitor<S> {
    /// Monitor emitting through a custom sink.
    pub fn with_sink(sink: S) -> Self {
        Self {
            sink,
            resolver: None,
        }
    }

    /// Register the per-framework endpoint resolver.
    pub fn with_resolver(mut self, resolver: impl EndpointResolver + 'static) -> Self {
        self.resolver = Some(Box::new(resolver));
        self
    }

    /// The sink this monitor emits through.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Start a timer for the identified method.
    ///
    /// The display name is class-qualified per config; the HTTP endpoint
    /// comes from the identity itself or, when auto-detection is enabled,
    /// from the registered resolver.
    pub fn start(
        &self,
        config: &MonitorConfig,
        identity: &MethodIdentity,
    ) -> MonitorResult<PerfTimer> {
        let display = identity.display_name(config.show_class_name);
        let endpoint = self.resolve_endpoint(config, identity);
        let prefix = endpoint.as_ref().map(HttpEndpoint::prefix);
        Ok(PerfTimer::start(&display, prefix.as_deref())?)
    }

    fn resolve_endpoint(
        &self,
        config: &MonitorConfig,
        identity: &MethodIdentity,
    ) -> Option<HttpEndpoint> {
        if let Some(route) = &identity.route {
            return Some(route.clone());
        }
        if !config.auto_detect_endpoints {
            return None;
        }
        self.resolver.as_ref().and_then(|r| r.resolve(identity))
    }

    /// Stop the timer and emit per configuration.
    ///
    /// Emits the individual summary when `log_each_timer` is set, mirrors
    /// fields into the ambient context when `mirror_to_context` is set, and
    /// dumps the full call tree when the timer is a root and
    /// `dump_call_stack` is set.
    pub fn stop_and_log(&self, config: &MonitorConfig, timer: &PerfTimer) -> MonitorResult<()> {
        timer.stop()?;
        self.emit(config, timer)
    }

    /// Apply an explicit outcome, then stop and emit.
    pub fn stop_and_log_with(
        &self,
        config: &MonitorConfig,
        timer: &PerfTimer,
        outcome: StopOutcome,
    ) -> MonitorResult<()> {
        if outcome.failed {
            timer.mark_failed()?;
        }
        for comment in outcome.comments {
            timer.add_comment(comment)?;
        }
        if let Some(count) = outcome.item_count {
            timer.set_item_count(count)?;
        }
        self.stop_and_log(config, timer)
    }

    fn emit(&self, config: &MonitorConfig, timer: &PerfTimer) -> MonitorResult<()> {
        let entry = timer.entry();

        if config.log_each_timer {
            let message = match config.output {
                OutputMode::Template => substitute(&config.message_template, &entry),
                OutputMode::Structured => serialize(config, &entry)?,
            };
            self.sink.log(config.level, &config.logger_name, &message);
        }

        if config.mirror_to_context {
            mirror_entry(&entry);
        }

        if timer.is_root() && config.dump_call_stack {
            let message = match config.output {
                OutputMode::Template => render_tree(timer),
                OutputMode::Structured => serialize(config, &tree_snapshot(timer))?,
            };
            self.sink.log(config.level, &config.logger_name, &message);
        }

        Ok(())
    }
}

fn substitute(template: &str, entry: &TimerEntry) -> String {
    let mut message = template
        .replace("{invoked}", &entry.display_name())
        .replace("{outcome}", &entry.outcome_phrase())
        .replace("{duration}", &format_duration_ms(entry.duration_ms));
    if !entry.comments.is_empty() {
        message.push_str(&format!(" Details: {}.", entry.comments.join(", ")));
    }
    message
}

fn serialize<T: Serialize>(config: &MonitorConfig, value: &T) -> MonitorResult<String> {
    Ok(match config.payload_style {
        PayloadStyle::Compact => serde_json::to_string(value)?,
        PayloadStyle::Pretty => serde_json::to_string_pretty(value)?,
    })
}

/// Each field lands in the ambient context only when applicable.
fn mirror_entry(entry: &TimerEntry) {
    mdc::put("operation", entry.display_name());
    mdc::put("duration_ms", entry.duration_ms.to_string());
    mdc::put("failed", entry.failed.to_string());
    mdc::put("chain_id", entry.chain_id.clone());
    if !entry.comments.is_empty() {
        mdc::put("comments", entry.comments.join(","));
    }
    if let Some(count) = entry.item_count {
        mdc::put("item_count", count.to_string());
    }
}
