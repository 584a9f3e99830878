//! Monitoring configuration value object.

use serde::{Deserialize, Serialize};

/// Severity at which monitoring output is emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum LogLevel {
    Trace,
    #[default]
    Debug,
    Info,
    Warn,
    Error,
}

/// Shape of the emitted output. The two modes are mutually exclusive per
/// invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum OutputMode {
    /// Human-readable message built by template substitution
    #[default]
    Template,
    /// Fully structured payload (serialized timing record)
    Structured,
}

/// Layout of structured payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum PayloadStyle {
    #[default]
    Compact,
    Pretty,
}

/// Configuration for one monitored invocation.
///
/// Supplied by the interception layer on every `start`/`stop_and_log` pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitorConfig {
    /// Severity of emitted log lines
    pub level: LogLevel,
    /// Logical logger name forwarded to the sink
    pub logger_name: String,
    /// Qualify operation names with the enclosing type
    pub show_class_name: bool,
    /// Render the full call tree when a root timer stops
    pub dump_call_stack: bool,
    /// Emit one summary line per timer as it stops
    pub log_each_timer: bool,
    /// Template vs. structured output
    pub output: OutputMode,
    /// Compact vs. pretty structured payloads
    pub payload_style: PayloadStyle,
    /// Mirror selected fields into the ambient logging context
    pub mirror_to_context: bool,
    /// Ask the registered resolver for HTTP routing metadata
    pub auto_detect_endpoints: bool,
    /// Per-timer message template; `{invoked}` and `{outcome}` are
    /// substituted, `{duration}` is also available
    pub message_template: String,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::default(),
            logger_name: "monitor".to_string(),
            show_class_name: false,
            dump_call_stack: true,
            log_each_timer: false,
            output: OutputMode::default(),
            payload_style: PayloadStyle::default(),
            mirror_to_context: false,
            auto_detect_endpoints: true,
            message_template: "{invoked} {outcome}".to_string(),
        }
    }
}

impl MonitorConfig {
    /// Create a config with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the emission severity.
    pub fn with_level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }

    /// Set the logical logger name.
    pub fn with_logger_name(mut self, name: &str) -> Self {
        self.logger_name = name.to_string();
        self
    }

    /// Qualify operation names with the enclosing type.
    pub fn with_show_class_name(mut self, show: bool) -> Self {
        self.show_class_name = show;
        self
    }

    /// Enable or disable the root-stop call-tree dump.
    pub fn with_dump_call_stack(mut self, dump: bool) -> Self {
        self.dump_call_stack = dump;
        self
    }

    /// Enable or disable per-timer summary lines.
    pub fn with_log_each_timer(mut self, each: bool) -> Self {
        self.log_each_timer = each;
        self
    }

    /// Choose template or structured output.
    pub fn with_output(mut self, output: OutputMode) -> Self {
        self.output = output;
        self
    }

    /// Choose compact or pretty structured payloads.
    pub fn with_payload_style(mut self, style: PayloadStyle) -> Self {
        self.payload_style = style;
        self
    }

    /// Mirror selected fields into the ambient logging context.
    pub fn with_mirror_to_context(mut self, mirror: bool) -> Self {
        self.mirror_to_context = mirror;
        self
    }

    /// Enable or disable endpoint auto-detection.
    pub fn with_auto_detect_endpoints(mut self, detect: bool) -> Self {
        self.auto_detect_endpoints = detect;
        self
    }

    /// Override the per-timer message template.
    pub fn with_message_template(mut self, template: &str) -> Self {
        self.message_template = template.to_string();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = MonitorConfig::default();
        assert_eq!(config.level, LogLevel::Debug);
        assert_eq!(config.logger_name, "monitor");
        assert!(!config.show_class_name);
        assert!(config.dump_call_stack);
        assert!(!config.log_each_timer);
        assert_eq!(config.output, OutputMode::Template);
        assert_eq!(config.payload_style, PayloadStyle::Compact);
        assert!(!config.mirror_to_context);
        assert!(config.auto_detect_endpoints);
        assert_eq!(config.message_template, "{invoked} {outcome}");
    }

    #[test]
    fn test_builder_chain() {
        let config = MonitorConfig::new()
            .with_level(LogLevel::Info)
            .with_logger_name("perf.api")
            .with_show_class_name(true)
            .with_dump_call_stack(false)
            .with_log_each_timer(true)
            .with_output(OutputMode::Structured)
            .with_payload_style(PayloadStyle::Pretty)
            .with_mirror_to_context(true)
            .with_auto_detect_endpoints(false)
            .with_message_template("{invoked}: {outcome}");

        assert_eq!(config.level, LogLevel::Info);
        assert_eq!(config.logger_name, "perf.api");
        assert!(config.show_class_name);
        assert!(!config.dump_call_stack);
        assert!(config.log_each_timer);
        assert_eq!(config.output, OutputMode::Structured);
        assert_eq!(config.payload_style, PayloadStyle::Pretty);
        assert!(config.mirror_to_context);
        assert!(!config.auto_detect_endpoints);
        assert_eq!(config.message_template, "{invoked}: {outcome}");
    }

    #[test]
    fn test_config_serialization_roundtrip() {
        let config = MonitorConfig::new().with_level(LogLevel::Warn);
        let json = serde_json::to_string(&config).unwrap();
        let parsed: MonitorConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.level, LogLevel::Warn);
        assert_eq!(parsed.logger_name, config.logger_name);
    }
}
