//! Invocation Monitoring
//!
//! Configuration-driven log generation for monitored method invocations,
//! built on the [`timing`] engine:
//!
//! - Per-timer summary lines and root-stop call-tree dumps
//! - Human-readable template output or fully structured payloads
//! - HTTP endpoint resolution behind a pluggable resolver trait
//! - Log-sink abstraction with a `tracing` adapter as the default
//! - Ambient logging context (MDC-style) mirroring of timing fields
//! - RAII scope guard binding one start/stop pairing
//!
//! The interception layer (proxy- or weaving-based) decides *which* methods
//! are monitored and calls [`MethodMonitor::start`] /
//! [`MethodMonitor::stop_and_log`] around them; this crate decides *what*
//! gets logged and *how* it is formatted. Exceptions from monitored code are
//! never caught here — marking the timer failed and still stopping it on
//! failure paths is the interception layer's contract, most easily met with
//! [`MonitoredScope`].
//!
//! # Example
//!
//! ```rust
//! use monitor::{MethodIdentity, MethodMonitor, MonitorConfig};
//!
//! let monitor = MethodMonitor::new();
//! let config = MonitorConfig::new().with_log_each_timer(true);
//!
//! let timer = monitor.start(&config, &MethodIdentity::new("save_document"))?;
//! // ... monitored code ...
//! monitor.stop_and_log(&config, &timer)?;
//! # Ok::<(), monitor::MonitorError>(())
//! ```
//!
//! # Modules
//!
//! - [`config`] - Monitoring configuration value object
//! - [`identity`] - Method identity and endpoint resolution
//! - [`sink`] - Logging backend abstraction
//! - [`mdc`] - Ambient logging context
//! - [`render`] - Call-tree rendering and snapshots
//! - [`logger`] - The orchestrator
//! - [`scope`] - RAII monitored scope

mod config;
mod error;
mod identity;
mod logger;
pub mod mdc;
mod render;
mod scope;
mod sink;

pub use config::{LogLevel, MonitorConfig, OutputMode, PayloadStyle};
pub use error::{MonitorError, MonitorResult};
pub use identity::{EndpointResolver, HttpEndpoint, MethodIdentity};
pub use logger::{MethodMonitor, StopOutcome};
pub use render::{render_tree, tree_snapshot, CallTreeNode};
pub use scope::MonitoredScope;
pub use sink::{LogRecord, LogSink, MemorySink, TracingSink};
