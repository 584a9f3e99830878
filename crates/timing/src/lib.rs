//! Performance Timing Engine
//!
//! This crate provides the state-machine core for method-invocation
//! monitoring:
//! - Hierarchical per-thread timers with parent/child call-chain linkage
//! - Thread-local current-timer tracking so nesting needs no parameter
//!   threading
//! - Timing records (duration, failure flag, comments, item throughput)
//!   ready for rendering or structured serialization
//! - Locale-free duration formatting
//!
//! Durations are measured on the monotonic clock; wall-clock timestamps are
//! recorded only for human-readable display.
//!
//! # Example
//!
//! ```rust
//! use timing::PerfTimer;
//!
//! let outer = PerfTimer::start("save_document", None)?;
//! let inner = PerfTimer::start("serialize", None)?;
//! // ... serialize ...
//! inner.stop()?;
//! outer.stop()?;
//!
//! assert!(inner.parent().unwrap().ptr_eq(&outer));
//! # Ok::<(), timing::TimingError>(())
//! ```
//!
//! # Usage contract
//!
//! Every started timer must be stopped on every exit path; an unstopped
//! timer leaves the thread-local slot pointing at it, corrupting later
//! timing on that thread. [`context::clear`] exists for thread-pool hygiene
//! but the engine performs no automatic detection or repair.

pub mod context;
mod entry;
mod error;
mod format;
mod timer;

pub use entry::TimerEntry;
pub use error::{TimingError, TimingResult};
pub use format::format_duration_ms;
pub use timer::PerfTimer;
