//! Ambient logging context.
//!
//! A thread-local key-value store in the style of an MDC: downstream log
//! sinks can attach its contents to every line they emit. The orchestrator
//! mirrors selected timing fields here when configured; anything else is up
//! to the application.

use std::cell::RefCell;
use std::collections::BTreeMap;

thread_local! {
    static CONTEXT: RefCell<BTreeMap<String, String>> = RefCell::new(BTreeMap::new());
}

/// Store a key-value pair in the calling thread's context.
pub fn put(key: impl Into<String>, value: impl Into<String>) {
    CONTEXT.with(|ctx| {
        ctx.borrow_mut().insert(key.into(), value.into());
    });
}

/// Look up a value in the calling thread's context.
pub fn get(key: &str) -> Option<String> {
    CONTEXT.with(|ctx| ctx.borrow().get(key).cloned())
}

/// Remove a key, returning its previous value.
pub fn remove(key: &str) -> Option<String> {
    CONTEXT.with(|ctx| ctx.borrow_mut().remove(key))
}

/// Empty the calling thread's context.
pub fn clear() {
    CONTEXT.with(|ctx| ctx.borrow_mut().clear());
}

/// Whether the calling thread's context holds no entries.
pub fn is_empty() -> bool {
    CONTEXT.with(|ctx| ctx.borrow().is_empty())
}

/// Copy of the calling thread's context, keys in sorted order.
pub fn snapshot() -> BTreeMap<String, String> {
    CONTEXT.with(|ctx| ctx.borrow().clone())
}
