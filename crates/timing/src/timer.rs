//! Hierarchical performance timers.
//!
//! A [`PerfTimer`] is a cheap-to-clone handle over one node of a per-thread
//! call tree. The tree is strict: a parent exclusively owns its children;
//! the child's parent link is a non-owning back-reference. Handles are
//! `!Send` by construction, so a timer can never be stopped from a thread
//! other than the one that started it.

use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::time::{Duration, Instant};

use chrono::Utc;
use uuid::Uuid;

use crate::context;
use crate::entry::TimerEntry;
use crate::error::{TimingError, TimingResult};

#[derive(Debug)]
struct TimerNode {
    entry: TimerEntry,
    /// Monotonic origin; durations never use the wall clock
    origin: Instant,
    running: bool,
    parent: Weak<RefCell<TimerNode>>,
    children: Vec<PerfTimer>,
}

/// Handle to one node of a per-thread timer tree.
///
/// Created running by [`PerfTimer::start`], stopped exactly once by
/// [`PerfTimer::stop`]; there is no way back to the running state.
#[derive(Debug, Clone)]
pub struct PerfTimer {
    inner: Rc<RefCell<TimerNode>>,
}

impl PerfTimer {
    /// Start a new timer and make it the calling thread's current timer.
    ///
    /// If the thread already has a current timer, the new one is appended to
    /// its children (insertion order is start order) and inherits its chain
    /// id; otherwise the new timer is a root with a fresh chain id.
    pub fn start(name: &str, http_endpoint: Option<&str>) -> TimingResult<PerfTimer> {
        if name.trim().is_empty() {
            return Err(TimingError::EmptyOperationName);
        }

        let parent = context::current();
        let chain_id = match &parent {
            Some(p) => p.inner.borrow().entry.chain_id.clone(),
            None => Uuid::new_v4().to_string(),
        };

        let timer = PerfTimer {
            inner: Rc::new(RefCell::new(TimerNode {
                entry: TimerEntry::with_context(
                    name,
                    http_endpoint.map(str::to_owned),
                    chain_id,
                ),
                origin: Instant::now(),
                running: true,
                parent: parent
                    .as_ref()
                    .map(|p| Rc::downgrade(&p.inner))
                    .unwrap_or_default(),
                children: Vec::new(),
            })),
        };

        if let Some(p) = &parent {
            p.inner.borrow_mut().children.push(timer.clone());
        }
        context::set_current(timer.clone());

        Ok(timer)
    }

    /// Stop the timer, finalize its entry, and restore the thread's slot.
    ///
    /// The slot is restored to the nearest still-running ancestor (or emptied
    /// for a root) — but only if it currently holds this timer; otherwise the
    /// restoration is a no-op. A second stop fails with
    /// [`TimingError::AlreadyStopped`], never a silent no-op.
    pub fn stop(&self) -> TimingResult<()> {
        {
            let mut node = self.inner.borrow_mut();
            if !node.running {
                return Err(TimingError::AlreadyStopped(node.entry.name.clone()));
            }
            node.running = false;
            node.entry.ended_at = Some(Utc::now());
            node.entry.duration_ms = node.origin.elapsed().as_millis() as u64;
            node.entry.recompute_average();
        }

        if context::current().is_some_and(|c| c.ptr_eq(self)) {
            context::replace(self.nearest_running_ancestor());
        }

        Ok(())
    }

    /// A stopped timer must never become current again, so restoration skips
    /// ancestors that were stopped out of order.
    fn nearest_running_ancestor(&self) -> Option<PerfTimer> {
        let mut cursor = self.parent();
        while let Some(timer) = cursor {
            if timer.is_running() {
                return Some(timer);
            }
            cursor = timer.parent();
        }
        None
    }

    /// Mark the monitored operation as failed.
    pub fn mark_failed(&self) -> TimingResult<()> {
        self.mutate(|entry| entry.failed = true)
    }

    /// Append a free-text comment.
    pub fn add_comment(&self, text: impl Into<String>) -> TimingResult<()> {
        let text = text.into();
        self.mutate(|entry| entry.comments.push(text))
    }

    /// Report how many items the operation processed.
    pub fn set_item_count(&self, count: u64) -> TimingResult<()> {
        self.mutate(|entry| entry.item_count = Some(count))
    }

    /// Entries are immutable once the timer stops.
    fn mutate(&self, f: impl FnOnce(&mut TimerEntry)) -> TimingResult<()> {
        let mut node = self.inner.borrow_mut();
        if !node.running {
            return Err(TimingError::AlreadyStopped(node.entry.name.clone()));
        }
        f(&mut node.entry);
        Ok(())
    }

    /// Whether the timer is still running.
    pub fn is_running(&self) -> bool {
        self.inner.borrow().running
    }

    /// Whether this timer has no parent.
    pub fn is_root(&self) -> bool {
        self.inner.borrow().parent.upgrade().is_none()
    }

    /// The parent timer, if any.
    pub fn parent(&self) -> Option<PerfTimer> {
        self.inner
            .borrow()
            .parent
            .upgrade()
            .map(|inner| PerfTimer { inner })
    }

    /// Child timers in start order.
    pub fn children(&self) -> Vec<PerfTimer> {
        self.inner.borrow().children.clone()
    }

    /// Whether two handles point at the same timer node.
    pub fn ptr_eq(&self, other: &PerfTimer) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    /// The operation name.
    pub fn name(&self) -> String {
        self.inner.borrow().entry.name.clone()
    }

    /// Monotonic time elapsed since start.
    pub fn elapsed(&self) -> Duration {
        self.inner.borrow().origin.elapsed()
    }

    /// Best-effort snapshot of the timing facts.
    ///
    /// A still-running timer reports its elapsed-so-far duration with no end
    /// timestamp; a stopped timer reports its finalized entry.
    pub fn entry(&self) -> TimerEntry {
        let node = self.inner.borrow();
        let mut entry = node.entry.clone();
        if node.running {
            entry.duration_ms = node.origin.elapsed().as_millis() as u64;
            entry.recompute_average();
        }
        entry
    }
}
