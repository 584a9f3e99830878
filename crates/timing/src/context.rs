//! Thread-local tracking of the current timer.
//!
//! Each thread owns one slot pointing at the innermost running timer of its
//! call chain. `start` attaches new timers under the slot's occupant and
//! replaces it; `stop` restores it. The slot is expected to be empty again
//! once the outermost timer of a chain stops — a timer left unstopped leaves
//! the slot corrupted for all later work on that thread (usage contract, not
//! detected by the engine). [`clear`] is the escape hatch for thread-pool
//! hygiene.

use std::cell::RefCell;

use crate::timer::PerfTimer;

thread_local! {
    static CURRENT: RefCell<Option<PerfTimer>> = const { RefCell::new(None) };
}

/// Get the calling thread's current timer, if any.
pub fn current() -> Option<PerfTimer> {
    CURRENT.with(|slot| slot.borrow().clone())
}

/// Whether the calling thread has an active timer.
pub fn has_current() -> bool {
    CURRENT.with(|slot| slot.borrow().is_some())
}

/// Forcibly empty the calling thread's slot.
///
/// Only changes which timer new `start` calls attach to; existing
/// parent/child links are untouched.
pub fn clear() {
    CURRENT.with(|slot| slot.borrow_mut().take());
}

/// Make `timer` the calling thread's current timer.
pub(crate) fn set_current(timer: PerfTimer) {
    CURRENT.with(|slot| *slot.borrow_mut() = Some(timer));
}

/// Replace the slot contents wholesale (used by `stop` restoration).
pub(crate) fn replace(timer: Option<PerfTimer>) {
    CURRENT.with(|slot| *slot.borrow_mut() = timer);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_starts_empty() {
        assert!(current().is_none());
        assert!(!has_current());
    }

    #[test]
    fn test_set_and_clear() {
        let timer = PerfTimer::start("op", None).unwrap();
        assert!(has_current());
        assert!(current().unwrap().ptr_eq(&timer));

        clear();
        assert!(current().is_none());
    }

    #[test]
    fn test_slots_are_thread_independent() {
        let _outer = PerfTimer::start("outer", None).unwrap();
        assert!(has_current());

        std::thread::spawn(|| {
            assert!(!has_current());
            let _inner = PerfTimer::start("inner", None).unwrap();
            assert!(current().unwrap().is_root());
        })
        .join()
        .unwrap();

        // The spawned thread never touched this thread's slot.
        assert_eq!(current().unwrap().name(), "outer");
        clear();
    }
}
