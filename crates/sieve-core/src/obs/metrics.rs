//! Per-thread resolution counters.
//!
//! Resolution passes are single-threaded, so counters live in a
//! thread-local and are updated without locking.

use serde::Serialize;
use std::cell::RefCell;

thread_local! {
    static STATE: RefCell<EventReport> = RefCell::new(EventReport::default());
}

///
/// EventReport
///

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct EventReport {
    pub filter_passes: u64,
    pub sort_passes: u64,
    pub items_resolved: u64,
    pub unconfigured_dropped: u64,
    pub overrides: u64,
    pub joins_created: u64,
    pub joins_reused: u64,
    pub fields_rejected: u64,
}

pub(crate) fn with_state_mut<R>(f: impl FnOnce(&mut EventReport) -> R) -> R {
    STATE.with(|state| f(&mut state.borrow_mut()))
}

/// Snapshot of the counters on the current thread.
#[must_use]
pub fn metrics_report() -> EventReport {
    STATE.with(|state| state.borrow().clone())
}

/// Reset the counters on the current thread.
pub fn metrics_reset() {
    with_state_mut(|state| *state = EventReport::default());
}
