//! Event sink boundary.
//!
//! Resolution code MUST NOT touch `obs::metrics` or `tracing` directly.
//! All instrumentation flows through `ResolveEvent` and `EventSink`; this
//! module is the only bridge to counters and log output.

use crate::{error::ErrorKind, obs::metrics, wrapper::SourceType};
use std::{cell::RefCell, fmt, rc::Rc};

thread_local! {
    static SINK_OVERRIDE: RefCell<Option<Rc<dyn EventSink>>> = RefCell::new(None);
}

///
/// PassKind
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PassKind {
    Filter,
    Sort,
}

impl fmt::Display for PassKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Filter => "filter",
            Self::Sort => "sort",
        };
        write!(f, "{label}")
    }
}

///
/// ResolveEvent
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ResolveEvent<'a> {
    PassStart {
        pass: PassKind,
        entity: &'a str,
    },
    PassFinish {
        pass: PassKind,
        entity: &'a str,
        resolved: usize,
        rejected: usize,
    },
    /// A wrapper matched no policy and was dropped.
    Unconfigured {
        field: &'a str,
        source: SourceType,
    },
    /// A later source replaced an earlier wrapper with the same key.
    Overridden {
        key: &'a str,
        source: SourceType,
    },
    JoinCreated {
        entity: &'a str,
        attribute: &'a str,
    },
    JoinReused {
        entity: &'a str,
        attribute: &'a str,
    },
    FieldRejected {
        field: &'a str,
        kind: ErrorKind,
    },
}

///
/// EventSink
///

pub trait EventSink {
    fn record(&self, event: &ResolveEvent<'_>);
}

///
/// TracingSink
///
/// Default sink: structured `tracing` events. Unconfigured fields are the
/// one soft warning; everything else is debug-level flow.
///

#[derive(Clone, Copy, Debug, Default)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn record(&self, event: &ResolveEvent<'_>) {
        match *event {
            ResolveEvent::PassStart { pass, entity } => {
                tracing::debug!(%pass, entity, "resolution pass started");
            }
            ResolveEvent::PassFinish {
                pass,
                entity,
                resolved,
                rejected,
            } => {
                tracing::debug!(%pass, entity, resolved, rejected, "resolution pass finished");
            }
            ResolveEvent::Unconfigured { field, source } => {
                tracing::warn!(field, ?source, "dropping filter or sort with no matching policy");
            }
            ResolveEvent::Overridden { key, source } => {
                tracing::debug!(key, ?source, "later source overrides earlier wrapper");
            }
            ResolveEvent::JoinCreated { entity, attribute } => {
                tracing::trace!(entity, attribute, "join created");
            }
            ResolveEvent::JoinReused { entity, attribute } => {
                tracing::trace!(entity, attribute, "join reused");
            }
            ResolveEvent::FieldRejected { field, kind } => {
                tracing::debug!(field, ?kind, "field rejected");
            }
        }
    }
}

/// Record one event: update counters, then forward to the active sink.
pub(crate) fn record(event: &ResolveEvent<'_>) {
    metrics::with_state_mut(|m| match event {
        ResolveEvent::PassStart { pass, .. } => match pass {
            PassKind::Filter => m.filter_passes = m.filter_passes.saturating_add(1),
            PassKind::Sort => m.sort_passes = m.sort_passes.saturating_add(1),
        },
        ResolveEvent::PassFinish { resolved, .. } => {
            let resolved = u64::try_from(*resolved).unwrap_or(u64::MAX);
            m.items_resolved = m.items_resolved.saturating_add(resolved);
        }
        ResolveEvent::Unconfigured { .. } => {
            m.unconfigured_dropped = m.unconfigured_dropped.saturating_add(1);
        }
        ResolveEvent::Overridden { .. } => m.overrides = m.overrides.saturating_add(1),
        ResolveEvent::JoinCreated { .. } => {
            m.joins_created = m.joins_created.saturating_add(1);
        }
        ResolveEvent::JoinReused { .. } => m.joins_reused = m.joins_reused.saturating_add(1),
        ResolveEvent::FieldRejected { .. } => {
            m.fields_rejected = m.fields_rejected.saturating_add(1);
        }
    });

    let sink = SINK_OVERRIDE.with(|cell| cell.borrow().clone());
    match sink {
        Some(sink) => sink.record(event),
        None => TracingSink.record(event),
    }
}

/// Run `f` with `sink` installed as the event sink for the current thread.
/// The previous sink is restored afterwards, including on unwind.
pub fn with_sink<T>(sink: Rc<dyn EventSink>, f: impl FnOnce() -> T) -> T {
    struct Restore(Option<Rc<dyn EventSink>>);

    impl Drop for Restore {
        fn drop(&mut self) {
            let previous = self.0.take();
            SINK_OVERRIDE.with(|cell| *cell.borrow_mut() = previous);
        }
    }

    let previous = SINK_OVERRIDE.with(|cell| cell.borrow_mut().replace(sink));
    let _restore = Restore(previous);

    f()
}
