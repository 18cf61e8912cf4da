//! Observability: resolution events, counters, and sink abstractions.
//!
//! Resolution logic never logs directly; every signal flows through
//! `ResolveEvent` and the active `EventSink`.

pub(crate) mod metrics;
pub(crate) mod sink;

// re-exports
pub use metrics::{EventReport, metrics_report, metrics_reset};
pub use sink::{EventSink, PassKind, ResolveEvent, TracingSink, with_sink};
