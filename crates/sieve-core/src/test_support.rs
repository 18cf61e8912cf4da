//! Shared fixtures for unit tests.

use crate::{
    error::ErrorSet,
    message::DefaultMessages,
    model::{EntityModel, FieldKind, StaticSchema},
    obs::{EventSink, ResolveEvent},
};
use sieve_primitives::ScalarKind;
use std::{cell::RefCell, sync::Arc};

/// `employee -> manager (employee) -> department`, plus a few leaf kinds
/// per family.
pub(crate) fn schema() -> Arc<StaticSchema> {
    let status = FieldKind::enumeration("Status", ["Active", "OnLeave", "Retired"]);

    let schema = StaticSchema::new([
        EntityModel::new("employee", "id")
            .field("id", ScalarKind::Int64)
            .field("name", ScalarKind::Text)
            .field("age", ScalarKind::Int32)
            .field("salary", ScalarKind::Decimal)
            .field("active", ScalarKind::Bool)
            .field("status", status)
            .field("hired_on", ScalarKind::LocalDate)
            .field("starts_at", ScalarKind::LocalTime)
            .field("updated_at", ScalarKind::Instant)
            .association("manager", "employee")
            .association("department", "department"),
        EntityModel::new("department", "code")
            .field("code", ScalarKind::Text)
            .field("name", ScalarKind::Text)
            .field("budget", ScalarKind::Int64),
    ]);

    match schema {
        Ok(schema) => Arc::new(schema),
        Err(err) => panic!("test schema must validate: {err}"),
    }
}

pub(crate) fn error_set() -> ErrorSet {
    ErrorSet::new("filter", Arc::new(DefaultMessages))
}

///
/// CaptureSink
/// Records a short label per event.
///

#[derive(Default)]
pub(crate) struct CaptureSink {
    events: RefCell<Vec<String>>,
}

impl CaptureSink {
    pub(crate) fn labels(&self) -> Vec<String> {
        self.events.borrow().clone()
    }

    pub(crate) fn count(&self, prefix: &str) -> usize {
        self.events
            .borrow()
            .iter()
            .filter(|label| label.starts_with(prefix))
            .count()
    }
}

impl EventSink for CaptureSink {
    fn record(&self, event: &ResolveEvent<'_>) {
        let label = match event {
            ResolveEvent::PassStart { pass, .. } => format!("pass_start:{pass}"),
            ResolveEvent::PassFinish { pass, .. } => format!("pass_finish:{pass}"),
            ResolveEvent::Unconfigured { field, .. } => format!("unconfigured:{field}"),
            ResolveEvent::Overridden { key, .. } => format!("overridden:{key}"),
            ResolveEvent::JoinCreated { attribute, .. } => format!("join_created:{attribute}"),
            ResolveEvent::JoinReused { attribute, .. } => format!("join_reused:{attribute}"),
            ResolveEvent::FieldRejected { field, .. } => format!("rejected:{field}"),
        };
        self.events.borrow_mut().push(label);
    }
}
