use crate::value::{Bucketed, Value};
use sieve_primitives::ScalarKind;
use std::{
    collections::BTreeMap,
    fmt,
    sync::{Arc, LazyLock},
};
use time::{Date, Month, OffsetDateTime, PrimitiveDateTime, UtcOffset};

static BUILTIN: LazyLock<Arc<BucketRegistry>> =
    LazyLock::new(|| Arc::new(BucketRegistry::builtin()));

/// Converts one temporal value into its bucket. `None` when the value is not
/// representable in the bucket.
pub type BucketFn = fn(&Value) -> Option<Bucketed>;

///
/// BucketRegistry
///
/// Per-kind temporal conversions applied before ordering comparisons.
/// Instants and offset or zoned date-times become UTC timestamps.
///

#[derive(Clone, Default)]
pub struct BucketRegistry {
    converters: BTreeMap<ScalarKind, BucketFn>,
}

impl BucketRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn register(mut self, kind: ScalarKind, converter: BucketFn) -> Self {
        self.converters.insert(kind, converter);
        self
    }

    #[must_use]
    pub fn builtin() -> Self {
        Self::new()
            .register(ScalarKind::Instant, bucket_offset)
            .register(ScalarKind::OffsetDateTime, bucket_offset)
            .register(ScalarKind::ZonedDateTime, bucket_zoned)
            .register(ScalarKind::LocalDateTime, bucket_local_date_time)
            .register(ScalarKind::LocalDate, bucket_local_date)
            .register(ScalarKind::Year, bucket_year)
            .register(ScalarKind::YearMonth, bucket_year_month)
            .register(ScalarKind::LocalTime, bucket_local_time)
    }

    #[must_use]
    pub fn shared() -> Arc<Self> {
        Arc::clone(&BUILTIN)
    }

    #[must_use]
    pub fn contains(&self, kind: ScalarKind) -> bool {
        self.converters.contains_key(&kind)
    }

    /// Bucket `value` if it is temporal; other values pass through.
    #[must_use]
    pub fn apply(&self, value: Value) -> Option<Value> {
        match value.scalar_kind() {
            Some(kind) if kind.is_temporal() => {
                let converter = self.converters.get(&kind)?;
                converter(&value).map(Value::Bucketed)
            }
            _ => Some(value),
        }
    }
}

impl fmt::Debug for BucketRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BucketRegistry")
            .field("kinds", &self.converters.keys().collect::<Vec<_>>())
            .finish()
    }
}

fn utc_timestamp(value: OffsetDateTime) -> Bucketed {
    let utc = value.to_offset(UtcOffset::UTC);
    Bucketed::Timestamp(PrimitiveDateTime::new(utc.date(), utc.time()))
}

fn bucket_offset(value: &Value) -> Option<Bucketed> {
    match value {
        Value::Instant(v) | Value::OffsetDateTime(v) => Some(utc_timestamp(*v)),
        _ => None,
    }
}

fn bucket_zoned(value: &Value) -> Option<Bucketed> {
    match value {
        Value::ZonedDateTime(v) => Some(utc_timestamp(v.date_time)),
        _ => None,
    }
}

fn bucket_local_date_time(value: &Value) -> Option<Bucketed> {
    match value {
        Value::LocalDateTime(v) => Some(Bucketed::Timestamp(*v)),
        _ => None,
    }
}

fn bucket_local_date(value: &Value) -> Option<Bucketed> {
    match value {
        Value::LocalDate(v) => Some(Bucketed::Date(*v)),
        _ => None,
    }
}

fn bucket_year(value: &Value) -> Option<Bucketed> {
    match value {
        Value::Year(year) => Date::from_calendar_date(*year, Month::January, 1)
            .ok()
            .map(Bucketed::Date),
        _ => None,
    }
}

fn bucket_year_month(value: &Value) -> Option<Bucketed> {
    match value {
        Value::YearMonth(v) => v.first_day().map(Bucketed::Date),
        _ => None,
    }
}

fn bucket_local_time(value: &Value) -> Option<Bucketed> {
    match value {
        Value::LocalTime(v) => Some(Bucketed::Time(*v)),
        _ => None,
    }
}
