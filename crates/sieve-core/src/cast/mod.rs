//! Type caster registry.
//!
//! One caster per scalar kind, registered explicitly when the registry is
//! built. Enum kinds are parameterized by their member list and are cast by
//! exact member name outside the table.


use crate::{
    error::ErrorSet,
    model::FieldKind,
    value::{
        EnumValue, Value, YearMonth, ZonedDateTime, parse_instant, parse_local_date,
        parse_local_date_time, parse_local_time, parse_offset_date_time, parse_year,
    },
};
use num_bigint::BigInt;
use rust_decimal::Decimal;
use sieve_primitives::ScalarKind;
use std::{
    collections::BTreeMap,
    fmt,
    str::FromStr,
    sync::{Arc, LazyLock},
};
use thiserror::Error as ThisError;
use ulid::Ulid;
use uuid::Uuid;

/// Literal accepted by the boolean caster as an absent value.
pub const NULL_LITERAL: &str = "null";

static BUILTIN: LazyLock<Arc<CasterRegistry>> =
    LazyLock::new(|| Arc::new(CasterRegistry::builtin()));

///
/// CastError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum CastError {
    #[error("empty input cannot be converted to {kind}")]
    Empty { kind: String },

    #[error("'{input}' is not a valid {kind}: {reason}")]
    Invalid {
        kind: ScalarKind,
        input: String,
        reason: String,
    },

    #[error("'{input}' is not a member of enum {enum_name}")]
    UnknownMember { enum_name: String, input: String },

    #[error("a value is required for {kind}")]
    Missing { kind: String },

    #[error("no caster registered for {kind}")]
    Unregistered { kind: ScalarKind },
}

impl CastError {
    fn invalid(kind: ScalarKind, input: &str, reason: impl fmt::Display) -> Self {
        Self::Invalid {
            kind,
            input: input.to_string(),
            reason: reason.to_string(),
        }
    }
}

/// Signature of one registered caster. `Ok(None)` means the input denotes an
/// absent value.
pub type CastFn = fn(&str) -> Result<Option<Value>, CastError>;

///
/// CasterRegistry
///
/// Read-only after construction; shared across concurrent resolution passes.
///

#[derive(Clone, Default)]
pub struct CasterRegistry {
    casters: BTreeMap<ScalarKind, CastFn>,
}

impl CasterRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) the caster for `kind`.
    #[must_use]
    pub fn register(mut self, kind: ScalarKind, caster: CastFn) -> Self {
        self.casters.insert(kind, caster);
        self
    }

    /// Registry populated with a caster for every built-in scalar kind.
    #[must_use]
    pub fn builtin() -> Self {
        Self::new()
            .register(ScalarKind::Bool, cast_bool)
            .register(ScalarKind::Char, cast_char)
            .register(ScalarKind::Int8, cast_int8)
            .register(ScalarKind::Int16, cast_int16)
            .register(ScalarKind::Int32, cast_int32)
            .register(ScalarKind::Int64, cast_int64)
            .register(ScalarKind::Int128, cast_int128)
            .register(ScalarKind::Uint8, cast_uint8)
            .register(ScalarKind::Uint16, cast_uint16)
            .register(ScalarKind::Uint32, cast_uint32)
            .register(ScalarKind::Uint64, cast_uint64)
            .register(ScalarKind::Uint128, cast_uint128)
            .register(ScalarKind::Float32, cast_float32)
            .register(ScalarKind::Float64, cast_float64)
            .register(ScalarKind::BigInt, cast_big_int)
            .register(ScalarKind::Decimal, cast_decimal)
            .register(ScalarKind::Uuid, cast_uuid)
            .register(ScalarKind::Ulid, cast_ulid)
            .register(ScalarKind::Instant, cast_instant)
            .register(ScalarKind::OffsetDateTime, cast_offset_date_time)
            .register(ScalarKind::ZonedDateTime, cast_zoned_date_time)
            .register(ScalarKind::LocalDate, cast_local_date)
            .register(ScalarKind::LocalTime, cast_local_time)
            .register(ScalarKind::LocalDateTime, cast_local_date_time)
            .register(ScalarKind::Year, cast_year)
            .register(ScalarKind::YearMonth, cast_year_month)
            .register(ScalarKind::Text, cast_text)
    }

    /// Process-wide built-in registry, built on first use.
    #[must_use]
    pub fn shared() -> Arc<Self> {
        Arc::clone(&BUILTIN)
    }

    #[must_use]
    pub fn contains(&self, kind: ScalarKind) -> bool {
        self.casters.contains_key(&kind)
    }

    /// Convert one raw input. An absent input is absent for text and an
    /// error for every other kind.
    pub fn cast(&self, kind: &FieldKind, raw: Option<&str>) -> Result<Option<Value>, CastError> {
        let Some(raw) = raw else {
            return match kind {
                FieldKind::Scalar(ScalarKind::Text) => Ok(None),
                _ => Err(CastError::Missing {
                    kind: kind.to_string(),
                }),
            };
        };

        match kind {
            FieldKind::Scalar(ScalarKind::Text) => cast_text(raw),
            _ if raw.is_empty() => Err(CastError::Empty {
                kind: kind.to_string(),
            }),
            FieldKind::Scalar(scalar) => {
                let caster = self
                    .casters
                    .get(scalar)
                    .ok_or(CastError::Unregistered { kind: *scalar })?;

                caster(raw)
            }
            FieldKind::Enum(ty) => ty
                .member(raw)
                .map(|member| Some(Value::Enum(EnumValue::new(ty.name(), member))))
                .ok_or_else(|| CastError::UnknownMember {
                    enum_name: ty.name().to_string(),
                    input: raw.to_string(),
                }),
        }
    }

    /// Cast without propagating: a failure is written to `errors` under
    /// `field` (the original input token) and yields an absent value.
    pub fn safe_cast(
        &self,
        kind: &FieldKind,
        raw: &str,
        field: &str,
        errors: &mut ErrorSet,
    ) -> Option<Value> {
        match self.cast(kind, Some(raw)) {
            Ok(value) => value,
            Err(_) => {
                errors.cast_failed(field, Some(raw), kind);
                None
            }
        }
    }

    /// `safe_cast` every raw value, keeping positions.
    pub fn safe_cast_all(
        &self,
        kind: &FieldKind,
        raws: &[String],
        field: &str,
        errors: &mut ErrorSet,
    ) -> Vec<Option<Value>> {
        raws.iter()
            .map(|raw| self.safe_cast(kind, raw, field, errors))
            .collect()
    }
}

impl fmt::Debug for CasterRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CasterRegistry")
            .field("kinds", &self.casters.keys().collect::<Vec<_>>())
            .finish()
    }
}

///
/// BUILT-IN CASTERS
///

macro_rules! from_str_casters {
    ($($name:ident => $kind:ident($ty:ty)),* $(,)?) => {
        $(
            fn $name(raw: &str) -> Result<Option<Value>, CastError> {
                <$ty>::from_str(raw)
                    .map(|v| Some(Value::$kind(v)))
                    .map_err(|err| CastError::invalid(ScalarKind::$kind, raw, err))
            }
        )*
    };
}

from_str_casters! {
    cast_int8 => Int8(i8),
    cast_int16 => Int16(i16),
    cast_int32 => Int32(i32),
    cast_int64 => Int64(i64),
    cast_int128 => Int128(i128),
    cast_uint8 => Uint8(u8),
    cast_uint16 => Uint16(u16),
    cast_uint32 => Uint32(u32),
    cast_uint64 => Uint64(u64),
    cast_uint128 => Uint128(u128),
    cast_float32 => Float32(f32),
    cast_float64 => Float64(f64),
    cast_big_int => BigInt(BigInt),
}

// "null" maps to an absent value rather than an error; clients rely on it.
fn cast_bool(raw: &str) -> Result<Option<Value>, CastError> {
    if raw == NULL_LITERAL {
        return Ok(None);
    }
    if raw.eq_ignore_ascii_case("true") {
        return Ok(Some(Value::Bool(true)));
    }
    if raw.eq_ignore_ascii_case("false") {
        return Ok(Some(Value::Bool(false)));
    }

    Err(CastError::invalid(
        ScalarKind::Bool,
        raw,
        "expected 'true' or 'false'",
    ))
}

fn cast_char(raw: &str) -> Result<Option<Value>, CastError> {
    raw.chars()
        .next()
        .map(|c| Some(Value::Char(c)))
        .ok_or_else(|| CastError::Empty {
            kind: ScalarKind::Char.to_string(),
        })
}

fn cast_decimal(raw: &str) -> Result<Option<Value>, CastError> {
    Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .map(|d| Some(Value::Decimal(d)))
        .map_err(|err| CastError::invalid(ScalarKind::Decimal, raw, err))
}

fn cast_uuid(raw: &str) -> Result<Option<Value>, CastError> {
    Uuid::parse_str(raw)
        .map(|id| Some(Value::Uuid(id)))
        .map_err(|err| CastError::invalid(ScalarKind::Uuid, raw, err))
}

fn cast_ulid(raw: &str) -> Result<Option<Value>, CastError> {
    Ulid::from_string(raw)
        .map(|id| Some(Value::Ulid(id)))
        .map_err(|err| CastError::invalid(ScalarKind::Ulid, raw, err))
}

fn cast_text(raw: &str) -> Result<Option<Value>, CastError> {
    Ok(Some(Value::Text(raw.to_string())))
}

// temporal

fn temporal<T>(
    kind: ScalarKind,
    raw: &str,
    parsed: Option<T>,
    wrap: fn(T) -> Value,
    expected: &str,
) -> Result<Option<Value>, CastError> {
    parsed
        .map(|v| Some(wrap(v)))
        .ok_or_else(|| CastError::invalid(kind, raw, format!("expected {expected}")))
}

fn cast_instant(raw: &str) -> Result<Option<Value>, CastError> {
    temporal(
        ScalarKind::Instant,
        raw,
        parse_instant(raw),
        Value::Instant,
        "an RFC 3339 timestamp",
    )
}

fn cast_offset_date_time(raw: &str) -> Result<Option<Value>, CastError> {
    temporal(
        ScalarKind::OffsetDateTime,
        raw,
        parse_offset_date_time(raw),
        Value::OffsetDateTime,
        "YYYY-MM-DDThh:mm[:ss[.f]]+hh:mm",
    )
}

fn cast_zoned_date_time(raw: &str) -> Result<Option<Value>, CastError> {
    temporal(
        ScalarKind::ZonedDateTime,
        raw,
        ZonedDateTime::parse(raw),
        Value::ZonedDateTime,
        "YYYY-MM-DDThh:mm[:ss[.f]]+hh:mm[Region/City]",
    )
}

fn cast_local_date(raw: &str) -> Result<Option<Value>, CastError> {
    temporal(
        ScalarKind::LocalDate,
        raw,
        parse_local_date(raw),
        Value::LocalDate,
        "YYYY-MM-DD",
    )
}

fn cast_local_time(raw: &str) -> Result<Option<Value>, CastError> {
    temporal(
        ScalarKind::LocalTime,
        raw,
        parse_local_time(raw),
        Value::LocalTime,
        "hh:mm[:ss[.f]]",
    )
}

fn cast_local_date_time(raw: &str) -> Result<Option<Value>, CastError> {
    temporal(
        ScalarKind::LocalDateTime,
        raw,
        parse_local_date_time(raw),
        Value::LocalDateTime,
        "YYYY-MM-DDThh:mm[:ss[.f]]",
    )
}

fn cast_year(raw: &str) -> Result<Option<Value>, CastError> {
    temporal(ScalarKind::Year, raw, parse_year(raw), Value::Year, "YYYY")
}

fn cast_year_month(raw: &str) -> Result<Option<Value>, CastError> {
    temporal(
        ScalarKind::YearMonth,
        raw,
        YearMonth::parse(raw),
        Value::YearMonth,
        "YYYY-MM",
    )
}
