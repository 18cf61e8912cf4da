mod temporal;


use crate::model::FieldKind;
use num_bigint::BigInt;
use rust_decimal::Decimal;
use sieve_primitives::ScalarKind;
use std::fmt;
use time::{Date, OffsetDateTime, PrimitiveDateTime, Time};
use ulid::Ulid;
use uuid::Uuid;

// re-exports
pub use temporal::{Bucketed, YearMonth, ZonedDateTime};
pub(crate) use temporal::{
    parse_instant, parse_local_date, parse_local_date_time, parse_local_time,
    parse_offset_date_time, parse_year,
};

///
/// Value
///
/// Typed operand produced by casting one raw string against a field kind.
/// Absent values are modelled as `Option<Value>` by callers, never as a
/// variant, so a typed-value sequence can carry holes positionally.
///

#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Bool(bool),
    Char(char),
    Int8(i8),
    Int16(i16),
    Int32(i32),
    Int64(i64),
    Int128(i128),
    Uint8(u8),
    Uint16(u16),
    Uint32(u32),
    Uint64(u64),
    Uint128(u128),
    Float32(f32),
    Float64(f64),
    BigInt(BigInt),
    Decimal(Decimal),
    Uuid(Uuid),
    Ulid(Ulid),
    /// Always normalized to UTC.
    Instant(OffsetDateTime),
    OffsetDateTime(OffsetDateTime),
    ZonedDateTime(ZonedDateTime),
    LocalDate(Date),
    LocalTime(Time),
    LocalDateTime(PrimitiveDateTime),
    Year(i32),
    YearMonth(YearMonth),
    Text(String),
    Enum(EnumValue),

    /// Temporal value after conversion into its legacy bucket.
    Bucketed(Bucketed),
}

impl Value {
    /// Scalar kind this value was cast as, if it is a registry scalar.
    #[must_use]
    pub const fn scalar_kind(&self) -> Option<ScalarKind> {
        let kind = match self {
            Self::Bool(_) => ScalarKind::Bool,
            Self::Char(_) => ScalarKind::Char,
            Self::Int8(_) => ScalarKind::Int8,
            Self::Int16(_) => ScalarKind::Int16,
            Self::Int32(_) => ScalarKind::Int32,
            Self::Int64(_) => ScalarKind::Int64,
            Self::Int128(_) => ScalarKind::Int128,
            Self::Uint8(_) => ScalarKind::Uint8,
            Self::Uint16(_) => ScalarKind::Uint16,
            Self::Uint32(_) => ScalarKind::Uint32,
            Self::Uint64(_) => ScalarKind::Uint64,
            Self::Uint128(_) => ScalarKind::Uint128,
            Self::Float32(_) => ScalarKind::Float32,
            Self::Float64(_) => ScalarKind::Float64,
            Self::BigInt(_) => ScalarKind::BigInt,
            Self::Decimal(_) => ScalarKind::Decimal,
            Self::Uuid(_) => ScalarKind::Uuid,
            Self::Ulid(_) => ScalarKind::Ulid,
            Self::Instant(_) => ScalarKind::Instant,
            Self::OffsetDateTime(_) => ScalarKind::OffsetDateTime,
            Self::ZonedDateTime(_) => ScalarKind::ZonedDateTime,
            Self::LocalDate(_) => ScalarKind::LocalDate,
            Self::LocalTime(_) => ScalarKind::LocalTime,
            Self::LocalDateTime(_) => ScalarKind::LocalDateTime,
            Self::Year(_) => ScalarKind::Year,
            Self::YearMonth(_) => ScalarKind::YearMonth,
            Self::Text(_) => ScalarKind::Text,
            Self::Enum(_) | Self::Bucketed(_) => return None,
        };

        Some(kind)
    }

    /// Returns whether this value is an instance of `kind`.
    #[must_use]
    pub fn matches_kind(&self, kind: &FieldKind) -> bool {
        match (kind, self) {
            (FieldKind::Scalar(scalar), value) => value.scalar_kind() == Some(*scalar),
            (FieldKind::Enum(ty), Self::Enum(value)) => ty.name() == value.type_name,
            (FieldKind::Enum(_), _) => false,
        }
    }

    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(value) => Some(*value),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(v) => write!(f, "{v}"),
            Self::Char(v) => write!(f, "{v}"),
            Self::Int8(v) => write!(f, "{v}"),
            Self::Int16(v) => write!(f, "{v}"),
            Self::Int32(v) => write!(f, "{v}"),
            Self::Int64(v) => write!(f, "{v}"),
            Self::Int128(v) => write!(f, "{v}"),
            Self::Uint8(v) => write!(f, "{v}"),
            Self::Uint16(v) => write!(f, "{v}"),
            Self::Uint32(v) => write!(f, "{v}"),
            Self::Uint64(v) => write!(f, "{v}"),
            Self::Uint128(v) => write!(f, "{v}"),
            Self::Float32(v) => write!(f, "{v}"),
            Self::Float64(v) => write!(f, "{v}"),
            Self::BigInt(v) => write!(f, "{v}"),
            Self::Decimal(v) => write!(f, "{v}"),
            Self::Uuid(v) => write!(f, "{v}"),
            Self::Ulid(v) => write!(f, "{v}"),
            Self::Instant(v) | Self::OffsetDateTime(v) => write!(f, "{v}"),
            Self::ZonedDateTime(v) => write!(f, "{v}"),
            Self::LocalDate(v) => write!(f, "{v}"),
            Self::LocalTime(v) => write!(f, "{v}"),
            Self::LocalDateTime(v) => write!(f, "{v}"),
            Self::Year(v) => write!(f, "{v}"),
            Self::YearMonth(v) => write!(f, "{v}"),
            Self::Text(v) => write!(f, "{v}"),
            Self::Enum(v) => write!(f, "{}", v.member),
            Self::Bucketed(v) => write!(f, "{v}"),
        }
    }
}

///
/// EnumValue
///
/// Enum member selected by exact name from an `EnumType`.
///

#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct EnumValue {
    pub type_name: String,
    pub member: String,
}

impl EnumValue {
    #[must_use]
    pub fn new(type_name: impl Into<String>, member: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            member: member.into(),
        }
    }
}
