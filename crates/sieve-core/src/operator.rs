use crate::model::FieldKind;
use serde::Serialize;
use sieve_primitives::ScalarKind;
use std::fmt;

///
/// Operator
///
/// Closed filter vocabulary. Every variant carries a stable wire token used
/// both when parsing parameter names and when rendering error messages.
///

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub enum Operator {
    Eq,
    Neq,
    Gt,
    Lt,
    Gte,
    Lte,
    IsNull,
    IsNotNull,
    In,
    NotIn,
    Between,
    NotBetween,
    Contains,
    IContains,
    StartsWith,
    IStartsWith,
    EndsWith,
    IEndsWith,
}

impl Operator {
    pub const ALL: [Self; 18] = [
        Self::Eq,
        Self::Neq,
        Self::Gt,
        Self::Lt,
        Self::Gte,
        Self::Lte,
        Self::IsNull,
        Self::IsNotNull,
        Self::In,
        Self::NotIn,
        Self::Between,
        Self::NotBetween,
        Self::Contains,
        Self::IContains,
        Self::StartsWith,
        Self::IStartsWith,
        Self::EndsWith,
        Self::IEndsWith,
    ];

    #[must_use]
    pub const fn token(self) -> &'static str {
        match self {
            Self::Eq => "eq",
            Self::Neq => "neq",
            Self::Gt => "gt",
            Self::Lt => "lt",
            Self::Gte => "gte",
            Self::Lte => "lte",
            Self::IsNull => "is_null",
            Self::IsNotNull => "is_not_null",
            Self::In => "in",
            Self::NotIn => "not_in",
            Self::Between => "between",
            Self::NotBetween => "not_between",
            Self::Contains => "contains",
            Self::IContains => "icontains",
            Self::StartsWith => "starts_with",
            Self::IStartsWith => "istarts_with",
            Self::EndsWith => "ends_with",
            Self::IEndsWith => "iends_with",
        }
    }

    /// Case-exact token lookup.
    #[must_use]
    pub fn from_token(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.token() == token)
    }

    /// ASCII case-insensitive token lookup, used for request bodies when
    /// configured.
    #[must_use]
    pub fn from_token_ci(token: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|op| op.token().eq_ignore_ascii_case(token))
    }

    #[must_use]
    pub const fn arity(self) -> Arity {
        match self {
            Self::In | Self::NotIn => Arity::AtLeast(1),
            Self::Between | Self::NotBetween => Arity::Exactly(2),
            _ => Arity::Exactly(1),
        }
    }

    #[must_use]
    pub const fn capability(self) -> Capability {
        match self {
            Self::IsNull | Self::IsNotNull => Capability::Any,
            Self::Eq | Self::Neq | Self::In | Self::NotIn => Capability::Equality,
            Self::Gt | Self::Lt | Self::Gte | Self::Lte | Self::Between | Self::NotBetween => {
                Capability::Ordering
            }
            Self::Contains
            | Self::IContains
            | Self::StartsWith
            | Self::IStartsWith
            | Self::EndsWith
            | Self::IEndsWith => Capability::Text,
        }
    }

    /// Returns whether a field of `kind` accepts this operator.
    #[must_use]
    pub const fn supports(self, kind: &FieldKind) -> bool {
        match self.capability() {
            Capability::Any => true,
            Capability::Equality => kind.supports_equality(),
            Capability::Ordering => kind.supports_ordering(),
            Capability::Text => kind.supports_text(),
        }
    }

    /// Kind the raw operand strings are cast as. Null checks always take a
    /// boolean flag regardless of the field type.
    #[must_use]
    pub fn operand_kind(self, field: &FieldKind) -> FieldKind {
        match self {
            Self::IsNull | Self::IsNotNull => FieldKind::Scalar(ScalarKind::Bool),
            _ => field.clone(),
        }
    }

    /// Range operators take a `[low, high]` pair.
    #[must_use]
    pub const fn is_range(self) -> bool {
        matches!(self, Self::Between | Self::NotBetween)
    }

    #[must_use]
    pub const fn is_case_insensitive(self) -> bool {
        matches!(self, Self::IContains | Self::IStartsWith | Self::IEndsWith)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

///
/// Arity
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Arity {
    Exactly(usize),
    AtLeast(usize),
}

impl Arity {
    /// Smallest accepted value count.
    #[must_use]
    pub const fn required(self) -> usize {
        match self {
            Self::Exactly(n) | Self::AtLeast(n) => n,
        }
    }

    #[must_use]
    pub const fn accepts(self, count: usize) -> bool {
        match self {
            Self::Exactly(n) => count == n,
            Self::AtLeast(n) => count >= n,
        }
    }
}

///
/// Capability
/// Field capability an operator requires.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Capability {
    Any,
    Equality,
    Ordering,
    Text,
}
