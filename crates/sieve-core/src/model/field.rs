use sieve_primitives::{ScalarKind, TemporalBucket};
use std::{fmt, sync::Arc};

///
/// EnumType
/// Named enumeration with its member names in declaration order.
///

#[derive(Debug, Eq, Hash, PartialEq)]
pub struct EnumType {
    name: String,
    members: Vec<String>,
}

impl EnumType {
    #[must_use]
    pub fn new<I, S>(name: impl Into<String>, members: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            members: members.into_iter().map(Into::into).collect(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn members(&self) -> &[String] {
        &self.members
    }

    /// Case-sensitive exact member lookup.
    #[must_use]
    pub fn member(&self, name: &str) -> Option<&str> {
        self.members
            .iter()
            .find(|member| member.as_str() == name)
            .map(String::as_str)
    }
}

///
/// FieldKind
///
/// Runtime type tag carried by a resolved field reference.
/// Selects the caster and gates which operators apply.
///

#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum FieldKind {
    Scalar(ScalarKind),
    Enum(Arc<EnumType>),
}

impl FieldKind {
    #[must_use]
    pub fn enumeration<I, S>(name: impl Into<String>, members: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Enum(Arc::new(EnumType::new(name, members)))
    }

    #[must_use]
    pub const fn supports_equality(&self) -> bool {
        match self {
            Self::Scalar(kind) => kind.supports_equality(),
            Self::Enum(_) => true,
        }
    }

    // Enum members have no declared ordering contract, so range
    // operators are rejected for them.
    #[must_use]
    pub const fn supports_ordering(&self) -> bool {
        match self {
            Self::Scalar(kind) => kind.supports_ordering(),
            Self::Enum(_) => false,
        }
    }

    #[must_use]
    pub const fn supports_text(&self) -> bool {
        match self {
            Self::Scalar(kind) => kind.supports_text(),
            Self::Enum(_) => false,
        }
    }

    #[must_use]
    pub const fn temporal_bucket(&self) -> Option<TemporalBucket> {
        match self {
            Self::Scalar(kind) => kind.temporal_bucket(),
            Self::Enum(_) => None,
        }
    }
}

impl From<ScalarKind> for FieldKind {
    fn from(kind: ScalarKind) -> Self {
        Self::Scalar(kind)
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar(kind) => write!(f, "{kind}"),
            Self::Enum(ty) => write!(f, "enum {}", ty.name()),
        }
    }
}
