use crate::{direction::Direction, operator::Operator};
use serde::Serialize;

///
/// SourceType
///
/// Where a wrapper came from. Query parameters are always processed before
/// request bodies, so body wrappers win on merge.
///

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub enum SourceType {
    QueryParam,
    RequestBody,
}

impl SourceType {
    /// Deterministic processing order across sources.
    pub const PROCESSING_ORDER: [Self; 2] = [Self::QueryParam, Self::RequestBody];
}

///
/// ResolvedKind
///
/// Derived classification attached by the policy matcher; never
/// client-supplied.
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize)]
pub enum ResolvedKind {
    Normal,
    Custom,
}

///
/// FilterWrapper
///
/// One normalized filter request. `field` is the normalized key used for
/// policy lookup; `original_field_name` is the exact input token kept for
/// error reporting.
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct FilterWrapper {
    pub field: String,
    pub original_field_name: String,
    pub operator: Operator,
    pub values: Vec<String>,
    pub source: SourceType,
    pub resolved_kind: Option<ResolvedKind>,
}

impl FilterWrapper {
    #[must_use]
    pub fn new(
        field: impl Into<String>,
        original_field_name: impl Into<String>,
        operator: Operator,
        values: Vec<String>,
        source: SourceType,
    ) -> Self {
        Self {
            field: field.into(),
            original_field_name: original_field_name.into(),
            operator,
            values,
            source,
            resolved_kind: None,
        }
    }

    /// Return a copy classified as `kind`.
    #[must_use]
    pub fn with_kind(self, kind: ResolvedKind) -> Self {
        Self {
            resolved_kind: Some(kind),
            ..self
        }
    }
}

///
/// SortWrapper
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct SortWrapper {
    pub field: String,
    pub original_field_name: String,
    pub direction: Direction,
    pub source: SourceType,
    pub resolved_kind: Option<ResolvedKind>,
}

impl SortWrapper {
    #[must_use]
    pub fn new(
        field: impl Into<String>,
        original_field_name: impl Into<String>,
        direction: Direction,
        source: SourceType,
    ) -> Self {
        Self {
            field: field.into(),
            original_field_name: original_field_name.into(),
            direction,
            source,
            resolved_kind: None,
        }
    }

    #[must_use]
    pub fn with_kind(self, kind: ResolvedKind) -> Self {
        Self {
            resolved_kind: Some(kind),
            ..self
        }
    }
}
