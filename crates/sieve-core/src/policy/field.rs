use crate::{
    build::Materializer,
    direction::Direction,
    error::ErrorSet,
    model::FieldKind,
    operator::Operator,
    path::{FieldRef, PathError, PathResolver},
    value::Value,
    wrapper::{FilterWrapper, SortWrapper, SourceType},
};
use std::{collections::BTreeSet, fmt, sync::Arc};

/// Caller-supplied field reference provider, run against the pass's path
/// resolver so its joins are shared.
pub type ExpressionFn =
    Arc<dyn Fn(&mut PathResolver) -> Result<FieldRef, PathError> + Send + Sync>;

///
/// FieldTarget
///
/// What a policy resolves to: its own key walked as a path, an explicit
/// path, or an expression provider.
///

#[derive(Clone, Default)]
pub enum FieldTarget {
    #[default]
    Key,
    Path(String),
    Expression(ExpressionFn),
}

impl FieldTarget {
    /// Resolve this target for the policy registered under `key`.
    pub fn resolve(&self, key: &str, resolver: &mut PathResolver) -> Result<FieldRef, PathError> {
        match self {
            Self::Key => resolver.resolve(key),
            Self::Path(path) => resolver.resolve(path),
            Self::Expression(provider) => provider(resolver),
        }
    }
}

impl fmt::Debug for FieldTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Key => f.write_str("Key"),
            Self::Path(path) => f.debug_tuple("Path").field(path).finish(),
            Self::Expression(_) => f.write_str("Expression(..)"),
        }
    }
}

fn all_sources() -> BTreeSet<SourceType> {
    SourceType::PROCESSING_ORDER.into_iter().collect()
}

///
/// FieldPolicy
///

#[derive(Clone, Debug)]
pub struct FieldPolicy {
    pub allowed_operators: BTreeSet<Operator>,
    pub allowed_sources: BTreeSet<SourceType>,
    pub target: FieldTarget,
}

impl FieldPolicy {
    /// Policy for `operators` from every source.
    #[must_use]
    pub fn new(operators: impl IntoIterator<Item = Operator>) -> Self {
        Self {
            allowed_operators: operators.into_iter().collect(),
            allowed_sources: all_sources(),
            target: FieldTarget::Key,
        }
    }

    #[must_use]
    pub fn sources(mut self, sources: impl IntoIterator<Item = SourceType>) -> Self {
        self.allowed_sources = sources.into_iter().collect();
        self
    }

    #[must_use]
    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.target = FieldTarget::Path(path.into());
        self
    }

    #[must_use]
    pub fn expression<F>(mut self, provider: F) -> Self
    where
        F: Fn(&mut PathResolver) -> Result<FieldRef, PathError> + Send + Sync + 'static,
    {
        self.target = FieldTarget::Expression(Arc::new(provider));
        self
    }

    #[must_use]
    pub fn allows(&self, operator: Operator, source: SourceType) -> bool {
        self.allowed_operators.contains(&operator) && self.allowed_sources.contains(&source)
    }
}

///
/// CustomFilter
///
/// Everything a custom filter function sees for one wrapper. Operands are
/// already cast against the policy's data type.
///

pub struct CustomFilter<'a, M: Materializer> {
    pub wrapper: &'a FilterWrapper,
    pub operands: Vec<Option<Value>>,
    pub resolver: &'a mut PathResolver,
    pub materializer: &'a M,
    pub errors: &'a mut ErrorSet,
}

pub type CustomFilterFn<M> = Arc<
    dyn for<'a> Fn(CustomFilter<'a, M>) -> Option<<M as Materializer>::Predicate> + Send + Sync,
>;

///
/// CustomFieldPolicy
///

pub struct CustomFieldPolicy<M: Materializer> {
    pub data_type: FieldKind,
    pub allowed_sources: BTreeSet<SourceType>,
    pub function: CustomFilterFn<M>,
}

impl<M: Materializer> CustomFieldPolicy<M> {
    #[must_use]
    pub fn new<F>(data_type: impl Into<FieldKind>, function: F) -> Self
    where
        F: for<'a> Fn(CustomFilter<'a, M>) -> Option<M::Predicate> + Send + Sync + 'static,
    {
        Self {
            data_type: data_type.into(),
            allowed_sources: all_sources(),
            function: Arc::new(function),
        }
    }

    #[must_use]
    pub fn sources(mut self, sources: impl IntoIterator<Item = SourceType>) -> Self {
        self.allowed_sources = sources.into_iter().collect();
        self
    }
}

impl<M: Materializer> Clone for CustomFieldPolicy<M> {
    fn clone(&self) -> Self {
        Self {
            data_type: self.data_type.clone(),
            allowed_sources: self.allowed_sources.clone(),
            function: Arc::clone(&self.function),
        }
    }
}

impl<M: Materializer> fmt::Debug for CustomFieldPolicy<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomFieldPolicy")
            .field("data_type", &self.data_type)
            .field("allowed_sources", &self.allowed_sources)
            .finish_non_exhaustive()
    }
}

///
/// SortFieldPolicy
///

#[derive(Clone, Debug)]
pub struct SortFieldPolicy {
    pub allowed_directions: BTreeSet<Direction>,
    pub allowed_sources: BTreeSet<SourceType>,
    pub target: FieldTarget,
}

impl SortFieldPolicy {
    /// Both directions from every source.
    #[must_use]
    pub fn new() -> Self {
        Self {
            allowed_directions: [Direction::Asc, Direction::Desc].into_iter().collect(),
            allowed_sources: all_sources(),
            target: FieldTarget::Key,
        }
    }

    #[must_use]
    pub fn directions(mut self, directions: impl IntoIterator<Item = Direction>) -> Self {
        self.allowed_directions = directions.into_iter().collect();
        self
    }

    #[must_use]
    pub fn sources(mut self, sources: impl IntoIterator<Item = SourceType>) -> Self {
        self.allowed_sources = sources.into_iter().collect();
        self
    }

    #[must_use]
    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.target = FieldTarget::Path(path.into());
        self
    }

    #[must_use]
    pub fn expression<F>(mut self, provider: F) -> Self
    where
        F: Fn(&mut PathResolver) -> Result<FieldRef, PathError> + Send + Sync + 'static,
    {
        self.target = FieldTarget::Expression(Arc::new(provider));
        self
    }

    #[must_use]
    pub fn allows(&self, direction: Direction, source: SourceType) -> bool {
        self.allowed_directions.contains(&direction) && self.allowed_sources.contains(&source)
    }
}

impl Default for SortFieldPolicy {
    fn default() -> Self {
        Self::new()
    }
}

///
/// CustomSort
///

pub struct CustomSort<'a, M: Materializer> {
    pub wrapper: &'a SortWrapper,
    pub resolver: &'a mut PathResolver,
    pub materializer: &'a M,
    pub errors: &'a mut ErrorSet,
}

pub type CustomSortFn<M> =
    Arc<dyn for<'a> Fn(CustomSort<'a, M>) -> Option<<M as Materializer>::Order> + Send + Sync>;

///
/// CustomSortPolicy
///

pub struct CustomSortPolicy<M: Materializer> {
    pub allowed_sources: BTreeSet<SourceType>,
    pub function: CustomSortFn<M>,
}

impl<M: Materializer> CustomSortPolicy<M> {
    #[must_use]
    pub fn new<F>(function: F) -> Self
    where
        F: for<'a> Fn(CustomSort<'a, M>) -> Option<M::Order> + Send + Sync + 'static,
    {
        Self {
            allowed_sources: all_sources(),
            function: Arc::new(function),
        }
    }

    #[must_use]
    pub fn sources(mut self, sources: impl IntoIterator<Item = SourceType>) -> Self {
        self.allowed_sources = sources.into_iter().collect();
        self
    }
}

impl<M: Materializer> Clone for CustomSortPolicy<M> {
    fn clone(&self) -> Self {
        Self {
            allowed_sources: self.allowed_sources.clone(),
            function: Arc::clone(&self.function),
        }
    }
}

impl<M: Materializer> fmt::Debug for CustomSortPolicy<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomSortPolicy")
            .field("allowed_sources", &self.allowed_sources)
            .finish_non_exhaustive()
    }
}
