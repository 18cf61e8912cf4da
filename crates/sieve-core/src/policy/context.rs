use crate::{
    build::Materializer,
    obs::{ResolveEvent, sink},
    policy::field::{CustomFieldPolicy, CustomSortPolicy, FieldPolicy, SortFieldPolicy},
    wrapper::{FilterWrapper, ResolvedKind, SortWrapper},
};
use std::{collections::BTreeMap, fmt};

///
/// FilterContext
///
/// Declared filter policy for one root entity. Built once, then shared
/// read-only across resolution passes.
///

pub struct FilterContext<M: Materializer> {
    entity: String,
    fields: BTreeMap<String, FieldPolicy>,
    custom: BTreeMap<String, CustomFieldPolicy<M>>,
}

impl<M: Materializer> FilterContext<M> {
    #[must_use]
    pub fn new(entity: impl Into<String>) -> Self {
        Self {
            entity: entity.into(),
            fields: BTreeMap::new(),
            custom: BTreeMap::new(),
        }
    }

    /// Register a policy keyed by normalized field.
    #[must_use]
    pub fn field(mut self, key: impl Into<String>, policy: FieldPolicy) -> Self {
        self.fields.insert(key.into(), policy);
        self
    }

    /// Register a custom policy keyed by original field token.
    #[must_use]
    pub fn custom(mut self, key: impl Into<String>, policy: CustomFieldPolicy<M>) -> Self {
        self.custom.insert(key.into(), policy);
        self
    }

    #[must_use]
    pub fn entity(&self) -> &str {
        &self.entity
    }

    #[must_use]
    pub fn field_policy(&self, key: &str) -> Option<&FieldPolicy> {
        self.fields.get(key)
    }

    #[must_use]
    pub fn custom_policy(&self, key: &str) -> Option<&CustomFieldPolicy<M>> {
        self.custom.get(key)
    }

    /// Classify one wrapper. Custom policies are matched first by original
    /// token and source; normal policies by field, operator, and source.
    /// Anything else is dropped and reported as unconfigured.
    #[must_use]
    pub fn classify(&self, wrapper: FilterWrapper) -> Option<FilterWrapper> {
        if self
            .custom
            .get(&wrapper.original_field_name)
            .is_some_and(|policy| policy.allowed_sources.contains(&wrapper.source))
        {
            return Some(wrapper.with_kind(ResolvedKind::Custom));
        }

        if self
            .fields
            .get(&wrapper.field)
            .is_some_and(|policy| policy.allows(wrapper.operator, wrapper.source))
        {
            return Some(wrapper.with_kind(ResolvedKind::Normal));
        }

        sink::record(&ResolveEvent::Unconfigured {
            field: &wrapper.original_field_name,
            source: wrapper.source,
        });

        None
    }
}

impl<M: Materializer> fmt::Debug for FilterContext<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilterContext")
            .field("entity", &self.entity)
            .field("fields", &self.fields)
            .field("custom", &self.custom)
            .finish()
    }
}

///
/// SortContext
///

pub struct SortContext<M: Materializer> {
    entity: String,
    fields: BTreeMap<String, SortFieldPolicy>,
    custom: BTreeMap<String, CustomSortPolicy<M>>,
}

impl<M: Materializer> SortContext<M> {
    #[must_use]
    pub fn new(entity: impl Into<String>) -> Self {
        Self {
            entity: entity.into(),
            fields: BTreeMap::new(),
            custom: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn field(mut self, key: impl Into<String>, policy: SortFieldPolicy) -> Self {
        self.fields.insert(key.into(), policy);
        self
    }

    #[must_use]
    pub fn custom(mut self, key: impl Into<String>, policy: CustomSortPolicy<M>) -> Self {
        self.custom.insert(key.into(), policy);
        self
    }

    #[must_use]
    pub fn entity(&self) -> &str {
        &self.entity
    }

    #[must_use]
    pub fn field_policy(&self, key: &str) -> Option<&SortFieldPolicy> {
        self.fields.get(key)
    }

    #[must_use]
    pub fn custom_policy(&self, key: &str) -> Option<&CustomSortPolicy<M>> {
        self.custom.get(key)
    }

    #[must_use]
    pub fn classify(&self, wrapper: SortWrapper) -> Option<SortWrapper> {
        if self
            .custom
            .get(&wrapper.original_field_name)
            .is_some_and(|policy| policy.allowed_sources.contains(&wrapper.source))
        {
            return Some(wrapper.with_kind(ResolvedKind::Custom));
        }

        if self
            .fields
            .get(&wrapper.field)
            .is_some_and(|policy| policy.allows(wrapper.direction, wrapper.source))
        {
            return Some(wrapper.with_kind(ResolvedKind::Normal));
        }

        sink::record(&ResolveEvent::Unconfigured {
            field: &wrapper.original_field_name,
            source: wrapper.source,
        });

        None
    }
}

impl<M: Materializer> fmt::Debug for SortContext<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SortContext")
            .field("entity", &self.entity)
            .field("fields", &self.fields)
            .field("custom", &self.custom)
            .finish()
    }
}
