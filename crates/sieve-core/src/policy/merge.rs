use crate::{
    obs::{ResolveEvent, sink},
    wrapper::{FilterWrapper, SortWrapper, SourceType},
};
use std::collections::BTreeMap;

/// Merge key for a filter: the normalized field for query parameters, the
/// original token for body entries.
#[must_use]
pub fn filter_key(wrapper: &FilterWrapper) -> &str {
    match wrapper.source {
        SourceType::QueryParam => &wrapper.field,
        SourceType::RequestBody => &wrapper.original_field_name,
    }
}

/// Merge key for a sort: the normalized field for every source.
#[must_use]
pub fn sort_key(wrapper: &SortWrapper) -> &str {
    &wrapper.field
}

/// Merge wrappers already ordered query-first, body-second. A later wrapper
/// with the same key replaces the earlier one in place.
pub fn merge<W>(
    wrappers: impl IntoIterator<Item = W>,
    key: fn(&W) -> &str,
    source: fn(&W) -> SourceType,
) -> Vec<W> {
    let mut merged: Vec<W> = Vec::new();
    let mut slots: BTreeMap<String, usize> = BTreeMap::new();

    for wrapper in wrappers {
        let k = key(&wrapper).to_string();

        match slots.get(&k) {
            Some(&slot) => {
                sink::record(&ResolveEvent::Overridden {
                    key: &k,
                    source: source(&wrapper),
                });
                merged[slot] = wrapper;
            }
            None => {
                slots.insert(k, merged.len());
                merged.push(wrapper);
            }
        }
    }

    merged
}

#[must_use]
pub fn merge_filters(wrappers: impl IntoIterator<Item = FilterWrapper>) -> Vec<FilterWrapper> {
    merge(wrappers, filter_key, |w: &FilterWrapper| w.source)
}

#[must_use]
pub fn merge_sorts(wrappers: impl IntoIterator<Item = SortWrapper>) -> Vec<SortWrapper> {
    merge(wrappers, sort_key, |w: &SortWrapper| w.source)
}
