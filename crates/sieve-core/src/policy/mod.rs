//! Policy matching and source merging.

mod context;
mod field;
mod merge;

#[cfg(test)]
mod tests;

pub use context::{FilterContext, SortContext};
pub use field::{
    CustomFieldPolicy, CustomFilter, CustomFilterFn, CustomSort, CustomSortFn, CustomSortPolicy,
    ExpressionFn, FieldPolicy, FieldTarget, SortFieldPolicy,
};
pub use merge::{filter_key, merge, merge_filters, merge_sorts, sort_key};
