//! Request normalization: raw query parameters and body entries become
//! source-tagged `FilterWrapper` / `SortWrapper` records.

mod body;
mod query;

#[cfg(test)]
mod tests;

use crate::{VALUE_SEPARATOR, config::ResolverConfig};

pub use body::{FilterEntry, SortEntry};
pub use query::QueryParams;

/// Split a raw value string on `,`. An empty string is one empty value.
#[must_use]
pub fn split_values(raw: &str) -> Vec<String> {
    raw.split(VALUE_SEPARATOR).map(str::to_string).collect()
}

///
/// RequestParser
///
/// Stateless normalizer bound to one resolver configuration.
///

#[derive(Clone, Copy, Debug)]
pub struct RequestParser<'a> {
    config: &'a ResolverConfig,
}

impl<'a> RequestParser<'a> {
    #[must_use]
    pub const fn new(config: &'a ResolverConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub const fn config(&self) -> &'a ResolverConfig {
        self.config
    }
}

