//! Core runtime for Sieve: request normalization, policy matching, value
//! casting, field-path resolution, and operator builders that turn raw
//! filter/sort input into typed operations for an external materializer.
#![warn(unreachable_pub)]

// public exports are one module level down
pub mod build;
pub mod cast;
pub mod config;
pub mod direction;
pub mod error;
pub mod message;
pub mod model;
pub mod obs;
pub mod operator;
pub mod parse;
pub mod path;
pub mod policy;
pub mod resolve;
pub mod value;
pub mod wrapper;

// test
#[cfg(test)]
pub(crate) mod test_support;

pub use sieve_primitives::{ScalarFamily, ScalarKind, TemporalBucket};

///
/// CONSTANTS
///

/// Default delimiter between field path and operator in query parameter names.
pub const DEFAULT_DELIMITER: &str = "__";

/// Default query parameter that carries sort requests.
pub const DEFAULT_SORT_PARAM: &str = "sort";

/// Default separator between segments of a nested field path.
pub const DEFAULT_PATH_SEPARATOR: &str = ".";

/// Separator between multiple values inside one raw value string.
pub const VALUE_SEPARATOR: char = ',';

///
/// Prelude
///
/// Prelude contains only domain vocabulary.
/// No errors, registries, or sinks are re-exported here.
///

pub mod prelude {
    pub use crate::{
        build::{Materializer, Semantics},
        direction::Direction,
        model::{EntityModel, FieldKind, Schema},
        operator::Operator,
        path::FieldRef,
        policy::{FilterContext, SortContext},
        value::Value,
        wrapper::{FilterWrapper, SortWrapper, SourceType},
    };
}
