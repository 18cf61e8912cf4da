//! ## Crate layout
//! - `core`: request normalization, policies, casting, path resolution,
//!   operator builders, errors, and observability.
//! - `primitives`: the scalar-kind capability registry.
//!
//! The `prelude` module carries the vocabulary needed to declare policies
//! and run resolution passes.

pub use sieve_core as core;
pub use sieve_primitives as primitives;

//
// Consts
//

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use crate::core::{
    config::{ConfigError, ResolverConfig},
    error::{ErrorResponse, ResolveError},
};

///
/// Prelude
///

pub mod prelude {
    pub use crate::core::{
        build::SpecMaterializer,
        config::ResolverConfig,
        parse::{FilterEntry, QueryParams, SortEntry},
        policy::{CustomFieldPolicy, CustomSortPolicy, FieldPolicy, SortFieldPolicy},
        prelude::*,
        resolve::{FilterRequest, Resolved, Resolver, SortRequest},
    };
    pub use crate::primitives::ScalarKind;
    pub use serde::{Deserialize, Serialize};
}
