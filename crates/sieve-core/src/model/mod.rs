//! Schema metadata consumed by the field path resolver.
//!
//! Nothing here depends on a query engine; any ORM metamodel, static schema
//! description, or test double can stand behind the `Schema` trait.

pub mod entity;
pub mod field;
pub mod schema;

pub use entity::{AttributeKind, AttributeModel, EntityModel};
pub use field::{EnumType, FieldKind};
pub use schema::{Attribute, AttributeInfo, Schema, SchemaError, StaticSchema};
