use crate::{
    build::{Materializer, Semantics},
    direction::Direction,
    path::FieldRef,
    value::Value,
};

///
/// PredicateSpec
/// Plain-data predicate: what a materializer was asked to build.
///

#[derive(Clone, Debug, PartialEq)]
pub struct PredicateSpec {
    pub field: FieldRef,
    pub semantics: Semantics,
    pub operands: Vec<Value>,
}

///
/// OrderSpec
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OrderSpec {
    pub field: FieldRef,
    pub direction: Direction,
}

///
/// SpecMaterializer
///
/// Materializer that records its inputs as data, for callers that want an
/// inspectable intermediate form.
///

#[derive(Clone, Copy, Debug, Default)]
pub struct SpecMaterializer;

impl Materializer for SpecMaterializer {
    type Predicate = PredicateSpec;
    type Order = OrderSpec;

    fn predicate(&self, field: &FieldRef, semantics: Semantics, operands: Vec<Value>) -> PredicateSpec {
        PredicateSpec {
            field: field.clone(),
            semantics,
            operands,
        }
    }

    fn order(&self, field: &FieldRef, direction: Direction) -> OrderSpec {
        OrderSpec {
            field: field.clone(),
            direction,
        }
    }
}
