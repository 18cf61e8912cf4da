//! Operator predicate and order builders.
//!
//! Operator dispatch is one exhaustive match. Every builder hands the
//! materializer a field reference, operator semantics, and typed operands;
//! the concrete predicate type belongs to the materializer.

mod bucket;
mod spec;

#[cfg(test)]
mod tests;

use crate::{
    cast::CasterRegistry,
    direction::Direction,
    error::ErrorSet,
    operator::Operator,
    path::FieldRef,
    value::Value,
    wrapper::FilterWrapper,
};
use serde::Serialize;

pub use bucket::{BucketFn, BucketRegistry};
pub use spec::{OrderSpec, PredicateSpec, SpecMaterializer};

///
/// CompareOp
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize)]
pub enum CompareOp {
    Eq,
    Ne,
    Gt,
    Lt,
    Gte,
    Lte,
}

///
/// TextOp
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize)]
pub enum TextOp {
    Contains,
    StartsWith,
    EndsWith,
}

///
/// TextCase
///
/// `Upper` means the operand is already uppercased and the materializer
/// must uppercase the field side too.
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize)]
pub enum TextCase {
    Sensitive,
    Upper,
}

///
/// Semantics
///
/// Operator meaning as seen by the materializer. Null checks carry no
/// operands; ranges carry `[low, high]`.
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize)]
pub enum Semantics {
    Compare(CompareOp),
    Null { negated: bool },
    Membership { negated: bool },
    Range { negated: bool },
    Text { op: TextOp, case: TextCase },
}

///
/// Materializer
///
/// External operation factory. The engine never builds a concrete
/// predicate or ordering itself.
///

pub trait Materializer {
    type Predicate;
    type Order;

    fn predicate(&self, field: &FieldRef, semantics: Semantics, operands: Vec<Value>)
    -> Self::Predicate;

    fn order(&self, field: &FieldRef, direction: Direction) -> Self::Order;
}

///
/// PredicateBuilder
///
/// Applies operator support, arity, casting, and per-operator shaping for
/// one resolved filter.
///

pub struct PredicateBuilder<'a, M: Materializer> {
    materializer: &'a M,
    casters: &'a CasterRegistry,
    buckets: &'a BucketRegistry,
}

impl<'a, M: Materializer> PredicateBuilder<'a, M> {
    #[must_use]
    pub const fn new(
        materializer: &'a M,
        casters: &'a CasterRegistry,
        buckets: &'a BucketRegistry,
    ) -> Self {
        Self {
            materializer,
            casters,
            buckets,
        }
    }

    /// Build the predicate for `wrapper` against `field`. Problems go to
    /// `errors` and yield `None`.
    pub fn build(
        &self,
        wrapper: &FilterWrapper,
        field: &FieldRef,
        errors: &mut ErrorSet,
    ) -> Option<M::Predicate> {
        let op = wrapper.operator;
        let token = wrapper.original_field_name.as_str();

        if !op.supports(&field.kind) {
            errors.unsupported_operator(token, op, &field.kind, &wrapper.values);
            return None;
        }

        let arity = op.arity();
        if op.is_range() && !arity.accepts(wrapper.values.len()) {
            errors.arity_violated(token, op, arity.required(), &wrapper.values);
            return None;
        }

        let operands = self.casters.safe_cast_all(
            &op.operand_kind(&field.kind),
            &wrapper.values,
            token,
            errors,
        );

        self.dispatch(op, field, operands)
    }

    fn dispatch(
        &self,
        op: Operator,
        field: &FieldRef,
        operands: Vec<Option<Value>>,
    ) -> Option<M::Predicate> {
        match op {
            Operator::Eq => self.compare(field, CompareOp::Eq, operands),
            Operator::Neq => self.compare(field, CompareOp::Ne, operands),
            Operator::Gt => self.ordered(field, CompareOp::Gt, operands),
            Operator::Lt => self.ordered(field, CompareOp::Lt, operands),
            Operator::Gte => self.ordered(field, CompareOp::Gte, operands),
            Operator::Lte => self.ordered(field, CompareOp::Lte, operands),
            Operator::IsNull => self.null_check(field, false, operands),
            Operator::IsNotNull => self.null_check(field, true, operands),
            Operator::In => self.membership(field, false, operands),
            Operator::NotIn => self.membership(field, true, operands),
            Operator::Between => self.range(field, false, operands),
            Operator::NotBetween => self.range(field, true, operands),
            Operator::Contains | Operator::IContains => {
                self.text(field, TextOp::Contains, op.is_case_insensitive(), operands)
            }
            Operator::StartsWith | Operator::IStartsWith => {
                self.text(field, TextOp::StartsWith, op.is_case_insensitive(), operands)
            }
            Operator::EndsWith | Operator::IEndsWith => {
                self.text(field, TextOp::EndsWith, op.is_case_insensitive(), operands)
            }
        }
    }

    fn compare(
        &self,
        field: &FieldRef,
        op: CompareOp,
        operands: Vec<Option<Value>>,
    ) -> Option<M::Predicate> {
        let value = single(operands)?;

        Some(
            self.materializer
                .predicate(field, Semantics::Compare(op), vec![value]),
        )
    }

    // Temporal operands go through their bucket before comparison.
    fn ordered(
        &self,
        field: &FieldRef,
        op: CompareOp,
        operands: Vec<Option<Value>>,
    ) -> Option<M::Predicate> {
        let value = self.buckets.apply(single(operands)?)?;

        Some(
            self.materializer
                .predicate(field, Semantics::Compare(op), vec![value]),
        )
    }

    // `false` selects the opposite check.
    fn null_check(
        &self,
        field: &FieldRef,
        negated: bool,
        operands: Vec<Option<Value>>,
    ) -> Option<M::Predicate> {
        let flag = single(operands)?.as_bool()?;
        let negated = if flag { negated } else { !negated };

        Some(
            self.materializer
                .predicate(field, Semantics::Null { negated }, Vec::new()),
        )
    }

    fn membership(
        &self,
        field: &FieldRef,
        negated: bool,
        operands: Vec<Option<Value>>,
    ) -> Option<M::Predicate> {
        let values = all_present(operands)?;

        Some(
            self.materializer
                .predicate(field, Semantics::Membership { negated }, values),
        )
    }

    fn range(
        &self,
        field: &FieldRef,
        negated: bool,
        operands: Vec<Option<Value>>,
    ) -> Option<M::Predicate> {
        let values = all_present(operands)?;
        if values.len() != 2 {
            return None;
        }

        Some(
            self.materializer
                .predicate(field, Semantics::Range { negated }, values),
        )
    }

    // Case-insensitive variants uppercase the operand; no locale folding.
    fn text(
        &self,
        field: &FieldRef,
        op: TextOp,
        insensitive: bool,
        operands: Vec<Option<Value>>,
    ) -> Option<M::Predicate> {
        let Value::Text(text) = single(operands)? else {
            return None;
        };

        let (operand, case) = if insensitive {
            (Value::Text(text.to_uppercase()), TextCase::Upper)
        } else {
            (Value::Text(text), TextCase::Sensitive)
        };

        Some(
            self.materializer
                .predicate(field, Semantics::Text { op, case }, vec![operand]),
        )
    }
}

/// Build the ordering for one resolved sort field.
pub fn build_order<M: Materializer>(
    materializer: &M,
    field: &FieldRef,
    direction: Direction,
) -> M::Order {
    materializer.order(field, direction)
}

/// Exactly one present operand.
fn single(operands: Vec<Option<Value>>) -> Option<Value> {
    let mut iter = operands.into_iter();
    match (iter.next(), iter.next()) {
        (Some(value), None) => value,
        _ => None,
    }
}

/// One or more operands, none absent.
fn all_present(operands: Vec<Option<Value>>) -> Option<Vec<Value>> {
    if operands.is_empty() {
        return None;
    }

    operands.into_iter().collect()
}
