use super::*;
use crate::{
    error::{ErrorClass, ErrorKind},
    model::FieldKind,
    path::JoinId,
    test_support::error_set,
    value::{Bucketed, YearMonth, ZonedDateTime},
    wrapper::SourceType,
};
use proptest::prelude::*;
use sieve_primitives::{ALL_SCALAR_KINDS, ScalarKind, TemporalBucket};
use time::{
    Month,
    macros::{date, datetime, time},
};

fn field(name: &str, kind: impl Into<FieldKind>) -> FieldRef {
    FieldRef::new(JoinId::ROOT, vec![name.to_string()], kind.into(), name)
}

fn wrapper(token: &str, op: Operator, values: &[&str]) -> FilterWrapper {
    FilterWrapper::new(
        token,
        token,
        op,
        values.iter().map(ToString::to_string).collect(),
        SourceType::QueryParam,
    )
}

fn build(
    field: &FieldRef,
    op: Operator,
    values: &[&str],
) -> (Option<PredicateSpec>, ErrorSet) {
    let casters = CasterRegistry::builtin();
    let buckets = BucketRegistry::builtin();
    let builder = PredicateBuilder::new(&SpecMaterializer, &casters, &buckets);
    let mut errors = error_set();

    let built = builder.build(&wrapper("f", op, values), field, &mut errors);
    (built, errors)
}

#[test]
fn equality_builds_a_single_operand_compare() {
    let age = field("age", ScalarKind::Int32);
    let (built, errors) = build(&age, Operator::Eq, &["21"]);

    let spec = built.expect("eq should build");
    assert_eq!(spec.semantics, Semantics::Compare(CompareOp::Eq));
    assert_eq!(spec.operands, vec![Value::Int32(21)]);
    assert!(errors.is_empty());
}

#[test]
fn comparisons_need_exactly_one_value() {
    let age = field("age", ScalarKind::Int32);

    let (built, errors) = build(&age, Operator::Neq, &["1", "2"]);
    assert!(built.is_none());
    assert!(errors.is_empty());

    let (built, errors) = build(&age, Operator::Gt, &[]);
    assert!(built.is_none());
    assert!(errors.is_empty());
}

#[test]
fn non_temporal_ordering_is_not_bucketed() {
    let age = field("age", ScalarKind::Int32);
    let (built, _) = build(&age, Operator::Lte, &["65"]);

    assert_eq!(built.map(|s| s.operands), Some(vec![Value::Int32(65)]));
}

#[test]
fn every_temporal_kind_is_bucketed_for_ordering() {
    let cases = [
        (
            ScalarKind::Instant,
            "2024-03-01T10:00:00+02:00",
            Bucketed::Timestamp(datetime!(2024-03-01 8:00)),
        ),
        (
            ScalarKind::OffsetDateTime,
            "2024-03-01T00:30:00-01:00",
            Bucketed::Timestamp(datetime!(2024-03-01 1:30)),
        ),
        (
            ScalarKind::ZonedDateTime,
            "2024-03-01T10:00:00+01:00[Europe/Paris]",
            Bucketed::Timestamp(datetime!(2024-03-01 9:00)),
        ),
        (
            ScalarKind::LocalDateTime,
            "2024-03-01T10:00:00",
            Bucketed::Timestamp(datetime!(2024-03-01 10:00)),
        ),
        (
            ScalarKind::LocalDate,
            "2024-03-01",
            Bucketed::Date(date!(2024 - 03 - 01)),
        ),
        (ScalarKind::Year, "2024", Bucketed::Date(date!(2024 - 01 - 01))),
        (
            ScalarKind::YearMonth,
            "2024-03",
            Bucketed::Date(date!(2024 - 03 - 01)),
        ),
        (ScalarKind::LocalTime, "10:15", Bucketed::Time(time!(10:15))),
    ];

    for (kind, raw, expected) in cases {
        for op in [Operator::Gt, Operator::Lt, Operator::Gte, Operator::Lte] {
            let (built, errors) = build(&field("t", kind), op, &[raw]);

            assert!(errors.is_empty(), "{kind} {op}: {errors:?}");
            assert_eq!(
                built.map(|s| s.operands),
                Some(vec![Value::Bucketed(expected)]),
                "{kind} {op}"
            );
        }
    }
}

#[test]
fn out_of_range_year_is_a_cast_error_for_every_operator() {
    let year = field("y", ScalarKind::Year);

    for op in [Operator::Gt, Operator::Eq] {
        let (built, errors) = build(&year, op, &["99999"]);

        assert!(built.is_none(), "{op}");
        assert_eq!(errors.len(), 1, "{op}");
        assert_eq!(errors.errors()[0].kind, ErrorKind::InputCast);
        assert_eq!(errors.class(), Some(ErrorClass::Input));
    }
}

#[test]
fn equality_on_temporal_keeps_native_value() {
    let (built, _) = build(&field("d", ScalarKind::LocalDate), Operator::Eq, &["2024-03-01"]);

    assert_eq!(
        built.map(|s| s.operands),
        Some(vec![Value::LocalDate(date!(2024 - 03 - 01))])
    );
}

#[test]
fn builtin_buckets_agree_with_scalar_registry() {
    let registry = BucketRegistry::builtin();
    let samples = [
        Value::Instant(datetime!(2024-01-01 0:00 UTC)),
        Value::OffsetDateTime(datetime!(2024-01-01 0:00 +03:00)),
        Value::ZonedDateTime(ZonedDateTime {
            date_time: datetime!(2024-01-01 0:00 UTC),
            zone: None,
        }),
        Value::LocalDateTime(datetime!(2024-01-01 0:00)),
        Value::LocalDate(date!(2024 - 01 - 01)),
        Value::LocalTime(time!(0:00)),
        Value::Year(2024),
        Value::YearMonth(YearMonth::new(2024, Month::January)),
    ];

    for kind in ALL_SCALAR_KINDS.into_iter().filter(|k| k.is_temporal()) {
        assert!(registry.contains(kind), "no bucket for {kind}");
    }

    for sample in samples {
        let kind = sample.scalar_kind().expect("temporal sample");
        let bucket = match registry.apply(sample) {
            Some(Value::Bucketed(Bucketed::Date(_))) => TemporalBucket::Date,
            Some(Value::Bucketed(Bucketed::Time(_))) => TemporalBucket::Time,
            Some(Value::Bucketed(Bucketed::Timestamp(_))) => TemporalBucket::Timestamp,
            other => panic!("{kind} did not bucket: {other:?}"),
        };
        assert_eq!(Some(bucket), kind.temporal_bucket(), "{kind}");
    }
}

#[test]
fn is_null_false_inverts_the_check() {
    let name = field("name", ScalarKind::Text);

    let (built, _) = build(&name, Operator::IsNull, &["true"]);
    assert_eq!(built.map(|s| s.semantics), Some(Semantics::Null { negated: false }));

    let (built, _) = build(&name, Operator::IsNull, &["false"]);
    assert_eq!(built.map(|s| s.semantics), Some(Semantics::Null { negated: true }));

    let (built, _) = build(&name, Operator::IsNotNull, &["true"]);
    assert_eq!(built.map(|s| s.semantics), Some(Semantics::Null { negated: true }));

    let (built, _) = build(&name, Operator::IsNotNull, &["FALSE"]);
    assert_eq!(built.map(|s| s.semantics), Some(Semantics::Null { negated: false }));
}

#[test]
fn is_null_with_null_literal_contributes_nothing() {
    let (built, errors) = build(&field("age", ScalarKind::Int32), Operator::IsNull, &["null"]);

    assert!(built.is_none());
    assert!(errors.is_empty());
}

#[test]
fn membership_requires_every_value() {
    let id = field("id", ScalarKind::Int64);

    let (built, errors) = build(&id, Operator::In, &["1", "2", "3"]);
    let spec = built.expect("in should build");
    assert_eq!(spec.semantics, Semantics::Membership { negated: false });
    assert_eq!(spec.operands.len(), 3);
    assert!(errors.is_empty());

    let (built, errors) = build(&id, Operator::NotIn, &["1", "x"]);
    assert!(built.is_none());
    assert_eq!(errors.len(), 1);
    assert_eq!(errors.errors()[0].kind, ErrorKind::InputCast);
}

#[test]
fn between_with_one_value_is_an_arity_error() {
    let (built, errors) = build(&field("age", ScalarKind::Int32), Operator::Between, &["18"]);

    assert!(built.is_none());
    assert_eq!(errors.len(), 1);

    let err = &errors.errors()[0];
    assert_eq!(err.kind, ErrorKind::Arity);
    assert!(err.message.contains("between"));
    assert!(err.message.contains('2'));
    assert_eq!(errors.class(), Some(ErrorClass::Configuration));
}

#[test]
fn not_between_builds_negated_range() {
    let (built, _) = build(&field("age", ScalarKind::Int32), Operator::NotBetween, &["18", "65"]);
    let spec = built.expect("range should build");

    assert_eq!(spec.semantics, Semantics::Range { negated: true });
    assert_eq!(spec.operands, vec![Value::Int32(18), Value::Int32(65)]);
}

#[test]
fn case_insensitive_text_uppercases_operand() {
    let name = field("name", ScalarKind::Text);

    let (built, _) = build(&name, Operator::IStartsWith, &["straße"]);
    let spec = built.expect("istarts_with should build");
    assert_eq!(
        spec.semantics,
        Semantics::Text {
            op: TextOp::StartsWith,
            case: TextCase::Upper
        }
    );
    assert_eq!(spec.operands, vec![Value::Text("STRASSE".to_string())]);

    let (built, _) = build(&name, Operator::EndsWith, &["Son"]);
    let spec = built.expect("ends_with should build");
    assert_eq!(spec.operands, vec![Value::Text("Son".to_string())]);
}

#[test]
fn unsupported_operator_is_a_configuration_error() {
    let (built, errors) = build(&field("age", ScalarKind::Int32), Operator::Contains, &["1"]);

    assert!(built.is_none());
    assert_eq!(errors.len(), 1);
    assert_eq!(errors.errors()[0].kind, ErrorKind::UnsupportedOperator);
    assert_eq!(errors.class(), Some(ErrorClass::Configuration));
}

#[test]
fn orders_delegate_to_the_materializer() {
    let age = field("age", ScalarKind::Int32);
    let order = build_order(&SpecMaterializer, &age, Direction::Desc);

    assert_eq!(order.direction, Direction::Desc);
    assert_eq!(order.field, age);
}

proptest! {
    #[test]
    fn range_arity_violations_report_exactly_once(
        values in prop::collection::vec("[0-9]{1,3}", 0..6),
        negated in any::<bool>(),
    ) {
        prop_assume!(values.len() != 2);
        let op = if negated { Operator::NotBetween } else { Operator::Between };
        let raw: Vec<&str> = values.iter().map(String::as_str).collect();

        let (built, errors) = build(&field("age", ScalarKind::Int32), op, &raw);

        prop_assert!(built.is_none());
        prop_assert_eq!(errors.len(), 1);
        prop_assert_eq!(errors.errors()[0].kind, ErrorKind::Arity);
    }
}
