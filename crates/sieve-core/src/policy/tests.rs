use super::*;
use crate::{
    build::SpecMaterializer,
    direction::Direction,
    obs::with_sink,
    operator::Operator,
    test_support::CaptureSink,
    wrapper::{FilterWrapper, ResolvedKind, SortWrapper, SourceType},
};
use proptest::prelude::*;
use sieve_primitives::ScalarKind;
use std::rc::Rc;

fn query(field: &str, original: &str, op: Operator, values: &[&str]) -> FilterWrapper {
    FilterWrapper::new(
        field,
        original,
        op,
        values.iter().map(ToString::to_string).collect(),
        SourceType::QueryParam,
    )
}

fn body(field: &str, op: Operator, values: &[&str]) -> FilterWrapper {
    FilterWrapper::new(
        field,
        field,
        op,
        values.iter().map(ToString::to_string).collect(),
        SourceType::RequestBody,
    )
}

fn context() -> FilterContext<SpecMaterializer> {
    FilterContext::new("employee")
        .field("age", FieldPolicy::new([Operator::Gte, Operator::Lte, Operator::Eq]))
        .field(
            "name",
            FieldPolicy::new([Operator::IContains]).sources([SourceType::RequestBody]),
        )
        .custom(
            "seniority",
            CustomFieldPolicy::<SpecMaterializer>::new(ScalarKind::Int32, |_| None)
                .sources([SourceType::QueryParam]),
        )
}

#[test]
fn normal_policy_requires_operator_and_source() {
    let ctx = context();

    let classified = ctx.classify(query("age", "age__gte", Operator::Gte, &["1"]));
    assert_eq!(
        classified.and_then(|w| w.resolved_kind),
        Some(ResolvedKind::Normal)
    );

    assert!(ctx
        .classify(query("age", "age__gt", Operator::Gt, &["1"]))
        .is_none());
    assert!(ctx
        .classify(query("name", "name__icontains", Operator::IContains, &["a"]))
        .is_none());
    assert!(ctx.classify(body("name", Operator::IContains, &["a"])).is_some());
}

#[test]
fn custom_policy_matches_original_token_and_wins() {
    let ctx = context().field("seniority", FieldPolicy::new([Operator::Eq]));

    let classified = ctx.classify(query("seniority", "seniority", Operator::Eq, &["3"]));
    assert_eq!(
        classified.and_then(|w| w.resolved_kind),
        Some(ResolvedKind::Custom)
    );

    // custom key is the original token, so a suffixed name falls through
    let classified = ctx.classify(query("seniority", "seniority__eq", Operator::Eq, &["3"]));
    assert_eq!(
        classified.and_then(|w| w.resolved_kind),
        Some(ResolvedKind::Normal)
    );
}

#[test]
fn unconfigured_wrappers_are_dropped_with_an_event() {
    let capture = Rc::new(CaptureSink::default());
    let ctx = context();

    let classified = with_sink(capture.clone(), || {
        ctx.classify(query("salary", "salary__gt", Operator::Gt, &["1"]))
    });

    assert!(classified.is_none());
    assert_eq!(capture.labels(), vec!["unconfigured:salary__gt".to_string()]);
}

#[test]
fn body_overrides_query_on_the_same_key() {
    let capture = Rc::new(CaptureSink::default());

    let merged = with_sink(capture.clone(), || {
        merge_filters([
            query("age", "age__gte", Operator::Gte, &["21"]),
            query("name", "name", Operator::Eq, &["x"]),
            body("age", Operator::Lte, &["65"]),
        ])
    });

    assert_eq!(merged.len(), 2);
    assert_eq!(merged[0].source, SourceType::RequestBody);
    assert_eq!(merged[0].operator, Operator::Lte);
    assert_eq!(merged[0].values, vec!["65"]);
    assert_eq!(merged[1].field, "name");
    assert_eq!(capture.labels(), vec!["overridden:age".to_string()]);
}

#[test]
fn body_key_is_the_original_token() {
    let mut padded = body("age", Operator::Eq, &["1"]);
    padded.original_field_name = " age".to_string();

    assert_eq!(filter_key(&padded), " age");
    assert_eq!(
        filter_key(&query("age", "age__eq", Operator::Eq, &[])),
        "age"
    );

    let merged = merge_filters([query("age", "age__eq", Operator::Eq, &["2"]), padded]);
    assert_eq!(merged.len(), 2);
}

#[test]
fn sort_policies_check_direction_and_source() {
    let ctx: SortContext<SpecMaterializer> = SortContext::new("employee")
        .field("age", SortFieldPolicy::new().directions([Direction::Asc]))
        .custom("rank", CustomSortPolicy::<SpecMaterializer>::new(|_| None));

    let asc = SortWrapper::new("age", "age", Direction::Asc, SourceType::QueryParam);
    let desc = SortWrapper::new("age", "age", Direction::Desc, SourceType::QueryParam);
    let rank = SortWrapper::new("rank", "rank", Direction::Desc, SourceType::RequestBody);

    assert_eq!(
        ctx.classify(asc).and_then(|w| w.resolved_kind),
        Some(ResolvedKind::Normal)
    );
    assert!(ctx.classify(desc).is_none());
    assert_eq!(
        ctx.classify(rank).and_then(|w| w.resolved_kind),
        Some(ResolvedKind::Custom)
    );
}

#[test]
fn sorts_merge_by_field_across_sources() {
    let merged = merge_sorts([
        SortWrapper::new("age", "age", Direction::Desc, SourceType::QueryParam),
        SortWrapper::new("age", " age ", Direction::Asc, SourceType::RequestBody),
    ]);

    assert_eq!(merged.len(), 1);
    assert_eq!(merged[0].direction, Direction::Asc);
}

proptest! {
    #[test]
    fn merge_prefers_body_when_both_sources_exist(
        query_values in prop::collection::vec("[0-9]{1,3}", 1..4),
        body_values in prop::option::of(prop::collection::vec("[0-9]{1,3}", 1..4)),
    ) {
        let query_refs: Vec<&str> = query_values.iter().map(String::as_str).collect();
        let mut wrappers = vec![query("age", "age__gte", Operator::Gte, &query_refs)];
        if let Some(values) = &body_values {
            let refs: Vec<&str> = values.iter().map(String::as_str).collect();
            wrappers.push(body("age", Operator::Lte, &refs));
        }

        let merged = merge_filters(wrappers);
        prop_assert_eq!(merged.len(), 1);

        match body_values {
            Some(values) => {
                prop_assert_eq!(&merged[0].values, &values);
                prop_assert_eq!(merged[0].operator, Operator::Lte);
            }
            None => {
                prop_assert_eq!(&merged[0].values, &query_values);
                prop_assert_eq!(merged[0].operator, Operator::Gte);
            }
        }
    }
}
