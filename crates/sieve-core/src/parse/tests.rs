use super::*;
use crate::{
    config::OperatorCase,
    direction::Direction,
    operator::Operator,
    parse::query::split_operator,
    wrapper::SourceType,
};
use proptest::prelude::*;

fn filters(params: &QueryParams) -> Vec<crate::wrapper::FilterWrapper> {
    let config = ResolverConfig::default();
    RequestParser::new(&config).query_filters(params)
}

#[test]
fn operator_suffix_is_split_off() {
    let parsed = filters(&QueryParams::new().with("age__gte", "21"));

    assert_eq!(parsed.len(), 1);
    assert_eq!(parsed[0].field, "age");
    assert_eq!(parsed[0].original_field_name, "age__gte");
    assert_eq!(parsed[0].operator, Operator::Gte);
    assert_eq!(parsed[0].values, vec!["21"]);
    assert_eq!(parsed[0].source, SourceType::QueryParam);
    assert_eq!(parsed[0].resolved_kind, None);
}

#[test]
fn comma_values_become_a_sequence() {
    let parsed = filters(&QueryParams::new().with("status__in", "a,b,c"));

    assert_eq!(parsed[0].operator, Operator::In);
    assert_eq!(parsed[0].values, vec!["a", "b", "c"]);
}

#[test]
fn unknown_operator_keeps_whole_name_with_eq() {
    let parsed = filters(&QueryParams::new().with("name__zz", "x"));

    assert_eq!(parsed[0].field, "name__zz");
    assert_eq!(parsed[0].operator, Operator::Eq);
}

#[test]
fn operator_tokens_are_case_exact_in_query() {
    let parsed = filters(&QueryParams::new().with("age__GTE", "1"));

    assert_eq!(parsed[0].field, "age__GTE");
    assert_eq!(parsed[0].operator, Operator::Eq);
}

#[test]
fn empty_value_is_one_empty_string() {
    let parsed = filters(&QueryParams::new().with("name", ""));

    assert_eq!(parsed[0].values, vec![String::new()]);
}

#[test]
fn repeated_parameters_concatenate_values() {
    let params = QueryParams::from_pairs([("id__in", "1,2"), ("id__in", "3")]);
    let parsed = filters(&params);

    assert_eq!(parsed.len(), 1);
    assert_eq!(parsed[0].values, vec!["1", "2", "3"]);
}

#[test]
fn sort_parameter_is_not_a_filter() {
    let params = QueryParams::from_pairs([("sort", "-age,name"), ("age", "3")]);
    let parsed = filters(&params);

    assert_eq!(parsed.len(), 1);
    assert_eq!(parsed[0].field, "age");
}

#[test]
fn escaped_delimiter_stays_in_field() {
    let parsed = filters(&QueryParams::new().with("first____name__startswith", "J"));
    assert_eq!(parsed[0].field, "first____name__startswith");

    let parsed = filters(&QueryParams::new().with("first____name__starts_with", "J"));
    assert_eq!(parsed[0].field, "first____name");
    assert_eq!(parsed[0].operator, Operator::StartsWith);
}

#[test]
fn nested_paths_keep_their_separator() {
    let parsed = filters(&QueryParams::new().with("manager.department.name__icontains", "ops"));

    assert_eq!(parsed[0].field, "manager.department.name");
    assert_eq!(parsed[0].operator, Operator::IContains);
}

#[test]
fn custom_delimiter_is_used() {
    let config = ResolverConfig::default().with_delimiter("::");
    let parsed = RequestParser::new(&config).query_filters(&QueryParams::new().with("age::lt", "9"));

    assert_eq!(parsed[0].field, "age");
    assert_eq!(parsed[0].operator, Operator::Lt);
}

#[test]
fn query_sorts_parse_direction_prefix() {
    let config = ResolverConfig::default();
    let params = QueryParams::new().with("sort", "-age, name,,-");
    let sorts = RequestParser::new(&config).query_sorts(&params);

    let summary: Vec<_> = sorts
        .iter()
        .map(|s| (s.field.as_str(), s.original_field_name.as_str(), s.direction))
        .collect();
    assert_eq!(
        summary,
        vec![("age", "age", Direction::Desc), ("name", "name", Direction::Asc)]
    );
}

#[test]
fn custom_sort_param_name() {
    let config = ResolverConfig::default().with_sort_param("order");
    let params = QueryParams::from_pairs([("order", "name"), ("sort", "age")]);
    let parser = RequestParser::new(&config);

    assert_eq!(parser.query_sorts(&params).len(), 1);
    assert_eq!(parser.query_filters(&params)[0].field, "sort");
}

#[test]
fn body_filters_normalize_fields_and_operators() {
    let config = ResolverConfig::default();
    let entries = vec![
        FilterEntry::new(" age ", "GTE", "21"),
        FilterEntry::new("name", "nope", "x"),
        FilterEntry {
            field: Some("status".to_string()),
            operator: None,
            value: None,
        },
        FilterEntry::new("  ", "eq", "dropped"),
        FilterEntry::default(),
    ];

    let parsed = RequestParser::new(&config).body_filters(&entries);

    assert_eq!(parsed.len(), 3);
    assert_eq!(parsed[0].field, "age");
    assert_eq!(parsed[0].original_field_name, " age ");
    assert_eq!(parsed[0].operator, Operator::Gte);
    assert_eq!(parsed[1].operator, Operator::Eq);
    assert_eq!(parsed[2].operator, Operator::Eq);
    assert!(parsed[2].values.is_empty());
    assert!(parsed.iter().all(|w| w.source == SourceType::RequestBody));
}

#[test]
fn exact_body_operator_case_rejects_upper_case() {
    let config = ResolverConfig::default().with_body_operator_case(OperatorCase::Exact);
    let parsed = RequestParser::new(&config).body_filters(&[FilterEntry::new("age", "GTE", "1")]);

    assert_eq!(parsed[0].operator, Operator::Eq);
}

#[test]
fn body_entries_deserialize_from_json() {
    let entries: Vec<FilterEntry> = serde_json::from_value(serde_json::json!([
        { "field": "age", "operator": "between", "value": "18,65" },
        { "field": "name" }
    ]))
    .expect("entries should deserialize");
    let sorts: Vec<SortEntry> = serde_json::from_value(serde_json::json!([
        { "field": "age", "direction": "DESC" },
        { "field": "name", "direction": null },
        { "field": "" }
    ]))
    .expect("sorts should deserialize");

    let config = ResolverConfig::default();
    let parser = RequestParser::new(&config);
    let filters = parser.body_filters(&entries);
    let sorts = parser.body_sorts(&sorts);

    assert_eq!(filters[0].values, vec!["18", "65"]);
    assert_eq!(filters[1].operator, Operator::Eq);
    assert_eq!(sorts.len(), 2);
    assert_eq!(sorts[0].direction, Direction::Desc);
    assert_eq!(sorts[1].direction, Direction::Asc);
}

proptest! {
    #[test]
    fn trailing_operator_token_strips_exactly_one_segment(
        field in "[a-z][a-z.]{0,10}",
        op_index in 0..Operator::ALL.len(),
    ) {
        let op = Operator::ALL[op_index];
        let name = format!("{field}__{}", op.token());

        prop_assert_eq!(split_operator(&name, "__"), (field, op));
    }

    #[test]
    fn other_trailing_tokens_default_to_eq(
        field in "[a-z]{1,8}",
        suffix in "[a-z]{1,8}",
    ) {
        prop_assume!(Operator::from_token(&suffix).is_none());
        let name = format!("{field}__{suffix}");

        prop_assert_eq!(split_operator(&name, "__"), (name.clone(), Operator::Eq));
    }
}
