use super::*;
use crate::{obs::with_sink, test_support::CaptureSink};
use sieve_primitives::ScalarKind;
use std::rc::Rc;

fn resolver() -> PathResolver {
    PathResolver::new(crate::test_support::schema(), "employee", ".")
}

#[test]
fn terminal_attribute_on_root() {
    let mut resolver = resolver();
    let field = resolver.resolve("age").expect("age should resolve");

    assert_eq!(field.node, JoinId::ROOT);
    assert_eq!(field.attribute(), "age");
    assert_eq!(field.kind, FieldKind::from(ScalarKind::Int32));
    assert_eq!(resolver.graph().join_count(), 0);
}

#[test]
fn three_hop_path_reuses_existing_manager_join() {
    let capture = Rc::new(CaptureSink::default());
    let mut resolver = resolver();

    let (first, second) = with_sink(capture.clone(), || {
        let first = resolver.resolve("manager.name").expect("manager.name");
        let second = resolver
            .resolve("manager.department.name")
            .expect("manager.department.name");
        (first, second)
    });

    let graph = resolver.into_graph();
    assert_eq!(graph.join_count(), 2);
    assert_eq!(first.node, manager_join(&graph));
    assert_eq!(second.attribute_path, vec!["name".to_string()]);
    assert_eq!(
        graph.get(second.node).map(|node| node.entity.as_str()),
        Some("department")
    );
    assert_eq!(
        capture.labels(),
        vec![
            "join_created:manager".to_string(),
            "join_reused:manager".to_string(),
            "join_created:department".to_string(),
        ]
    );
}

fn manager_join(graph: &JoinGraph) -> JoinId {
    graph
        .lookup(JoinId::ROOT, "manager")
        .expect("manager join should exist")
}

#[test]
fn path_ending_on_association_compares_by_identifier() {
    let mut resolver = resolver();
    let field = resolver.resolve("department").expect("department");

    assert_eq!(
        field.attribute_path,
        vec!["department".to_string(), "code".to_string()]
    );
    assert_eq!(field.kind, FieldKind::from(ScalarKind::Text));
    assert_eq!(field.node, JoinId::ROOT);
    assert_eq!(resolver.graph().join_count(), 0);
}

#[test]
fn nested_association_leaf_joins_only_intermediate_hops() {
    let mut resolver = resolver();
    let field = resolver.resolve("manager.manager").expect("manager.manager");

    assert_eq!(field.attribute_path, vec!["manager".to_string(), "id".to_string()]);
    assert_eq!(field.kind, FieldKind::from(ScalarKind::Int64));
    assert_eq!(resolver.graph().join_count(), 1);
}

#[test]
fn terminal_segment_ends_walk_early() {
    let mut resolver = resolver();
    let field = resolver.resolve("age.years.total").expect("early leaf");

    assert_eq!(field.attribute(), "age");
    assert_eq!(field.path, "age.years.total");
}

#[test]
fn unknown_segment_is_reported() {
    let mut resolver = resolver();
    let err = resolver
        .resolve("manager.nickname")
        .expect_err("nickname is not an attribute");

    assert_eq!(
        err,
        PathError::UnknownAttribute {
            entity: "employee".to_string(),
            segment: "nickname".to_string(),
            path: "manager.nickname".to_string(),
        }
    );
    assert!(matches!(resolver.resolve(""), Err(PathError::Empty)));
}

#[test]
fn custom_separator_is_honored() {
    let mut resolver = PathResolver::new(crate::test_support::schema(), "employee", "/");
    let field = resolver.resolve("department/budget").expect("department/budget");

    assert_eq!(field.kind, FieldKind::from(ScalarKind::Int64));
    assert_eq!(resolver.graph().join_count(), 1);
}
