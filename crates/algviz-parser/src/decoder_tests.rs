//! Unit tests for the snapshot decoder.

use algviz_core::structure::{ObjectRef, Snapshot, Structure, StructureKind};
use proptest::prelude::*;

use crate::{ErrorCode, ParseError, decode_snapshot, decode_snapshots};

fn decode_ok(source: &str) -> Snapshot {
    match decode_snapshot(source) {
        Ok(snapshot) => snapshot,
        Err(err) => panic!("Expected decoding to succeed, got: {err} {:?}", err.diagnostics()),
    }
}

fn decode_err(source: &str) -> ParseError {
    match decode_snapshot(source) {
        Ok(_) => panic!("Expected decoding to fail, but it succeeded"),
        Err(err) => err,
    }
}

fn codes(err: &ParseError) -> Vec<ErrorCode> {
    err.diagnostics().iter().filter_map(|d| d.code()).collect()
}

fn structure(snapshot: &Snapshot, uid: &str) -> Structure {
    let handle = snapshot.graph().find(uid).expect("uid should exist");
    snapshot.graph().get(handle).structure().clone()
}

#[test]
fn test_decode_string_object() {
    let snapshot = decode_ok(r#"[{"uid": "s", "type": "string", "data": "hello world!"}]"#);
    assert_eq!(
        structure(&snapshot, "s"),
        Structure::String("hello world!".to_string())
    );
    assert_eq!(snapshot.roots().len(), 1);
}

#[test]
fn test_type_alias() {
    let snapshot = decode_ok(r#"[{"uid": "s", "T": "string", "data": "x"}]"#);
    assert_eq!(structure(&snapshot, "s").kind(), StructureKind::String);
}

#[test]
fn test_forward_reference_resolves() {
    let snapshot = decode_ok(
        r#"[
            {"uid": "p", "T": "ptr", "data": "target"},
            {"uid": "target", "T": "string", "data": "hi"}
        ]"#,
    );
    let target = snapshot.graph().find("target").unwrap();
    assert_eq!(structure(&snapshot, "p"), Structure::Pointer { referent: target });
}

#[test]
fn test_string_data_is_literal_text() {
    // "other" must not be resolved as a uid inside a string object.
    let snapshot = decode_ok(r#"[{"uid": "s", "T": "string", "data": "other"}]"#);
    assert_eq!(structure(&snapshot, "s"), Structure::String("other".to_string()));
}

#[test]
fn test_inline_tree_is_post_order() {
    let snapshot = decode_ok(
        r#"[{"uid": "root", "T": "treenode", "data": 1, "children": [
            {"uid": "left", "T": "treenode", "data": 2},
            null,
            {"uid": "right", "T": "treenode", "data": 3.5}
        ]}]"#,
    );
    let graph = snapshot.graph();
    let Structure::TreeNode { data, children } = structure(&snapshot, "root") else {
        panic!("root should be a tree node");
    };
    assert_eq!(graph.get(data).structure(), &Structure::Int(1));
    assert_eq!(children.len(), 3);
    assert_eq!(children[0], graph.find("left").unwrap());
    assert_eq!(children[1], ObjectRef::NULL);
    assert_eq!(children[2], graph.find("right").unwrap());
    assert!(graph.get(children[0]).structure().is_leaf());

    let Structure::TreeNode { data, .. } = structure(&snapshot, "right") else {
        panic!("right should be a tree node");
    };
    assert_eq!(graph.get(data).structure(), &Structure::Float(3.5));
    assert_eq!(snapshot.roots(), &[graph.find("root").unwrap()]);
}

#[test]
fn test_inline_list_becomes_array() {
    let snapshot = decode_ok(r#"[{"uid": "n", "T": "node", "data": [1, "s"]}, {"uid": "s", "T": "string", "data": "x"}]"#);
    let graph = snapshot.graph();
    let Structure::Node { data } = structure(&snapshot, "n") else {
        panic!("n should be a node");
    };
    let Structure::Array { items } = graph.get(data).structure() else {
        panic!("inline list should decode to an array");
    };
    assert_eq!(items.len(), 2);
    assert_eq!(items[1], graph.find("s").unwrap());
}

#[test]
fn test_graph_and_edges() {
    let snapshot = decode_ok(
        r#"[{"uid": "g", "T": "graph",
            "nodes": [{"uid": "a", "T": "node", "data": 1}, {"uid": "b", "T": "node", "data": 2}],
            "edges": [{"T": "edge", "from": "a", "to": "b"}]}]"#,
    );
    let graph = snapshot.graph();
    let Structure::Graph { nodes, edges } = structure(&snapshot, "g") else {
        panic!("g should be a graph");
    };
    assert_eq!(nodes.len(), 2);
    let Structure::Edge { orig, dest, data } = graph.get(edges[0]).structure() else {
        panic!("edge expected");
    };
    assert_eq!(*orig, graph.find("a").unwrap());
    assert_eq!(*dest, graph.find("b").unwrap());
    assert_eq!(*data, ObjectRef::NULL);
}

#[test]
fn test_var_and_metadata() {
    let snapshot = decode_ok(
        r#"[{"uid": "xs", "T": "array", "data": [1, 2], "var": "xs",
             "metadata": {"draw_once": false, "layout": "linked_array"}}]"#,
    );
    let handle = snapshot.var("xs").unwrap();
    let metadata = snapshot.graph().get(handle).metadata();
    assert!(!metadata.draw_once());
    assert_eq!(metadata.layout(), Some("linked_array"));
}

#[test]
fn test_auto_uids_are_generated() {
    let snapshot = decode_ok(r#"[{"T": "string", "data": "anon"}]"#);
    let root = snapshot.roots()[0];
    assert!(snapshot.graph().get(root).uid().is_auto());
}

#[test]
fn test_null_object_is_shared() {
    let snapshot = decode_ok(r#"[{"T": "null"}]"#);
    assert_eq!(snapshot.roots(), &[ObjectRef::NULL]);
}

#[test]
fn test_null_with_uid_fails() {
    let err = decode_err(r#"[{"uid": "n", "T": "null"}]"#);
    assert_eq!(codes(&err), vec![ErrorCode::E205]);
}

#[test]
fn test_both_type_keys_fail() {
    let err = decode_err(r#"[{"T": "string", "type": "string", "data": "x"}]"#);
    assert_eq!(codes(&err), vec![ErrorCode::E202]);
}

#[test]
fn test_unknown_type_fails() {
    let err = decode_err(r#"[{"T": "tree"}]"#);
    assert_eq!(codes(&err), vec![ErrorCode::E201]);
    assert!(err.diagnostics()[0].help().unwrap().contains("treenode"));
}

#[test]
fn test_missing_field_fails() {
    let err = decode_err(r#"[{"uid": "p", "T": "ptr"}]"#);
    assert_eq!(codes(&err), vec![ErrorCode::E203]);
    assert!(err.to_string().contains("`data`"));
}

#[test]
fn test_duplicate_uid_fails() {
    let err = decode_err(
        r#"[{"uid": "a", "T": "string", "data": "1"}, {"uid": "a", "T": "string", "data": "2"}]"#,
    );
    assert_eq!(codes(&err), vec![ErrorCode::E300]);
    assert_eq!(err.diagnostics()[0].path(), Some("$[1]"));
}

#[test]
fn test_unresolved_uid_reports_path() {
    let err = decode_err(r#"[{"T": "treenode", "children": ["ghost"]}]"#);
    assert_eq!(codes(&err), vec![ErrorCode::E301]);
    assert_eq!(err.diagnostics()[0].path(), Some("$[0].children[0]"));
}

#[test]
fn test_reserved_uid_fails() {
    let err = decode_err(r##"[{"uid": "#1", "T": "widget"}]"##);
    assert_eq!(codes(&err), vec![ErrorCode::E302]);
}

#[test]
fn test_duplicate_var_fails() {
    let err = decode_err(
        r#"[{"T": "string", "data": "1", "var": "x"}, {"T": "string", "data": "2", "var": "x"}]"#,
    );
    assert_eq!(codes(&err), vec![ErrorCode::E303]);
}

#[test]
fn test_invalid_metadata_fails() {
    let err = decode_err(r#"[{"T": "widget", "metadata": {"colour": "red"}}]"#);
    assert_eq!(codes(&err), vec![ErrorCode::E206]);
}

#[test]
fn test_multiple_errors_are_collected() {
    let err = decode_err(r#"[{"T": "bogus"}, 5, {"T": "ptr", "data": "nowhere"}]"#);
    assert_eq!(
        codes(&err),
        vec![ErrorCode::E201, ErrorCode::E101, ErrorCode::E301]
    );
    assert!(err.to_string().ends_with("(+2 more)"));
}

#[test]
fn test_malformed_json_has_span() {
    let source = "[{\"T\": \"string\", \"data\": }]";
    let err = decode_err(source);
    let diag = &err.diagnostics()[0];
    assert_eq!(diag.code(), Some(ErrorCode::E100));
    let span = diag.span().expect("syntax errors carry a span");
    assert!(span.start() <= source.len());
}

#[test]
fn test_top_level_must_be_list() {
    let err = decode_err(r#"{"T": "string", "data": "x"}"#);
    assert_eq!(codes(&err), vec![ErrorCode::E101]);
}

#[test]
fn test_decode_snapshots_history() {
    let snapshots = decode_snapshots(
        r#"[
            [{"uid": "a", "T": "string", "data": "first"}],
            [{"uid": "a", "T": "string", "data": "second"}]
        ]"#,
    )
    .unwrap();
    assert_eq!(snapshots.len(), 2);
    assert_eq!(
        structure(&snapshots[1], "a"),
        Structure::String("second".to_string())
    );
}

#[test]
fn test_decode_snapshots_single() {
    let snapshots = decode_snapshots(r#"[{"T": "string", "data": "only"}]"#).unwrap();
    assert_eq!(snapshots.len(), 1);
}

fn check_string_text_survives(text: &str) -> Result<(), TestCaseError> {
    let source = format!(
        r#"[{{"uid": "s", "T": "string", "data": {}}}]"#,
        serde_json::to_string(text).unwrap()
    );
    let snapshot = decode_snapshot(&source).map_err(|err| TestCaseError::fail(err.to_string()))?;
    prop_assert_eq!(structure(&snapshot, "s"), Structure::String(text.to_string()));
    Ok(())
}

fn check_array_length_preserved(items: &[i64]) -> Result<(), TestCaseError> {
    let source = format!(
        r#"[{{"uid": "xs", "T": "array", "data": {}}}]"#,
        serde_json::to_string(items).unwrap()
    );
    let snapshot = decode_snapshot(&source).map_err(|err| TestCaseError::fail(err.to_string()))?;
    let Structure::Array { items: decoded } = structure(&snapshot, "xs") else {
        return Err(TestCaseError::fail("expected an array"));
    };
    prop_assert_eq!(decoded.len(), items.len());
    for (handle, value) in decoded.iter().zip(items) {
        prop_assert_eq!(snapshot.graph().get(*handle).structure(), &Structure::Int(*value));
    }
    Ok(())
}

proptest! {
    #[test]
    fn string_text_survives(text in ".*") {
        check_string_text_survives(&text)?;
    }

    #[test]
    fn array_length_preserved(items in proptest::collection::vec(any::<i64>(), 0..20)) {
        check_array_length_preserved(&items)?;
    }
}
