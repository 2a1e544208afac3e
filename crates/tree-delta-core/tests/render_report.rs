//! Integration tests for report rendering: per-kind detail output,
//! field presence, path styling, and the write path.

use serde_json::json;
use tree_delta_core::{Detail, DetailKind, Diff, DocumentSet, Renderer, Report};
use tree_delta_node::Node;
use tree_delta_path::Path;

fn single_doc_report(diffs: Vec<Diff>) -> Report {
    Report::new(
        DocumentSet::new(vec![Node::Mapping(vec![])]),
        DocumentSet::new(vec![Node::Mapping(vec![])]),
        diffs,
    )
}

fn diff_at(path: &str, details: Vec<Detail>) -> Diff {
    Diff::new(Some(Path::parse_dotted(path).unwrap()), details)
}

fn rendered(report: &Report) -> serde_json::Value {
    let doc = Renderer::new(report).generate().expect("render should succeed");
    serde_json::to_value(&doc).expect("doc should serialize")
}

#[test]
fn empty_report_has_no_differences_field() {
    let report = single_doc_report(vec![]);
    assert_eq!(rendered(&report), json!({"summary": {"changes": 0}}));
}

#[test]
fn addition_of_absent_node_renders_null_token() {
    let report = single_doc_report(vec![diff_at("a.b", vec![Detail::addition(None)])]);
    assert_eq!(
        rendered(&report),
        json!({
            "summary": {"changes": 1},
            "differences": [
                {"path": "a.b", "details": [{"kind": "+", "addition": "null"}]}
            ]
        })
    );
}

#[test]
fn addition_and_removal_render_compact_json() {
    let report = single_doc_report(vec![diff_at(
        "spec.env",
        vec![
            Detail::addition(Some(Node::Mapping(vec![
                ("name".into(), Node::from("DEBUG")),
                ("value".into(), Node::from("1")),
            ]))),
            Detail::removal(Some(Node::Sequence(vec![Node::from(1), Node::from(2)]))),
        ],
    )]);
    assert_eq!(
        rendered(&report),
        json!({
            "summary": {"changes": 1},
            "differences": [
                {"path": "spec.env", "details": [
                    {"kind": "+", "addition": "{\"name\":\"DEBUG\",\"value\":\"1\"}"},
                    {"kind": "-", "removal": "[1,2]"}
                ]}
            ]
        })
    );
}

#[test]
fn string_modification_keeps_raw_values() {
    let report = single_doc_report(vec![diff_at(
        "version",
        vec![Detail::modification(Node::from("a"), Node::from("b"))],
    )]);
    assert_eq!(
        rendered(&report),
        json!({
            "summary": {"changes": 1},
            "differences": [
                {"path": "version", "details": [
                    {"kind": "~", "addition": "b", "removal": "a"}
                ]}
            ]
        })
    );
}

#[test]
fn mixed_type_modification_renders_compact_json_for_both_sides() {
    let report = single_doc_report(vec![diff_at(
        "replicas",
        vec![Detail::modification(Node::from("3"), Node::from(4))],
    )]);
    assert_eq!(
        rendered(&report),
        json!({
            "summary": {"changes": 1},
            "differences": [
                {"path": "replicas", "details": [
                    {"kind": "~", "addition": "4", "removal": "\"3\""}
                ]}
            ]
        })
    );
}

#[test]
fn binary_modification_renders_hex_dumps() {
    // "hello" / "world" in base64
    let report = single_doc_report(vec![diff_at(
        "data.blob",
        vec![Detail::modification(
            Node::Binary("aGVsbG8=".into()),
            Node::Binary("d29ybGQ=".into()),
        )],
    )]);
    assert_eq!(
        rendered(&report),
        json!({
            "summary": {"changes": 1},
            "differences": [
                {"path": "data.blob", "details": [{
                    "kind": "~",
                    "addition": "00000000  77 6f 72 6c 64                                    |world|\n",
                    "removal": "00000000  68 65 6c 6c 6f                                    |hello|\n"
                }]}
            ]
        })
    );
}

#[test]
fn binary_modification_with_undecodable_side_fails_whole_render() {
    let report = single_doc_report(vec![diff_at(
        "data.blob",
        vec![Detail::modification(
            Node::Binary("aGVsbG8=".into()),
            Node::Binary("not base64!!".into()),
        )],
    )]);
    assert!(Renderer::new(&report).generate().is_err());
}

#[test]
fn order_change_renders_string_arrays_in_both_orders() {
    let report = single_doc_report(vec![diff_at(
        "spec.items",
        vec![Detail::order_change(
            Node::Sequence(vec![Node::from("x"), Node::from("y"), Node::from("z")]),
            Node::Sequence(vec![Node::from("z"), Node::from("x"), Node::from("y")]),
        )],
    )]);
    assert_eq!(
        rendered(&report),
        json!({
            "summary": {"changes": 1},
            "differences": [
                {"path": "spec.items", "details": [{
                    "kind": "->",
                    "addition": "[\"z\",\"x\",\"y\"]",
                    "removal": "[\"x\",\"y\",\"z\"]"
                }]}
            ]
        })
    );
}

#[test]
fn order_change_falls_back_to_compact_json_for_container_elements() {
    let report = single_doc_report(vec![diff_at(
        "spec.items",
        vec![Detail::order_change(
            Node::Sequence(vec![
                Node::Mapping(vec![("k".into(), Node::from(1))]),
                Node::from(2),
            ]),
            Node::Sequence(vec![
                Node::from(2),
                Node::Mapping(vec![("k".into(), Node::from(1))]),
            ]),
        )],
    )]);
    assert_eq!(
        rendered(&report),
        json!({
            "summary": {"changes": 1},
            "differences": [
                {"path": "spec.items", "details": [{
                    "kind": "->",
                    "addition": "[\"2\",\"{\\\"k\\\":1}\"]",
                    "removal": "[\"{\\\"k\\\":1}\",\"2\"]"
                }]}
            ]
        })
    );
}

#[test]
fn order_change_on_non_sequence_is_an_empty_detail() {
    let report = single_doc_report(vec![diff_at(
        "name",
        vec![Detail::order_change(Node::from("a"), Node::from("b"))],
    )]);
    assert_eq!(
        rendered(&report),
        json!({
            "summary": {"changes": 1},
            "differences": [
                {"path": "name", "details": [{"kind": "->"}]}
            ]
        })
    );
}

#[test]
fn pathless_diff_renders_empty_path_string() {
    let report = single_doc_report(vec![Diff::new(
        None,
        vec![Detail::addition(Some(Node::from("v")))],
    )]);
    assert_eq!(
        rendered(&report),
        json!({
            "summary": {"changes": 1},
            "differences": [
                {"path": "", "details": [{"kind": "+", "addition": "\"v\""}]}
            ]
        })
    );
}

#[test]
fn go_patch_path_style_is_selectable() {
    let report = single_doc_report(vec![diff_at(
        "spec.containers.0",
        vec![Detail::addition(Some(Node::from("v")))],
    )]);
    let doc = Renderer::new(&report)
        .with_go_patch_paths(true)
        .generate()
        .unwrap();
    assert_eq!(doc.differences[0].path, "/spec/containers/0");
}

#[test]
fn document_index_prefix_only_for_multi_document_input() {
    let diffs = vec![Diff::new(
        Some(Path::in_document(
            1,
            vec!["spec".into(), "name".into()],
        )),
        vec![Detail::addition(Some(Node::from("v")))],
    )];

    let single = single_doc_report(diffs.clone());
    assert_eq!(
        Renderer::new(&single).generate().unwrap().differences[0].path,
        "spec.name"
    );

    let multi = Report::new(
        DocumentSet::new(vec![Node::Mapping(vec![]), Node::Mapping(vec![])]),
        DocumentSet::new(vec![Node::Mapping(vec![]), Node::Mapping(vec![])]),
        diffs,
    );
    assert_eq!(
        Renderer::new(&multi).generate().unwrap().differences[0].path,
        "#1:spec.name"
    );
}

#[test]
fn write_report_emits_compact_json_and_flushes() {
    let report = single_doc_report(vec![diff_at(
        "a",
        vec![Detail::modification(Node::from("x"), Node::from("y"))],
    )]);

    let mut out = Vec::new();
    Renderer::new(&report).write_report(&mut out).unwrap();

    let doc = Renderer::new(&report).generate().unwrap();
    assert_eq!(out, serde_json::to_string(&doc).unwrap().into_bytes());
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "{\"summary\":{\"changes\":1},\"differences\":[{\"path\":\"a\",\
         \"details\":[{\"kind\":\"~\",\"addition\":\"y\",\"removal\":\"x\"}]}]}"
    );
}

#[test]
fn diff_order_is_preserved_in_output() {
    let report = single_doc_report(vec![
        diff_at("z", vec![Detail::addition(Some(Node::from(1)))]),
        diff_at("a", vec![Detail::removal(Some(Node::from(2)))]),
        diff_at("m", vec![Detail::addition(Some(Node::from(3)))]),
    ]);
    let doc = Renderer::new(&report).generate().unwrap();
    let paths: Vec<&str> = doc.differences.iter().map(|d| d.path.as_str()).collect();
    assert_eq!(paths, vec!["z", "a", "m"]);
    assert_eq!(doc.summary.changes, 3);
}

#[test]
fn kind_tags_match_wire_format() {
    assert_eq!(DetailKind::Addition.as_str(), "+");
    assert_eq!(DetailKind::Removal.as_str(), "-");
    assert_eq!(DetailKind::Modification.as_str(), "~");
    assert_eq!(DetailKind::OrderChange.as_str(), "->");
}
