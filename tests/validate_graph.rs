//! Integration tests for definition validation (V001–V018).

mod helpers;

use helpers::*;
use serde_json::json;
use wfdsl_compiler::parse::{self, *};
use wfdsl_compiler::validate;

fn codes(def: &WorkflowDefinition) -> Vec<String> {
    let graph = WorkflowGraph::build(def).expect("Should build graph");
    validate::validate_definition(def, &graph)
        .into_iter()
        .map(|e| e.code)
        .collect()
}

#[test]
fn fixtures_pass() {
    for json in [
        include_str!("fixtures/linear_workflow.json"),
        include_str!("fixtures/branching_workflow.json"),
        include_str!("fixtures/cycle_workflow.json"),
    ] {
        let def = parse::parse(json).unwrap();
        assert!(codes(&def).is_empty(), "{}: {:?}", def.id, codes(&def));
    }
}

#[test]
fn v001_no_start() {
    let def = parse::parse(include_str!("fixtures/no_start.json")).unwrap();
    assert_eq!(codes(&def), vec!["V001"]);
}

#[test]
fn v001_two_starts() {
    let def = chain(vec![node("s1", NodeKind::Start), node("s2", NodeKind::Start)]);
    let found = codes(&def);
    assert!(found.contains(&"V001".to_string()), "{:?}", found);
}

#[test]
fn v004_duplicate_edge_id() {
    let def = definition(
        vec![node("s", NodeKind::Start), node("a", NodeKind::Activity), node("e", NodeKind::End)],
        vec![edge("e1", "s", "a"), edge("e1", "a", "e")],
    );
    assert_eq!(codes(&def), vec!["V004"]);
}

#[test]
fn v006_start_with_incoming_edge() {
    let def = definition(
        vec![node("s", NodeKind::Start), node("a", NodeKind::Activity)],
        vec![edge("e1", "s", "a"), edge("e2", "a", "s")],
    );
    assert_eq!(codes(&def), vec!["V006"]);
}

#[test]
fn v008_two_true_edges() {
    let def = definition(
        vec![
            node("s", NodeKind::Start),
            conditional("if", "x"),
            node("a", NodeKind::End),
            node("b", NodeKind::End),
        ],
        vec![
            edge("e1", "s", "if"),
            branch("e2", "if", "a", BranchLabel::True),
            branch("e3", "if", "b", BranchLabel::True),
        ],
    );
    assert_eq!(codes(&def), vec!["V008"]);
}

#[test]
fn v011_duplicate_key_same_direction() {
    let mut a = activity("a", "A");
    a.config.parameters = vec![
        input("amount", ValueType::Number, json!(1)),
        input("amount", ValueType::Number, json!(2)),
        output("amount", ValueType::Number),
    ];
    let def = chain(vec![node("s", NodeKind::Start), a]);
    assert_eq!(codes(&def), vec!["V011"]);
}

#[test]
fn v011_duplicate_global_key() {
    let mut def = chain(vec![node("s", NodeKind::Start)]);
    def.globals = vec![
        input("region", ValueType::String, json!("eu")),
        input("region", ValueType::String, json!("us")),
    ];
    assert_eq!(codes(&def), vec!["V011"]);
}

#[test]
fn v012_empty_key() {
    let mut a = activity("a", "A");
    a.config.parameters = vec![input("  ", ValueType::String, json!("x"))];
    let def = chain(vec![node("s", NodeKind::Start), a]);
    assert_eq!(codes(&def), vec!["V012"]);
}

#[test]
fn v013_workflow_type_not_identifier() {
    let mut def = chain(vec![node("s", NodeKind::Start)]);
    def.workflow_config.workflow_type = "123-go".into();
    assert_eq!(codes(&def), vec!["V013"]);
}

#[test]
fn v013_workflow_type_is_go_keyword() {
    let mut def = chain(vec![node("s", NodeKind::Start)]);
    def.workflow_config.workflow_type = "func".into();
    assert_eq!(codes(&def), vec!["V013"]);
}

#[test]
fn editor_key_policy_covers_every_key() {
    let mut s = node("s", NodeKind::Start);
    s.config.key = "bad key!".into();
    s.config.attributes.insert("tëam x".into(), "core".into());
    let mut def = chain(vec![s]);
    def.workflow_config.key = "Main Pipeline?".into();

    let errors = wfdsl_compiler::check(&def);
    let found: Vec<&str> = errors.iter().map(|e| e.code.as_str()).collect();
    assert_eq!(found, vec!["V016", "V018", "V017"]);
    assert_eq!(errors[0].node_id.as_deref(), Some("s"));
    assert_eq!(errors[2].node_id, None);
}

#[test]
fn errors_are_collected_not_short_circuited() {
    let mut def = definition(
        vec![node("a", NodeKind::Activity)],
        vec![edge("e1", "a", "a"), edge("e1", "a", "a")],
    );
    def.workflow_config.workflow_type = "".into();
    let found = codes(&def);
    assert!(found.contains(&"V001".to_string()));
    assert!(found.contains(&"V004".to_string()));
    assert!(found.contains(&"V013".to_string()));
}
