//! Integration tests for the parse phase.

mod helpers;

use wfdsl_compiler::parse::{self, *};

#[test]
fn parse_linear_fixture() {
    let json = include_str!("fixtures/linear_workflow.json");
    let def = parse::parse(json).expect("Should parse");

    assert_eq!(def.id, "wf-orders");
    assert_eq!(def.schema_version, SCHEMA_VERSION);
    assert_eq!(def.workflow_config.workflow_type, "OrderWorkflow");
    assert_eq!(def.workflow_config.task_queue, "ORDERS");
    assert_eq!(def.graph.nodes.len(), 4);
    assert_eq!(def.graph.edges.len(), 3);

    let charge = def.node("charge").expect("charge node");
    assert_eq!(charge.type_key, NodeKind::Activity);
    assert_eq!(charge.config.activity_name.as_deref(), Some("ChargePayment"));
    assert_eq!(charge.config.timeout_seconds, 30);
    assert_eq!(charge.config.retry_policy.max_attempts, 5);
    assert_eq!(charge.config.parameters_in(Direction::Input).count(), 2);
    assert_eq!(charge.config.parameters_in(Direction::Output).count(), 1);
    assert!(matches!(
        charge.config.inputs.get("amount"),
        Some(ValueBinding::Ref { reference }) if reference.scope == RefScope::WorkflowInput
    ));
}

#[test]
fn globals_keep_their_source() {
    let def = parse::parse(include_str!("fixtures/linear_workflow.json")).unwrap();
    assert_eq!(def.globals.len(), 1);
    assert_eq!(
        def.globals[0].source,
        ParameterSource::Env {
            var_name: "ORDER_REGION".into()
        }
    );
}

#[test]
fn missing_optional_fields_default() {
    let def = parse::parse(include_str!("fixtures/branching_workflow.json")).unwrap();
    let start = def.node("start").unwrap();
    assert_eq!(start.type_version, DEFAULT_TYPE_VERSION);
    assert_eq!(start.config.timeout_seconds, 60);
    assert!(def.globals.is_empty());
    assert_eq!(
        def.graph.edges[1].condition,
        Some(BranchLabel::True)
    );
}

#[test]
fn unknown_node_kind_round_trips() {
    let mut def = helpers::chain(vec![
        helpers::node("s", NodeKind::Start),
        helpers::node("x", NodeKind::Other("vendor.magic".into())),
    ]);
    def.id = "rt".into();
    let json = serde_json::to_string(&def).unwrap();
    assert!(json.contains("\"typeKey\":\"vendor.magic\""));
    assert_eq!(parse::parse(&json).unwrap(), def);
}

#[test]
fn malformed_json_is_p001() {
    let errors = parse::parse("{ not json").unwrap_err();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].code, "P001");
}

#[test]
fn graph_build_reports_dangling_and_duplicate_together() {
    let def = helpers::definition(
        vec![
            helpers::node("s", NodeKind::Start),
            helpers::node("a", NodeKind::Activity),
            helpers::node("a", NodeKind::Activity),
        ],
        vec![helpers::edge("e1", "s", "ghost")],
    );
    let errors = WorkflowGraph::build(&def).unwrap_err();
    let codes: Vec<&str> = errors.iter().map(|e| e.code.as_str()).collect();
    assert!(codes.contains(&"V003"), "{:?}", codes);
    assert!(codes.contains(&"V002"), "{:?}", codes);
}
