#![allow(dead_code)]

use serde_json::Value;
use wfdsl_compiler::parse::*;

// =============================================================================
// Definition builders
// =============================================================================

pub fn node(id: &str, kind: NodeKind) -> Node {
    Node {
        id: id.into(),
        type_key: kind,
        type_version: DEFAULT_TYPE_VERSION.into(),
        name: id.into(),
        config: NodeConfig::default(),
        ui: Position::default(),
        label: None,
    }
}

/// A `temporal.activity` node with the given activity name.
pub fn activity(id: &str, activity_name: &str) -> Node {
    let mut n = node(id, NodeKind::Activity);
    n.config.activity_name = Some(activity_name.into());
    n
}

pub fn conditional(id: &str, condition: &str) -> Node {
    let mut n = node(id, NodeKind::If);
    n.config.condition = Some(condition.into());
    n
}

pub fn input(key: &str, value_type: ValueType, value: Value) -> Parameter {
    Parameter::literal(format!("p-{}", key), key, value_type, value, Direction::Input)
}

pub fn output(key: &str, value_type: ValueType) -> Parameter {
    Parameter::literal(
        format!("p-{}", key),
        key,
        value_type,
        Value::String(String::new()),
        Direction::Output,
    )
}

pub fn edge(id: &str, source: &str, target: &str) -> Edge {
    Edge {
        id: id.into(),
        source_node_id: source.into(),
        target_node_id: target.into(),
        condition: None,
        empty_properties: false,
    }
}

pub fn branch(id: &str, source: &str, target: &str, label: BranchLabel) -> Edge {
    Edge {
        condition: Some(label),
        ..edge(id, source, target)
    }
}

/// Template definition (workflow type `TemporalProcessor`) with the given graph.
pub fn definition(nodes: Vec<Node>, edges: Vec<Edge>) -> WorkflowDefinition {
    let mut def = WorkflowDefinition::from_template("test-wf");
    def.graph = Graph { nodes, edges };
    def
}

/// `start -> n1 -> n2 -> ...`, edges named `e1`, `e2`, ...
pub fn chain(nodes: Vec<Node>) -> WorkflowDefinition {
    let edges = nodes
        .windows(2)
        .enumerate()
        .map(|(i, pair)| edge(&format!("e{}", i + 1), &pair[0].id, &pair[1].id))
        .collect();
    definition(nodes, edges)
}
