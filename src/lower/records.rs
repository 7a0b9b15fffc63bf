//! Struct synthesis: parameter lists → typed request/response records.

use crate::ir::types::{NodeRecords, RecordDefinition, RecordField};
use crate::naming::{field_name, map_value_type, symbol_name};
use crate::parse::parameter::{Direction, Parameter};
use crate::parse::types::{Node, WorkflowDefinition};

/// One field per parameter, in list order. An empty list yields an empty,
/// still nameable record.
pub fn synthesize_record<'a>(
    name: impl Into<String>,
    parameters: impl IntoIterator<Item = &'a Parameter>,
) -> RecordDefinition {
    let fields = parameters
        .into_iter()
        .map(|p| RecordField {
            name: field_name(&p.key),
            field_type: map_value_type(p.value_type),
            wire_name: p.key.clone(),
        })
        .collect();

    RecordDefinition {
        name: name.into(),
        fields,
    }
}

/// `<NodePascalId>Input` / `<NodePascalId>Output` for one execution node.
pub fn node_records(node: &Node) -> NodeRecords {
    let stem = symbol_name(&node.id);
    NodeRecords {
        node_id: node.id.clone(),
        node_name: node.name.clone(),
        input: synthesize_record(
            format!("{}Input", stem),
            node.config.parameters_in(Direction::Input),
        ),
        output: synthesize_record(
            format!("{}Output", stem),
            node.config.parameters_in(Direction::Output),
        ),
    }
}

/// Records for every execution node, in definition order, reachable or not.
pub fn collect_node_records(definition: &WorkflowDefinition) -> Vec<NodeRecords> {
    definition
        .graph
        .nodes
        .iter()
        .filter(|n| n.type_key.is_activity())
        .map(node_records)
        .collect()
}

/// The `<WorkflowType>Globals` record, if the definition declares globals.
pub fn globals_record(definition: &WorkflowDefinition, workflow_type: &str) -> Option<RecordDefinition> {
    if definition.globals.is_empty() {
        return None;
    }
    Some(synthesize_record(
        format!("{}Globals", workflow_type),
        &definition.globals,
    ))
}
