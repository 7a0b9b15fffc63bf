//! Graph-level structural validation rules.
//!
//! Dangling edge endpoints (V002) and duplicate node ids (V003) are caught
//! while building the `WorkflowGraph`; the rules here run on a built graph.

use std::collections::HashSet;

use crate::error::CompilerError;
use crate::naming::{is_go_keyword, sanitize_identifier};
use crate::parse::graph::WorkflowGraph;
use crate::parse::types::{BranchLabel, WorkflowDefinition};

/// Run all structural validation rules. Returns all errors found.
pub fn validate_structural(
    definition: &WorkflowDefinition,
    graph: &WorkflowGraph,
) -> Vec<CompilerError> {
    let mut errors = Vec::new();

    v001_exactly_one_start(definition, &mut errors);
    v004_unique_edge_ids(definition, &mut errors);
    v006_start_no_incoming(definition, graph, &mut errors);
    v008_one_edge_per_branch_label(definition, graph, &mut errors);
    v013_workflow_type_is_identifier(definition, &mut errors);

    errors
}

fn v001_exactly_one_start(definition: &WorkflowDefinition, errors: &mut Vec<CompilerError>) {
    let start_count = definition.start_nodes().count();
    if start_count == 0 {
        errors.push(CompilerError::validate(
            "V001",
            "Workflow must have exactly 1 start node, found 0",
            None,
        ));
    } else if start_count > 1 {
        errors.push(CompilerError::validate(
            "V001",
            format!(
                "Workflow must have exactly 1 start node, found {}",
                start_count
            ),
            None,
        ));
    }
}

fn v004_unique_edge_ids(definition: &WorkflowDefinition, errors: &mut Vec<CompilerError>) {
    let mut seen = HashSet::new();
    for edge in &definition.graph.edges {
        if !seen.insert(edge.id.as_str()) {
            errors.push(CompilerError::validate(
                "V004",
                format!("Duplicate edge id '{}'", edge.id),
                None,
            ));
        }
    }
}

fn v006_start_no_incoming(
    definition: &WorkflowDefinition,
    graph: &WorkflowGraph,
    errors: &mut Vec<CompilerError>,
) {
    for node in definition.start_nodes() {
        if graph.incoming_count(&node.id) > 0 {
            errors.push(CompilerError::validate(
                "V006",
                format!("Start node '{}' must not have incoming edges", node.id),
                Some(node.id.clone()),
            ));
        }
    }
}

fn v008_one_edge_per_branch_label(
    definition: &WorkflowDefinition,
    graph: &WorkflowGraph,
    errors: &mut Vec<CompilerError>,
) {
    for node in &definition.graph.nodes {
        if !node.type_key.is_conditional() {
            continue;
        }
        for label in [BranchLabel::True, BranchLabel::False] {
            let count = graph.branch_edges(&node.id, label).len();
            if count > 1 {
                errors.push(CompilerError::validate(
                    "V008",
                    format!(
                        "Conditional node '{}' has {} outgoing '{}' edges, at most 1 allowed",
                        node.id,
                        count,
                        label.as_str()
                    ),
                    Some(node.id.clone()),
                ));
            }
        }
    }
}

fn v013_workflow_type_is_identifier(
    definition: &WorkflowDefinition,
    errors: &mut Vec<CompilerError>,
) {
    let raw = &definition.workflow_config.workflow_type;
    let sanitized = sanitize_identifier(raw);
    let usable = sanitized
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && !is_go_keyword(&sanitized);
    if !usable {
        errors.push(CompilerError::validate(
            "V013",
            format!("Workflow type '{}' cannot be used as a function name", raw),
            None,
        ));
    }
}
