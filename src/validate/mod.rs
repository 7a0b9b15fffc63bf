//! Definition-level validation phase (pre-IR).
//!
//! The normalizer tolerates transiently invalid graphs while the user edits;
//! everything the walker relies on is enforced here, at compile time.

pub mod keys;
pub mod params;
pub mod structural;

use crate::error::CompilerError;
use crate::parse::graph::WorkflowGraph;
use crate::parse::types::{Node, WorkflowDefinition};

/// Validate the entire definition (structural + parameters).
pub fn validate_definition(
    definition: &WorkflowDefinition,
    graph: &WorkflowGraph,
) -> Vec<CompilerError> {
    let mut errors = structural::validate_structural(definition, graph);

    for node in &definition.graph.nodes {
        errors.extend(validate_node(node));
    }
    errors.extend(params::validate_globals(definition));
    errors.extend(keys::validate_workflow_keys(definition));

    errors
}

/// Validate a single node's configuration.
pub fn validate_node(node: &Node) -> Vec<CompilerError> {
    let mut errors = keys::validate_node_keys(node);
    errors.extend(params::validate_node_parameters(node));
    errors
}
