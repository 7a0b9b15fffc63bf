//! Key policy for the keys the editor restricts outside parameter lists:
//! node keys, the workflow key and attribute-map keys. Parameter keys are
//! checked with the rest of the parameter rules.

use std::collections::BTreeMap;

use crate::error::CompilerError;
use crate::naming::sanitize_key;
use crate::parse::types::{Node, WorkflowDefinition};

const KEY_CHARSET: &str = "[A-Za-z0-9_-]";

pub fn validate_node_keys(node: &Node) -> Vec<CompilerError> {
    let mut errors = Vec::new();
    if !is_legal(&node.config.key) {
        errors.push(CompilerError::validate(
            "V016",
            format!(
                "Node key '{}' may only contain {}",
                node.config.key, KEY_CHARSET
            ),
            Some(node.id.clone()),
        ));
    }
    check_attributes(
        &node.config.attributes,
        &format!("node '{}'", node.id),
        Some(&node.id),
        &mut errors,
    );
    errors
}

pub fn validate_workflow_keys(definition: &WorkflowDefinition) -> Vec<CompilerError> {
    let config = &definition.workflow_config;
    let mut errors = Vec::new();
    if !is_legal(&config.key) {
        errors.push(CompilerError::validate(
            "V017",
            format!("Workflow key '{}' may only contain {}", config.key, KEY_CHARSET),
            None,
        ));
    }
    check_attributes(&config.attributes, "the workflow", None, &mut errors);
    errors
}

fn check_attributes(
    attributes: &BTreeMap<String, String>,
    scope: &str,
    node_id: Option<&String>,
    errors: &mut Vec<CompilerError>,
) {
    for key in attributes.keys().filter(|k| !is_legal(k)) {
        errors.push(CompilerError::validate(
            "V018",
            format!(
                "Attribute key '{}' on {} may only contain {}",
                key, scope, KEY_CHARSET
            ),
            node_id.cloned(),
        ));
    }
}

fn is_legal(key: &str) -> bool {
    sanitize_key(key) == key
}
