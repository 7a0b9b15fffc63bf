//! Parameter rules: keys must be present, legal and unique per scope and
//! direction. Env locators must already be in environment-variable form.

use std::collections::HashSet;

use crate::error::CompilerError;
use crate::naming::{sanitize_env_var_name, sanitize_key};
use crate::parse::parameter::{Direction, Parameter, ParameterSource};
use crate::parse::types::{Node, WorkflowDefinition};

/// Validate the parameters of one node. Returns all errors found.
pub fn validate_node_parameters(node: &Node) -> Vec<CompilerError> {
    let mut errors = Vec::new();
    check_scope(
        &node.config.parameters,
        &format!("node '{}'", node.id),
        Some(&node.id),
        &mut errors,
    );
    errors
}

/// Validate the workflow-level globals.
pub fn validate_globals(definition: &WorkflowDefinition) -> Vec<CompilerError> {
    let mut errors = Vec::new();
    check_scope(&definition.globals, "workflow globals", None, &mut errors);
    errors
}

fn check_scope(
    parameters: &[Parameter],
    scope: &str,
    node_id: Option<&String>,
    errors: &mut Vec<CompilerError>,
) {
    let mut seen: HashSet<(&str, Direction)> = HashSet::new();

    for p in parameters {
        if p.key.trim().is_empty() {
            errors.push(CompilerError::validate(
                "V012",
                format!("Parameter '{}' in {} has an empty key", p.id, scope),
                node_id.cloned(),
            ));
            continue;
        }
        if sanitize_key(&p.key) != p.key {
            errors.push(CompilerError::validate(
                "V014",
                format!(
                    "Parameter key '{}' in {} may only contain [A-Za-z0-9_-]",
                    p.key, scope
                ),
                node_id.cloned(),
            ));
        }
        if let ParameterSource::Env { var_name } = &p.source {
            if sanitize_env_var_name(var_name) != *var_name || var_name.is_empty() {
                errors.push(CompilerError::validate(
                    "V015",
                    format!(
                        "Parameter '{}' in {} has invalid environment variable name '{}'",
                        p.key, scope, var_name
                    ),
                    node_id.cloned(),
                ));
            }
        }
        if !seen.insert((p.key.as_str(), p.direction)) {
            errors.push(CompilerError::validate(
                "V011",
                format!(
                    "Duplicate {:?} parameter key '{}' in {}",
                    p.direction, p.key, scope
                ),
                node_id.cloned(),
            ));
        }
    }
}
