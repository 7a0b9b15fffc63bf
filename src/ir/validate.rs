//! IR invariant validation.
//!
//! Sanitizing ids and keys can make two distinct inputs collapse onto the same
//! Go symbol. These checks catch that before codegen writes a program that
//! would not compile.

use std::collections::HashSet;
use std::fmt;

use crate::ir::types::*;

#[derive(Debug, Clone)]
pub struct ValidationError {
    pub code: &'static str,
    pub message: String,
    /// The node the offending symbol was derived from, if any.
    pub node_id: Option<String>,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.node_id {
            Some(id) => write!(f, "[{}] {} (at node '{}')", self.code, self.message, id),
            None => write!(f, "[{}] {}", self.code, self.message),
        }
    }
}

/// Validate a ProgramIR against all invariants. Returns all errors found.
pub fn validate_ir(ir: &ProgramIR) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    validate_unique_record_names(ir, &mut errors);
    validate_record_fields(ir, &mut errors);
    validate_unique_var_suffixes(ir, &mut errors);

    errors
}

// ---------------------------------------------------------------------------
// Invariant: record type names are unique
// ---------------------------------------------------------------------------

fn validate_unique_record_names(ir: &ProgramIR, errors: &mut Vec<ValidationError>) {
    let workflow_input = format!("{}Input", ir.metadata.workflow_type);
    let workflow_output = format!("{}Output", ir.metadata.workflow_type);

    let mut seen: HashSet<&str> = HashSet::new();
    seen.insert(&workflow_input);
    seen.insert(&workflow_output);

    for group in &ir.records {
        for record in [&group.input, &group.output] {
            if !seen.insert(&record.name) {
                errors.push(ValidationError {
                    code: "E001",
                    message: format!("Generated record name '{}' is not unique", record.name),
                    node_id: Some(group.node_id.clone()),
                });
            }
        }
    }

    if let Some(globals) = &ir.globals {
        if !seen.insert(&globals.name) {
            errors.push(ValidationError {
                code: "E001",
                message: format!("Generated record name '{}' is not unique", globals.name),
                node_id: None,
            });
        }
    }
}

// ---------------------------------------------------------------------------
// Invariant: field names are non-empty and unique within a record
// ---------------------------------------------------------------------------

fn validate_record_fields(ir: &ProgramIR, errors: &mut Vec<ValidationError>) {
    for group in &ir.records {
        check_fields(&group.input, Some(&group.node_id), errors);
        check_fields(&group.output, Some(&group.node_id), errors);
    }
    if let Some(globals) = &ir.globals {
        check_fields(globals, None, errors);
    }
}

fn check_fields(
    record: &RecordDefinition,
    node_id: Option<&String>,
    errors: &mut Vec<ValidationError>,
) {
    let mut seen = HashSet::new();
    for field in &record.fields {
        if field.name.is_empty() {
            errors.push(ValidationError {
                code: "E003",
                message: format!(
                    "Key '{}' in record '{}' has no identifier characters",
                    field.wire_name, record.name
                ),
                node_id: node_id.cloned(),
            });
            continue;
        }
        if !seen.insert(field.name.as_str()) {
            errors.push(ValidationError {
                code: "E002",
                message: format!(
                    "Field '{}' (key '{}') appears twice in record '{}'",
                    field.name, field.wire_name, record.name
                ),
                node_id: node_id.cloned(),
            });
        }
    }
}

// ---------------------------------------------------------------------------
// Invariant: activity locals do not shadow each other
// ---------------------------------------------------------------------------

fn validate_unique_var_suffixes(ir: &ProgramIR, errors: &mut Vec<ValidationError>) {
    let mut seen = HashSet::new();
    for call in ir.body.activity_calls() {
        if !seen.insert(call.var_suffix.as_str()) {
            errors.push(ValidationError {
                code: "E004",
                message: format!(
                    "Two activity nodes generate the same variable suffix '{}'",
                    call.var_suffix
                ),
                node_id: None,
            });
        }
    }
}
