//! Literal values and type names → Go expression text.

use crate::ir::types::{FieldType, LiteralValue};

pub fn go_type(field_type: FieldType) -> &'static str {
    match field_type {
        FieldType::Float64 => "float64",
        FieldType::Bool => "bool",
        FieldType::Map => "map[string]interface{}",
        FieldType::String => "string",
    }
}

pub fn zero_value(field_type: FieldType) -> &'static str {
    match field_type {
        FieldType::Float64 => "0",
        FieldType::Bool => "false",
        FieldType::Map => "nil",
        FieldType::String => "\"\"",
    }
}

pub fn emit_literal(value: &LiteralValue) -> String {
    match value {
        LiteralValue::String(s) => quote(s),
        LiteralValue::Raw(text) => text.clone(),
        LiteralValue::Zero(t) => zero_value(*t).to_string(),
    }
}

/// Interpreted Go string literal.
pub fn quote(s: &str) -> String {
    format!("\"{}\"", escape_string(s))
}

/// Text that is safe inside a `//` comment: one line.
pub fn comment_text(s: &str) -> String {
    s.replace(['\r', '\n'], " ")
}

fn escape_string(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
        .replace('\r', "\\r")
        .replace('\t', "\\t")
}
