//! Unified compiler error type used across all phases, plus the non-fatal
//! diagnostics the walker reports when it truncates or skips.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

use crate::ir::validate::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Phase {
    Parse,
    Validate,
    Lower,
    IrValidate,
    Codegen,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Parse => write!(f, "Parse"),
            Phase::Validate => write!(f, "Validate"),
            Phase::Lower => write!(f, "Lower"),
            Phase::IrValidate => write!(f, "IR Validate"),
            Phase::Codegen => write!(f, "Codegen"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("[{phase}:{code}] {message}{}", node_suffix(.node_id))]
pub struct CompilerError {
    pub code: String,
    pub phase: Phase,
    pub message: String,
    pub node_id: Option<String>,
}

fn node_suffix(node_id: &Option<String>) -> String {
    match node_id {
        Some(id) => format!(" (node '{}')", id),
        None => String::new(),
    }
}

impl From<ValidationError> for CompilerError {
    fn from(e: ValidationError) -> Self {
        CompilerError {
            code: e.code.to_string(),
            phase: Phase::IrValidate,
            message: e.message,
            node_id: e.node_id,
        }
    }
}

impl CompilerError {
    pub fn parse(code: &str, message: impl Into<String>) -> Self {
        CompilerError {
            code: code.into(),
            phase: Phase::Parse,
            message: message.into(),
            node_id: None,
        }
    }

    pub fn validate(code: &str, message: impl Into<String>, node_id: Option<String>) -> Self {
        CompilerError {
            code: code.into(),
            phase: Phase::Validate,
            message: message.into(),
            node_id,
        }
    }

    pub fn lower(code: &str, message: impl Into<String>, node_id: Option<String>) -> Self {
        CompilerError {
            code: code.into(),
            phase: Phase::Lower,
            message: message.into(),
            node_id,
        }
    }
}

/// A soft condition: the program was still produced, but it has a gap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostic {
    pub code: &'static str,
    pub message: String,
    pub node_id: Option<String>,
}

impl Diagnostic {
    pub fn new(code: &'static str, message: impl Into<String>, node_id: Option<&str>) -> Self {
        Diagnostic {
            code,
            message: message.into(),
            node_id: node_id.map(str::to_string),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}{}", self.code, self.message, node_suffix(&self.node_id))
    }
}
