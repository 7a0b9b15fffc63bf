//! IR type definitions for the workflow compiler.
//!
//! The IR bridges the canonical node-edge graph (input) and the generated Go
//! workflow source (output). The walk from the start node is lowered into a
//! sequential statement list with structured branching that maps directly to
//! the body of one Temporal workflow function.

use serde::{Deserialize, Serialize};

use crate::error::Diagnostic;

// =============================================================================
// TOP-LEVEL IR
// =============================================================================

/// Complete intermediate representation of a compiled workflow.
/// Produced by the lowering pass, consumed by the codegen pass.
#[derive(Debug, Clone, Serialize)]
pub struct ProgramIR {
    pub metadata: ProgramMetadata,
    /// Input/output records, one pair per execution node, in definition order.
    pub records: Vec<NodeRecords>,
    /// Record built from the workflow globals, if there are any.
    pub globals: Option<RecordDefinition>,
    /// The workflow function body.
    pub body: Block,
    /// Soft conditions found while walking the graph.
    pub diagnostics: Vec<Diagnostic>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgramMetadata {
    pub workflow_id: String,
    pub workflow_name: String,
    pub schema_version: String,
    /// Sanitized workflow type: the Go function name and type-name stem.
    pub workflow_type: String,
    pub task_queue: String,
}

// =============================================================================
// RECORDS
// =============================================================================

/// The request/response records synthesized for one execution node.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeRecords {
    pub node_id: String,
    pub node_name: String,
    pub input: RecordDefinition,
    pub output: RecordDefinition,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordDefinition {
    pub name: String,
    /// Field order equals parameter order.
    pub fields: Vec<RecordField>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordField {
    /// In-language field name.
    pub name: String,
    pub field_type: FieldType,
    /// Serialization tag: the original parameter key.
    pub wire_name: String,
}

/// Target-language field types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldType {
    Float64,
    Bool,
    /// Generic string-keyed map.
    Map,
    String,
}

// =============================================================================
// BLOCK & STATEMENTS
// =============================================================================

/// Ordered sequence of statements. Appears as the function body and as the
/// arms of a branch.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Block {
    pub statements: Vec<Statement>,
}

/// A single statement, tied back to the node it was lowered from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Statement {
    pub node_id: String,
    /// Node display name, used for comments in generated code.
    pub label: String,
    pub operation: Operation,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Operation {
    ExecuteActivity(ActivityCall),
    Branch(BranchOp),
    Sleep(SleepOp),
    Complete,
}

/// `workflow.ExecuteActivity(ctx, name, input).Get(ctx, &res)`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityCall {
    /// Node type key, echoed in the statement comment.
    pub type_key: String,
    pub activity_name: String,
    /// Suffix of the generated local variables.
    pub var_suffix: String,
    pub input_type: String,
    pub output_type: String,
    pub inputs: Vec<FieldInit>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldInit {
    pub field: String,
    pub value: LiteralValue,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "literal_type", content = "value")]
pub enum LiteralValue {
    /// Emitted as a quoted string literal.
    String(String),
    /// Emitted verbatim.
    Raw(String),
    /// The zero value of the field type.
    Zero(FieldType),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BranchOp {
    /// Condition expression text, emitted verbatim.
    pub condition: String,
    pub true_target: Option<String>,
    pub false_target: Option<String>,
    pub true_branch: Block,
    pub false_branch: Block,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SleepOp {
    /// Duration expression text, emitted verbatim.
    pub duration: String,
}

// =============================================================================
// QUERIES
// =============================================================================

impl Block {
    /// True if control never falls off the end of this block.
    pub fn is_terminating(&self) -> bool {
        match self.statements.last().map(|s| &s.operation) {
            Some(Operation::Complete) => true,
            Some(Operation::Branch(b)) => {
                b.true_branch.is_terminating() && b.false_branch.is_terminating()
            }
            _ => false,
        }
    }

    /// Activity calls in this block and all nested branches, in emission order.
    pub fn activity_calls(&self) -> Vec<&ActivityCall> {
        let mut calls = Vec::new();
        for statement in &self.statements {
            match &statement.operation {
                Operation::ExecuteActivity(call) => calls.push(call),
                Operation::Branch(b) => {
                    calls.extend(b.true_branch.activity_calls());
                    calls.extend(b.false_branch.activity_calls());
                }
                Operation::Sleep(_) | Operation::Complete => {}
            }
        }
        calls
    }
}
