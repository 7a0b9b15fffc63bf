//! Codegen pass: ProgramIR → Go source for the Temporal Go SDK.
//!
//! Public API: `codegen(ir, options) -> String`

mod handler;
mod literal;
mod records;
mod writer;

use crate::ir::types::ProgramIR;
use crate::options::CompileOptions;
use writer::CodeWriter;

/// Generate the complete Go source file from a validated ProgramIR.
pub fn codegen(ir: &ProgramIR, options: &CompileOptions) -> String {
    let mut w = CodeWriter::new();

    // 1. PACKAGE + IMPORTS
    w.line(&format!("package {}", options.go_package()));
    w.blank();
    w.line("import (");
    w.indent();
    w.line("\"time\"");
    w.blank();
    w.line("\"go.temporal.io/sdk/workflow\"");
    w.dedent();
    w.line(")");
    w.blank();

    // 2. TYPES
    records::emit_types(ir, &mut w);

    // 3. WORKFLOW FUNCTION
    handler::emit_workflow_fn(ir, options, &mut w);

    w.finish()
}
