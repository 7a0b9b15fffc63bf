//! Emit the type declarations: per-node records, workflow I/O and globals.

use super::literal::{comment_text, go_type};
use super::writer::CodeWriter;
use crate::ir::types::*;

/// Emit every type declaration of the program, each followed by a blank line.
pub fn emit_types(ir: &ProgramIR, w: &mut CodeWriter) {
    for node in &ir.records {
        w.line(&format!("// {} Types", comment_text(&node.node_name)));
        emit_record(&node.input, w);
        w.blank();
        emit_record(&node.output, w);
        w.blank();
    }

    let workflow_type = &ir.metadata.workflow_type;
    w.line("// Workflow Types");
    w.line(&format!("type {}Input struct{{}}", workflow_type));
    w.blank();
    w.line(&format!("type {}Output struct{{}}", workflow_type));
    w.blank();

    if let Some(globals) = &ir.globals {
        w.line("// Workflow Globals");
        emit_record(globals, w);
        w.blank();
    }
}

pub fn emit_record(record: &RecordDefinition, w: &mut CodeWriter) {
    if record.fields.is_empty() {
        w.line(&format!("type {} struct{{}}", record.name));
        return;
    }

    w.block_open(&format!("type {} struct", record.name));
    for field in &record.fields {
        w.line(&format!(
            "{} {} `json:\"{}\"`",
            field.name,
            go_type(field.field_type),
            field.wire_name
        ));
    }
    w.block_close();
}
