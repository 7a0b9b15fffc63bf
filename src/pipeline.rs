//! Full pipeline: parse → validate → lower → IR validate → codegen.

use serde::Serialize;
use tracing::{debug, warn};

use crate::codegen::codegen;
use crate::error::{CompilerError, Diagnostic};
use crate::ir::validate_ir;
use crate::lower::lower;
use crate::options::CompileOptions;
use crate::parse::graph::WorkflowGraph;
use crate::parse::types::WorkflowDefinition;
use crate::validate::validate_definition;

/// Generated source plus everything the walker had to truncate or skip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompileOutput {
    pub source: String,
    pub diagnostics: Vec<Diagnostic>,
}

impl CompileOutput {
    /// True when the program was compiled without any gap.
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

/// Compile with default options.
pub fn compile(definition: &WorkflowDefinition) -> Result<CompileOutput, Vec<CompilerError>> {
    compile_with_options(definition, &CompileOptions::default())
}

pub fn compile_with_options(
    definition: &WorkflowDefinition,
    options: &CompileOptions,
) -> Result<CompileOutput, Vec<CompilerError>> {
    debug!(workflow = %definition.id, nodes = definition.graph.nodes.len(), "compiling");

    let mut errors = options.validate();
    let graph = match WorkflowGraph::build(definition) {
        Ok(graph) => graph,
        Err(build_errors) => {
            errors.extend(build_errors);
            return Err(errors);
        }
    };

    errors.extend(validate_definition(definition, &graph));
    if !errors.is_empty() {
        debug!(count = errors.len(), "validation failed");
        return Err(errors);
    }

    let ir = lower(definition, &graph, options)?;

    let ir_errors = validate_ir(&ir);
    if !ir_errors.is_empty() {
        debug!(count = ir_errors.len(), "IR validation failed");
        return Err(ir_errors.into_iter().map(CompilerError::from).collect());
    }

    for diagnostic in &ir.diagnostics {
        warn!(code = diagnostic.code, node = ?diagnostic.node_id, "{}", diagnostic.message);
    }

    let source = codegen(&ir, options);
    debug!(bytes = source.len(), "codegen finished");

    Ok(CompileOutput {
        source,
        diagnostics: ir.diagnostics,
    })
}

/// Parse a canonical definition from JSON, then compile it.
pub fn compile_json(
    json: &str,
    options: &CompileOptions,
) -> Result<CompileOutput, Vec<CompilerError>> {
    let definition = crate::parse::parse(json)?;
    compile_with_options(&definition, options)
}

/// Parse + build + validate, without lowering. Returns every error found.
pub fn check(definition: &WorkflowDefinition) -> Vec<CompilerError> {
    match WorkflowGraph::build(definition) {
        Ok(graph) => validate_definition(definition, &graph),
        Err(errors) => errors,
    }
}
