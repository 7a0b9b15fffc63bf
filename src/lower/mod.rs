//! Lowering phase: WorkflowDefinition → ProgramIR.
//!
//! Synthesizes the per-node records, then walks the graph from the start node
//! into the workflow body. Soft gaps found on the way are reported as
//! diagnostics on the IR instead of failing the compilation.

pub mod activity;
pub mod records;
pub mod walker;

use tracing::debug;

use crate::error::{CompilerError, Diagnostic};
use crate::ir::types::*;
use crate::naming::sanitize_identifier;
use crate::options::CompileOptions;
use crate::parse::graph::WorkflowGraph;
use crate::parse::types::WorkflowDefinition;
use walker::Walker;

const FALLBACK_WORKFLOW_TYPE: &str = "Workflow";

/// Lower a parsed definition + graph into a ProgramIR.
pub fn lower(
    definition: &WorkflowDefinition,
    graph: &WorkflowGraph,
    options: &CompileOptions,
) -> Result<ProgramIR, Vec<CompilerError>> {
    // 1. Find the start node
    let start = definition.start_nodes().next().ok_or_else(|| {
        vec![CompilerError::lower("L001", "No start node found", None)]
    })?;

    let workflow_type = workflow_type_symbol(&definition.workflow_config.workflow_type);
    debug!(
        workflow_type = %workflow_type,
        start = %start.id,
        cyclic = graph.is_cyclic(),
        "lowering workflow"
    );

    // 2. Records
    let records = records::collect_node_records(definition);
    let globals = if options.emit_globals {
        records::globals_record(definition, &workflow_type)
    } else {
        None
    };

    // 3. Walk
    let (body, mut diagnostics) = Walker::new(definition, graph, options).run(&start.id);

    // 4. Nodes the start node cannot reach at all
    let reachable = graph.reachable_from(&start.id);
    for node in &definition.graph.nodes {
        if !reachable.contains(node.id.as_str()) {
            diagnostics.push(Diagnostic::new(
                "W007",
                format!("Node '{}' is not reachable from the start node", node.id),
                Some(node.id.as_str()),
            ));
        }
    }

    debug!(
        records = records.len(),
        statements = body.statements.len(),
        diagnostics = diagnostics.len(),
        "lowering finished"
    );

    Ok(ProgramIR {
        metadata: ProgramMetadata {
            workflow_id: definition.id.clone(),
            workflow_name: definition.name.clone(),
            schema_version: definition.schema_version.clone(),
            workflow_type,
            task_queue: definition.workflow_config.task_queue.clone(),
        },
        records,
        globals,
        body,
        diagnostics,
    })
}

fn workflow_type_symbol(raw: &str) -> String {
    let symbol = sanitize_identifier(raw);
    if symbol.is_empty() {
        FALLBACK_WORKFLOW_TYPE.to_string()
    } else {
        symbol
    }
}
