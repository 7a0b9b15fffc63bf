//! Parse phase: JSON → canonical definition + graph construction.

pub mod graph;
pub mod kind;
pub mod parameter;
pub mod types;

pub use graph::WorkflowGraph;
pub use kind::{NodeCategory, NodeKind, RegistryEntry, registry};
pub use parameter::*;
pub use types::*;

use crate::error::CompilerError;
use crate::normalize::ViewGraph;

/// Deserialize a canonical definition JSON string.
pub fn parse(json: &str) -> Result<WorkflowDefinition, Vec<CompilerError>> {
    serde_json::from_str::<WorkflowDefinition>(json).map_err(|e| {
        vec![CompilerError::parse(
            "P001",
            format!("Failed to parse workflow definition JSON: {}", e),
        )]
    })
}

/// Deserialize the editor's view-graph JSON.
pub fn parse_view(json: &str) -> Result<ViewGraph, Vec<CompilerError>> {
    serde_json::from_str::<ViewGraph>(json).map_err(|e| {
        vec![CompilerError::parse(
            "P001",
            format!("Failed to parse view graph JSON: {}", e),
        )]
    })
}

/// Deserialize the workflow metadata that accompanies a view graph.
pub fn parse_meta(json: &str) -> Result<WorkflowMeta, Vec<CompilerError>> {
    serde_json::from_str::<WorkflowMeta>(json).map_err(|e| {
        vec![CompilerError::parse(
            "P001",
            format!("Failed to parse workflow metadata JSON: {}", e),
        )]
    })
}
