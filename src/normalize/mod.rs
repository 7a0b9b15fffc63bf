//! Graph normalizer: view graph ⇄ canonical definition.
//!
//! No invariant is checked here. The editor hands over half-built graphs all
//! the time; validation happens when the definition is compiled.

pub mod view;

pub use view::*;

use crate::parse::types::{
    DEFAULT_TYPE_VERSION, Edge, Graph, LabelStyle, Node, NodeLabel, Position,
    WorkflowDefinition, WorkflowMeta,
};

/// View graph + metadata → canonical definition.
pub fn to_canonical(view: &ViewGraph, meta: &WorkflowMeta) -> WorkflowDefinition {
    let nodes = view.nodes.iter().map(node_from_view).collect();
    let edges = view
        .edges
        .iter()
        .map(|e| {
            let condition = e.properties.as_ref().and_then(|p| p.condition);
            Edge {
                id: e.id.clone(),
                source_node_id: e.source_node_id.clone(),
                target_node_id: e.target_node_id.clone(),
                condition,
                empty_properties: e.properties.is_some() && condition.is_none(),
            }
        })
        .collect();

    WorkflowDefinition {
        id: meta.id.clone(),
        name: meta.name.clone(),
        schema_version: meta.schema_version.clone(),
        graph: Graph { nodes, edges },
        workflow_config: meta.workflow_config.clone(),
        globals: meta.globals.clone(),
    }
}

/// Canonical definition → view graph. Inverse of [`to_canonical`].
pub fn to_view(definition: &WorkflowDefinition) -> ViewGraph {
    let nodes = definition
        .graph
        .nodes
        .iter()
        .map(|n| ViewNode {
            id: n.id.clone(),
            kind: n.type_key.clone(),
            x: n.ui.x,
            y: n.ui.y,
            text: view_text(n),
            properties: Some(ViewNodeProperties {
                config: Some(n.config.clone()),
                type_version: Some(n.type_version.clone()),
            }),
        })
        .collect();

    let edges = definition
        .graph
        .edges
        .iter()
        .map(|e| ViewEdge {
            id: e.id.clone(),
            source_node_id: e.source_node_id.clone(),
            target_node_id: e.target_node_id.clone(),
            properties: (e.condition.is_some() || e.empty_properties).then_some(
                ViewEdgeProperties {
                    condition: e.condition,
                },
            ),
        })
        .collect();

    ViewGraph { nodes, edges }
}

fn node_from_view(n: &ViewNode) -> Node {
    let properties = n.properties.as_ref();
    let (text, style) = match &n.text {
        None => ("", LabelStyle::Missing),
        Some(ViewText::Plain(value)) => (value.as_str(), LabelStyle::Plain),
        Some(ViewText::Positioned { value, x, y }) => {
            (value.as_str(), LabelStyle::At { x: *x, y: *y })
        }
    };
    let blank = text.is_empty() && style != LabelStyle::Missing;
    let name = if text.is_empty() { n.kind.type_key() } else { text };
    let label = if !blank && style == (LabelStyle::At { x: n.x, y: n.y }) {
        None
    } else {
        Some(NodeLabel { style, blank })
    };

    Node {
        id: n.id.clone(),
        type_key: n.kind.clone(),
        type_version: properties
            .and_then(|p| p.type_version.clone())
            .unwrap_or_else(|| DEFAULT_TYPE_VERSION.to_string()),
        name: name.to_string(),
        config: properties
            .and_then(|p| p.config.clone())
            .unwrap_or_default(),
        ui: Position { x: n.x, y: n.y },
        label,
    }
}

fn view_text(n: &Node) -> Option<ViewText> {
    let Some(label) = n.label else {
        return Some(ViewText::Positioned {
            value: n.name.clone(),
            x: n.ui.x,
            y: n.ui.y,
        });
    };
    let value = if label.blank { String::new() } else { n.name.clone() };
    match label.style {
        LabelStyle::Missing => None,
        LabelStyle::Plain => Some(ViewText::Plain(value)),
        LabelStyle::At { x, y } => Some(ViewText::Positioned { value, x, y }),
    }
}
