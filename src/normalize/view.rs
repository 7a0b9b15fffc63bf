//! The editor's view-graph shape.
//!
//! Only the normalizer reads or writes these types; the compiler itself works
//! on the canonical definition.

use serde::{Deserialize, Serialize};

use crate::parse::kind::NodeKind;
use crate::parse::types::{BranchLabel, NodeConfig};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ViewGraph {
    #[serde(default)]
    pub nodes: Vec<ViewNode>,
    #[serde(default)]
    pub edges: Vec<ViewEdge>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewNode {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    pub x: f64,
    pub y: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<ViewText>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<ViewNodeProperties>,
}

/// Node label: either bare text or text with its own coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ViewText {
    Plain(String),
    Positioned { value: String, x: f64, y: f64 },
}

impl ViewText {
    pub fn value(&self) -> &str {
        match self {
            ViewText::Plain(value) | ViewText::Positioned { value, .. } => value,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewNodeProperties {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<NodeConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_version: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewEdge {
    pub id: String,
    pub source_node_id: String,
    pub target_node_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<ViewEdgeProperties>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ViewEdgeProperties {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<BranchLabel>,
}
