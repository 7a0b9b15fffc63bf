//! Rust types for the canonical workflow definition (`wf-dsl`).
//!
//! These types are the serde target for the definition document exchanged with
//! the editor. Field names on the wire are camelCase; unknown fields are ignored
//! so that documents written by a newer editor still load.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::kind::NodeKind;
use super::parameter::{Direction, Parameter};

pub const SCHEMA_VERSION: &str = "wf-dsl/1";
pub const DEFAULT_TYPE_VERSION: &str = "1.0.0";

// =============================================================================
// TOP-LEVEL DEFINITION
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowDefinition {
    pub id: String,
    pub name: String,
    pub schema_version: String,
    pub graph: Graph,
    pub workflow_config: WorkflowConfig,
    #[serde(default)]
    pub globals: Vec<Parameter>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Graph {
    #[serde(default)]
    pub nodes: Vec<Node>,
    #[serde(default)]
    pub edges: Vec<Edge>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowConfig {
    pub id: String,
    pub key: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
    pub workflow_type: String,
    pub task_queue: String,
    #[serde(default)]
    pub input_schema: Value,
    #[serde(default)]
    pub output_schema: Value,
}

/// The parts of a definition the view layer does not own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowMeta {
    pub id: String,
    pub name: String,
    pub schema_version: String,
    pub workflow_config: WorkflowConfig,
    #[serde(default)]
    pub globals: Vec<Parameter>,
}

// =============================================================================
// NODES & EDGES
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    pub id: String,
    pub type_key: NodeKind,
    #[serde(default = "default_type_version")]
    pub type_version: String,
    pub name: String,
    #[serde(default)]
    pub config: NodeConfig,
    #[serde(default)]
    pub ui: Position,
    /// How the editor draws the label. `None` is the usual layout: the label
    /// text sits at the node's own position.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<NodeLabel>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// Label layout carried for the view graph only; codegen never reads it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NodeLabel {
    #[serde(flatten)]
    pub style: LabelStyle,
    /// The view's label text was empty, so `name` holds the type-key fallback.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub blank: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "style", rename_all = "lowercase")]
pub enum LabelStyle {
    /// No label at all.
    Missing,
    /// Bare text without coordinates.
    Plain,
    /// Text drawn at its own coordinates.
    At { x: f64, y: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BranchLabel {
    True,
    False,
}

impl BranchLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            BranchLabel::True => "true",
            BranchLabel::False => "false",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Edge {
    pub id: String,
    pub source_node_id: String,
    pub target_node_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<BranchLabel>,
    /// The view edge carried a `properties` object without a condition.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub empty_properties: bool,
}

// =============================================================================
// NODE CONFIG
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetryPolicy {
    #[serde(rename = "MaxAttempts")]
    pub max_attempts: u32,
    #[serde(rename = "InitialInterval")]
    pub initial_interval: String,
    #[serde(rename = "BackoffCoefficient")]
    pub backoff_coefficient: f64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        RetryPolicy {
            max_attempts: 3,
            initial_interval: "5s".into(),
            backoff_coefficient: 2.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NodeConfig {
    pub key: String,
    pub description: String,
    pub group: String,
    pub tags: Vec<String>,
    pub priority: i64,
    pub is_optional: bool,
    pub timeout_seconds: u64,
    pub retry_policy: RetryPolicy,
    pub attributes: BTreeMap<String, String>,
    pub parameters: Vec<Parameter>,
    pub inputs: BTreeMap<String, ValueBinding>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<serde_json::Map<String, Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub activity_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signal_name: Option<String>,
}

impl Default for NodeConfig {
    fn default() -> Self {
        NodeConfig {
            key: String::new(),
            description: String::new(),
            group: String::new(),
            tags: Vec::new(),
            priority: 0,
            is_optional: false,
            timeout_seconds: 60,
            retry_policy: RetryPolicy::default(),
            attributes: BTreeMap::new(),
            parameters: Vec::new(),
            inputs: BTreeMap::new(),
            options: None,
            activity_name: None,
            condition: None,
            duration: None,
            signal_name: None,
        }
    }
}

impl NodeConfig {
    pub fn parameters_in(&self, direction: Direction) -> impl Iterator<Item = &Parameter> {
        self.parameters.iter().filter(move |p| p.direction == direction)
    }
}

/// An input binding: either a literal or a reference into another scope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ValueBinding {
    Literal {
        #[serde(default)]
        value: Value,
    },
    Ref {
        #[serde(rename = "ref")]
        reference: ValueRef,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValueRef {
    pub scope: RefScope,
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node_id: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RefScope {
    #[serde(rename = "wf.input")]
    WorkflowInput,
    #[serde(rename = "node.output")]
    NodeOutput,
    #[serde(rename = "const")]
    Const,
    #[serde(rename = "globals")]
    Globals,
}

fn default_type_version() -> String {
    DEFAULT_TYPE_VERSION.to_string()
}

// =============================================================================
// ACCESSORS
// =============================================================================

impl WorkflowDefinition {
    /// The starter definition a fresh editing session opens with.
    pub fn from_template(id: impl Into<String>) -> Self {
        let id = id.into();
        WorkflowDefinition {
            id: id.clone(),
            name: "Main Pipeline".into(),
            schema_version: SCHEMA_VERSION.into(),
            graph: Graph {
                nodes: vec![Node {
                    id: "start-1".into(),
                    type_key: NodeKind::Start,
                    type_version: DEFAULT_TYPE_VERSION.into(),
                    name: "Workflow Start".into(),
                    config: NodeConfig {
                        key: "start_node".into(),
                        description: "Initialization".into(),
                        group: "Core".into(),
                        ..NodeConfig::default()
                    },
                    ui: Position { x: 250.0, y: 100.0 },
                    label: None,
                }],
                edges: vec![],
            },
            workflow_config: WorkflowConfig {
                id,
                key: "Main_Pipeline".into(),
                description: "A standard temporal processing pipeline.".into(),
                tags: vec!["production".into(), "core".into()],
                attributes: BTreeMap::from([
                    ("team".to_string(), "platform".to_string()),
                    ("priority".to_string(), "high".to_string()),
                ]),
                workflow_type: "TemporalProcessor".into(),
                task_queue: "MAIN_WORKERS".into(),
                input_schema: Value::Object(Default::default()),
                output_schema: Value::Object(Default::default()),
            },
            globals: vec![],
        }
    }

    pub fn meta(&self) -> WorkflowMeta {
        WorkflowMeta {
            id: self.id.clone(),
            name: self.name.clone(),
            schema_version: self.schema_version.clone(),
            workflow_config: self.workflow_config.clone(),
            globals: self.globals.clone(),
        }
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.graph.nodes.iter().find(|n| n.id == id)
    }

    pub fn start_nodes(&self) -> impl Iterator<Item = &Node> {
        self.graph
            .nodes
            .iter()
            .filter(|n| n.type_key == NodeKind::Start)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn bare_config_gets_defaults() {
        let cfg: NodeConfig = serde_json::from_value(json!({ "inputs": {} })).unwrap();
        assert!(cfg.parameters.is_empty());
        assert_eq!(cfg.retry_policy.max_attempts, 3);
        assert_eq!(cfg.retry_policy.initial_interval, "5s");
        assert_eq!(cfg.activity_name, None);
    }

    #[test]
    fn retry_policy_uses_pascal_case_keys() {
        let v = serde_json::to_value(RetryPolicy::default()).unwrap();
        assert_eq!(v["MaxAttempts"], 3);
        assert_eq!(v["InitialInterval"], "5s");
        assert_eq!(v["BackoffCoefficient"], 2.0);
    }

    #[test]
    fn value_binding_wire_shape() {
        let b: ValueBinding = serde_json::from_value(json!({
            "kind": "ref",
            "ref": { "scope": "node.output", "path": "total", "nodeId": "act-1" }
        }))
        .unwrap();
        assert_eq!(
            b,
            ValueBinding::Ref {
                reference: ValueRef {
                    scope: RefScope::NodeOutput,
                    path: "total".into(),
                    node_id: Some("act-1".into()),
                }
            }
        );
    }

    #[test]
    fn template_has_single_start() {
        let def = WorkflowDefinition::from_template("wf-test");
        assert_eq!(def.start_nodes().count(), 1);
        assert_eq!(def.schema_version, SCHEMA_VERSION);
        assert_eq!(def.workflow_config.id, "wf-test");
        assert_eq!(def.workflow_config.task_queue, "MAIN_WORKERS");
    }

    #[test]
    fn edge_condition_is_lowercase() {
        let e: Edge = serde_json::from_value(json!({
            "id": "e1", "sourceNodeId": "a", "targetNodeId": "b", "condition": "false"
        }))
        .unwrap();
        assert_eq!(e.condition, Some(BranchLabel::False));
    }
}
