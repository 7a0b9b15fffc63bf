//! Graph walk: follow edges from the start node and build the statement list.
//!
//! Termination is guaranteed by a visited set keyed by node id: every node is
//! lowered at most once per compilation, whichever path reaches it first.

use std::collections::{HashMap, HashSet};

use crate::error::Diagnostic;
use crate::ir::types::*;
use crate::options::{BranchMode, CompileOptions};
use crate::parse::graph::WorkflowGraph;
use crate::parse::kind::NodeKind;
use crate::parse::types::{BranchLabel, Node, WorkflowDefinition};

use super::activity::lower_activity;

const DEFAULT_CONDITION: &str = "true";
const DEFAULT_DURATION: &str = "10*time.Second";

/// What the walk does after a node has been lowered.
enum Flow<'a> {
    /// Follow the node's outgoing edge.
    Next,
    /// Continue at the given node.
    Jump(&'a str),
    /// This path is finished.
    Stop,
}

pub struct Walker<'a> {
    graph: &'a WorkflowGraph,
    options: &'a CompileOptions,
    node_map: HashMap<&'a str, &'a Node>,
    visited: HashSet<&'a str>,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> Walker<'a> {
    pub fn new(
        definition: &'a WorkflowDefinition,
        graph: &'a WorkflowGraph,
        options: &'a CompileOptions,
    ) -> Self {
        let node_map = definition
            .graph
            .nodes
            .iter()
            .map(|n| (n.id.as_str(), n))
            .collect();

        Walker {
            graph,
            options,
            node_map,
            visited: HashSet::new(),
            diagnostics: Vec::new(),
        }
    }

    /// Walk from `start` and return the body plus the diagnostics collected.
    pub fn run(mut self, start: &'a str) -> (Block, Vec<Diagnostic>) {
        let body = self.walk(Some(start), None);
        (body, self.diagnostics)
    }

    fn walk(&mut self, from: Option<&'a str>, stop_at: Option<&'a str>) -> Block {
        let mut block = Block::default();
        let mut current = from;

        while let Some(id) = current {
            if Some(id) == stop_at {
                break;
            }
            if !self.visited.insert(id) {
                self.diagnostics.push(Diagnostic::new(
                    "W001",
                    format!("Walk reached node '{}' a second time; stopped to avoid a cycle", id),
                    Some(id),
                ));
                break;
            }
            let Some(node) = self.node_map.get(id).copied() else {
                break;
            };

            current = match self.lower_node(node, stop_at, &mut block) {
                Flow::Next => self.follow(node),
                Flow::Jump(next) => Some(next),
                Flow::Stop => None,
            };
        }

        block
    }

    fn lower_node(&mut self, node: &'a Node, stop_at: Option<&'a str>, block: &mut Block) -> Flow<'a> {
        use NodeKind::*;

        match &node.type_key {
            Start => Flow::Next,
            End => {
                push(block, node, Operation::Complete);
                Flow::Stop
            }
            If => self.lower_branch(node, stop_at, block),
            Timer => {
                let duration = non_empty(node.config.duration.as_deref())
                    .unwrap_or(DEFAULT_DURATION)
                    .to_string();
                push(block, node, Operation::Sleep(SleepOp { duration }));
                Flow::Next
            }
            Activity
            | ValidateData
            | ReadQueue
            | FinalizeQueue
            | ExtractMetadata
            | Transform
            | MtChannelHealth
            | MachineHealth
            | MachineStatusCalc
            | FactoryStatusCalc
            | HealthToLineProtocol
            | RealtimeToLineProtocol
            | CacheRealtimeState
            | TdEngine
            | SupabaseValidationErrors
            | MtFeatureStatus
            | SupabaseStatus => {
                push(block, node, Operation::ExecuteActivity(lower_activity(node)));
                Flow::Next
            }
            Parallel | Debug | Signal | ChildWorkflow | DeviceState | DeviceConnect
            | DeviceDisconnect | DeviceInactive | Endpoint | DataTable | Event | GooglePubSub
            | Mqtt | Particle | VirtualButton | Webhook | Other(_) => {
                let message = if node.type_key.is_trigger() {
                    format!(
                        "Trigger '{}' (node '{}') starts workflows from outside; skipped",
                        node.type_key.display_name(),
                        node.id
                    )
                } else {
                    format!(
                        "'{}' nodes are not compiled; node '{}' skipped",
                        node.type_key.display_name(),
                        node.id
                    )
                };
                self.diagnostics.push(Diagnostic::new("W003", message, Some(node.id.as_str())));
                Flow::Next
            }
        }
    }

    fn lower_branch(&mut self, node: &'a Node, stop_at: Option<&'a str>, block: &mut Block) -> Flow<'a> {
        let condition = non_empty(node.config.condition.as_deref())
            .unwrap_or(DEFAULT_CONDITION)
            .to_string();
        let true_target = self.branch_target(node, BranchLabel::True);
        let false_target = self.branch_target(node, BranchLabel::False);

        for edge in self.graph.outgoing_edges(&node.id) {
            if edge.condition.is_none() {
                self.diagnostics.push(Diagnostic::new(
                    "W006",
                    format!(
                        "Edge '{}' leaves conditional node '{}' without a branch label; ignored",
                        edge.id, node.id
                    ),
                    Some(node.id.as_str()),
                ));
            }
        }

        match self.options.branch_mode {
            BranchMode::Stub => {
                push(
                    block,
                    node,
                    Operation::Branch(BranchOp {
                        condition,
                        true_target: true_target.map(str::to_string),
                        false_target: false_target.map(str::to_string),
                        true_branch: Block::default(),
                        false_branch: Block::default(),
                    }),
                );
                match self.graph.next_node(&node.id) {
                    Some(next) => Flow::Jump(next),
                    None => Flow::Stop,
                }
            }
            BranchMode::Inline => {
                let join = self.find_join(true_target, false_target);
                let arm_stop = join.or(stop_at);
                let true_branch = self.walk(true_target, arm_stop);
                let false_branch = self.walk(false_target, arm_stop);
                push(
                    block,
                    node,
                    Operation::Branch(BranchOp {
                        condition,
                        true_target: true_target.map(str::to_string),
                        false_target: false_target.map(str::to_string),
                        true_branch,
                        false_branch,
                    }),
                );
                match join {
                    Some(next) => Flow::Jump(next),
                    None => Flow::Stop,
                }
            }
        }
    }

    fn branch_target(&mut self, node: &'a Node, label: BranchLabel) -> Option<&'a str> {
        let target = self
            .graph
            .branch_edges(&node.id, label)
            .first()
            .map(|e| e.target_node_id.as_str());
        if target.is_none() {
            self.diagnostics.push(Diagnostic::new(
                "W005",
                format!(
                    "Conditional node '{}' has no '{}' branch",
                    node.id,
                    label.as_str()
                ),
                Some(node.id.as_str()),
            ));
        }
        target
    }

    /// The node both arms reach first, measured along the true arm.
    fn find_join(&self, true_target: Option<&'a str>, false_target: Option<&'a str>) -> Option<&'a str> {
        let (Some(t), Some(f)) = (true_target, false_target) else {
            return None;
        };
        let false_path: HashSet<&str> = self.linear_path(f).into_iter().collect();
        self.linear_path(t)
            .into_iter()
            .find(|id| false_path.contains(id))
    }

    /// Nodes on the straight-line path from `from`, stopping after an end or
    /// conditional node, a dead end, or a repeat.
    fn linear_path(&self, from: &'a str) -> Vec<&'a str> {
        let mut path = Vec::new();
        let mut seen = HashSet::new();
        let mut current = Some(from);

        while let Some(id) = current {
            if !seen.insert(id) {
                break;
            }
            path.push(id);
            let Some(node) = self.node_map.get(id) else {
                break;
            };
            if matches!(node.type_key, NodeKind::End | NodeKind::If) {
                break;
            }
            current = self.graph.next_node(id);
        }

        path
    }

    fn follow(&mut self, node: &'a Node) -> Option<&'a str> {
        let outgoing = self.graph.outgoing_edges(&node.id);
        match outgoing.as_slice() {
            [] => {
                self.diagnostics.push(Diagnostic::new(
                    "W002",
                    format!(
                        "Node '{}' has no outgoing edge; the path never reaches an end node",
                        node.id
                    ),
                    Some(node.id.as_str()),
                ));
                None
            }
            [only] => Some(only.target_node_id.as_str()),
            [first, ..] => {
                self.diagnostics.push(Diagnostic::new(
                    "W004",
                    format!(
                        "Node '{}' has {} outgoing edges; only '{}' is followed",
                        node.id,
                        outgoing.len(),
                        first.id
                    ),
                    Some(node.id.as_str()),
                ));
                Some(first.target_node_id.as_str())
            }
        }
    }
}

fn push(block: &mut Block, node: &Node, operation: Operation) {
    block.statements.push(Statement {
        node_id: node.id.clone(),
        label: node.name.clone(),
        operation,
    });
}

fn non_empty(text: Option<&str>) -> Option<&str> {
    text.filter(|s| !s.trim().is_empty())
}
