//! petgraph-based directed graph wrapper for the canonical definition.
//!
//! Edge weights are the index of the edge in `graph.edges`, so adjacency queries
//! can hand back edges in definition order regardless of petgraph's internal
//! neighbour ordering.

use std::collections::{HashMap, HashSet};

use petgraph::Direction;
use petgraph::algo::is_cyclic_directed;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::{Bfs, EdgeRef};

use super::types::{BranchLabel, Edge, WorkflowDefinition};
use crate::error::CompilerError;

#[derive(Debug)]
pub struct WorkflowGraph {
    pub graph: DiGraph<String, usize>,
    pub node_indices: HashMap<String, NodeIndex>,
    edges: Vec<Edge>,
}

impl WorkflowGraph {
    /// Build the graph. Dangling edge endpoints and duplicate node ids are
    /// structural errors; all of them are reported together.
    pub fn build(definition: &WorkflowDefinition) -> Result<Self, Vec<CompilerError>> {
        let mut graph = DiGraph::new();
        let mut node_indices = HashMap::new();
        let mut errors = Vec::new();

        for node in &definition.graph.nodes {
            if node_indices.contains_key(&node.id) {
                errors.push(CompilerError::validate(
                    "V003",
                    format!("Duplicate node id '{}'", node.id),
                    Some(node.id.clone()),
                ));
                continue;
            }
            let idx = graph.add_node(node.id.clone());
            node_indices.insert(node.id.clone(), idx);
        }

        for (position, edge) in definition.graph.edges.iter().enumerate() {
            let source_idx = node_indices.get(&edge.source_node_id);
            let target_idx = node_indices.get(&edge.target_node_id);

            match (source_idx, target_idx) {
                (Some(&s), Some(&t)) => {
                    graph.add_edge(s, t, position);
                }
                (None, _) => {
                    errors.push(CompilerError::validate(
                        "V002",
                        format!(
                            "Edge '{}' references unknown source node '{}'",
                            edge.id, edge.source_node_id
                        ),
                        None,
                    ));
                }
                (_, None) => {
                    errors.push(CompilerError::validate(
                        "V002",
                        format!(
                            "Edge '{}' references unknown target node '{}'",
                            edge.id, edge.target_node_id
                        ),
                        None,
                    ));
                }
            }
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(WorkflowGraph {
            graph,
            node_indices,
            edges: definition.graph.edges.clone(),
        })
    }

    /// Outgoing edges of a node, in definition order.
    pub fn outgoing_edges(&self, node_id: &str) -> Vec<&Edge> {
        self.edges_directed(node_id, Direction::Outgoing)
    }

    /// Incoming edges of a node, in definition order.
    pub fn incoming_edges(&self, node_id: &str) -> Vec<&Edge> {
        self.edges_directed(node_id, Direction::Incoming)
    }

    /// Outgoing edges of a node carrying the given branch label.
    pub fn branch_edges(&self, node_id: &str, label: BranchLabel) -> Vec<&Edge> {
        self.outgoing_edges(node_id)
            .into_iter()
            .filter(|e| e.condition == Some(label))
            .collect()
    }

    /// The node reached by following the first outgoing edge.
    pub fn next_node(&self, node_id: &str) -> Option<&str> {
        self.outgoing_edges(node_id)
            .first()
            .map(|e| e.target_node_id.as_str())
    }

    pub fn incoming_count(&self, node_id: &str) -> usize {
        self.incoming_edges(node_id).len()
    }

    /// Every node id reachable from `from`, including `from` itself.
    pub fn reachable_from(&self, from: &str) -> HashSet<&str> {
        let mut reachable = HashSet::new();
        let Some(&start) = self.node_indices.get(from) else {
            return reachable;
        };
        let mut bfs = Bfs::new(&self.graph, start);
        while let Some(nx) = bfs.next(&self.graph) {
            reachable.insert(self.graph[nx].as_str());
        }
        reachable
    }

    pub fn is_cyclic(&self) -> bool {
        is_cyclic_directed(&self.graph)
    }

    fn edges_directed(&self, node_id: &str, dir: Direction) -> Vec<&Edge> {
        let Some(&idx) = self.node_indices.get(node_id) else {
            return vec![];
        };
        let mut positions: Vec<usize> = self
            .graph
            .edges_directed(idx, dir)
            .map(|e| *e.weight())
            .collect();
        positions.sort_unstable();
        positions.into_iter().map(|p| &self.edges[p]).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::kind::NodeKind;
    use crate::parse::types::{Node, NodeConfig, Position};

    fn node(id: &str, kind: NodeKind) -> Node {
        Node {
            id: id.into(),
            type_key: kind,
            type_version: "1.0.0".into(),
            name: id.into(),
            config: NodeConfig::default(),
            ui: Position::default(),
            label: None,
        }
    }

    fn edge(id: &str, from: &str, to: &str, condition: Option<BranchLabel>) -> Edge {
        Edge {
            id: id.into(),
            source_node_id: from.into(),
            target_node_id: to.into(),
            condition,
            empty_properties: false,
        }
    }

    fn definition(nodes: Vec<Node>, edges: Vec<Edge>) -> WorkflowDefinition {
        let mut def = WorkflowDefinition::from_template("wf-graph");
        def.graph.nodes = nodes;
        def.graph.edges = edges;
        def
    }

    #[test]
    fn outgoing_edges_keep_definition_order() {
        let def = definition(
            vec![
                node("s", NodeKind::Start),
                node("a", NodeKind::Activity),
                node("b", NodeKind::Activity),
                node("c", NodeKind::Activity),
            ],
            vec![
                edge("e1", "s", "b", None),
                edge("e2", "s", "a", None),
                edge("e3", "s", "c", None),
            ],
        );
        let g = WorkflowGraph::build(&def).unwrap();
        let targets: Vec<&str> = g
            .outgoing_edges("s")
            .iter()
            .map(|e| e.target_node_id.as_str())
            .collect();
        assert_eq!(targets, vec!["b", "a", "c"]);
        assert_eq!(g.next_node("s"), Some("b"));
    }

    #[test]
    fn dangling_edge_and_duplicate_id_reported_together() {
        let def = definition(
            vec![node("s", NodeKind::Start), node("s", NodeKind::End)],
            vec![edge("e1", "s", "ghost", None)],
        );
        let errors = WorkflowGraph::build(&def).err().unwrap();
        let codes: Vec<&str> = errors.iter().map(|e| e.code.as_str()).collect();
        assert!(codes.contains(&"V002"));
        assert!(codes.contains(&"V003"));
    }

    #[test]
    fn branch_edges_filter_by_label() {
        let def = definition(
            vec![
                node("if", NodeKind::If),
                node("a", NodeKind::Activity),
                node("b", NodeKind::Activity),
            ],
            vec![
                edge("e1", "if", "a", Some(BranchLabel::True)),
                edge("e2", "if", "b", Some(BranchLabel::False)),
            ],
        );
        let g = WorkflowGraph::build(&def).unwrap();
        assert_eq!(g.branch_edges("if", BranchLabel::True)[0].target_node_id, "a");
        assert_eq!(g.branch_edges("if", BranchLabel::False)[0].target_node_id, "b");
        assert!(!g.is_cyclic());
        assert_eq!(g.reachable_from("if").len(), 3);
    }
}
