/*!
Flat node/edge representation of one inventory build, built on top of petgraph.

Inventory ids are strings (group and host names, `owner::key` for var leaves),
but petgraph operates in terms of the `NodeIndex` values returned by
`add_node`, so we keep a side map from id to index the same way the symbol
graphs keyed by symbol name do.  The graph is append-only while the builder
fills it and read-only afterwards:

- node indices are handed out in insertion order, so iterating
  `node_indices()` yields the traversal (pre-order, root first) order.
- `raw_edges()` likewise preserves edge insertion order, which is what the
  "first parent" rule of the selection resolver is defined against.
- an edge aimed at a name that was already present attaches to the retained
  node, which is how name collisions across branches turn the tree into a
  graph with several incoming edges on one node.
*/

use std::collections::HashMap;
use std::fmt;

use petgraph::{
    graph::{EdgeReference, NodeIndex},
    visit::EdgeRef,
    Directed, Direction, Graph,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Group,
    Host,
    Var,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeKind::Group => write!(f, "group"),
            NodeKind::Host => write!(f, "host"),
            NodeKind::Var => write!(f, "var"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphNode {
    pub id: String,
    pub label: String,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    /// Variables in document order.  Empty for var leaves and for entities
    /// that declared none.
    pub vars: Map<String, Value>,
    /// Derived once from `vars.warning` at construction.
    pub warning: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphEdge {
    pub source: String,
    pub target: String,
}

/// What to do when the traversal produces an id that is already present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DuplicateIdPolicy {
    /// First definition wins; later ones are dropped silently but still
    /// receive their incoming edge.
    KeepFirst,
    /// Fail the build with `GraphError::DuplicateId`.
    Reject,
}

impl Default for DuplicateIdPolicy {
    fn default() -> Self {
        DuplicateIdPolicy::KeepFirst
    }
}

/// Outcome of `InventoryGraph::insert_node`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Insertion {
    Added(NodeIndex),
    /// The id was already present; the index is that of the retained node.
    Existing(NodeIndex),
}

impl Insertion {
    pub fn index(&self) -> NodeIndex {
        match self {
            Insertion::Added(ix) | Insertion::Existing(ix) => *ix,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct InventoryGraph {
    graph: Graph<GraphNode, (), Directed>,
    id_to_ix: HashMap<String, NodeIndex>,
}

impl InventoryGraph {
    pub fn new() -> Self {
        InventoryGraph {
            graph: Graph::new(),
            id_to_ix: HashMap::new(),
        }
    }

    /// Add the node unless its id is already present, in which case the
    /// existing node is left untouched.  Policy decisions about what a
    /// collision means belong to the caller.
    pub fn insert_node(&mut self, node: GraphNode) -> Insertion {
        if let Some(ix) = self.id_to_ix.get(&node.id) {
            return Insertion::Existing(*ix);
        }
        let id = node.id.clone();
        let ix = self.graph.add_node(node);
        self.id_to_ix.insert(id, ix);
        Insertion::Added(ix)
    }

    /// Append an edge between two ids that must already be present.  Returns
    /// false (and adds nothing) otherwise.
    pub fn add_edge(&mut self, source: &str, target: &str) -> bool {
        match (self.id_to_ix.get(source), self.id_to_ix.get(target)) {
            (Some(source_ix), Some(target_ix)) => {
                self.graph.add_edge(*source_ix, *target_ix, ());
                true
            }
            _ => false,
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.id_to_ix.contains_key(id)
    }

    pub fn node(&self, id: &str) -> Option<&GraphNode> {
        self.id_to_ix.get(id).map(|ix| &self.graph[*ix])
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &GraphNode> + '_ {
        self.graph.node_indices().map(move |ix| &self.graph[ix])
    }

    /// Edges in insertion order, duplicates included.
    pub fn edges(&self) -> impl Iterator<Item = GraphEdge> + '_ {
        self.graph.raw_edges().iter().map(move |edge| GraphEdge {
            source: self.graph[edge.source()].id.clone(),
            target: self.graph[edge.target()].id.clone(),
        })
    }

    /// Nodes reachable over a single outgoing edge, each reported once, in
    /// the order their first edge was appended.
    pub fn successors(&self, id: &str) -> Vec<&GraphNode> {
        let ix = match self.id_to_ix.get(id) {
            Some(ix) => *ix,
            None => return vec![],
        };
        let mut outgoing: Vec<EdgeReference<()>> = self
            .graph
            .edges_directed(ix, Direction::Outgoing)
            .collect();
        // petgraph walks the adjacency list newest-first.
        outgoing.sort_by_key(|edge| edge.id());

        let mut seen = Vec::new();
        for edge in outgoing {
            if !seen.contains(&edge.target()) {
                seen.push(edge.target());
            }
        }
        seen.into_iter().map(|ix| &self.graph[ix]).collect()
    }

    /// Sources of every edge into `id`, in edge insertion order.
    pub fn predecessors(&self, id: &str) -> Vec<&GraphNode> {
        let ix = match self.id_to_ix.get(id) {
            Some(ix) => *ix,
            None => return vec![],
        };
        let mut incoming: Vec<EdgeReference<()>> = self
            .graph
            .edges_directed(ix, Direction::Incoming)
            .collect();
        incoming.sort_by_key(|edge| edge.id());
        incoming
            .into_iter()
            .map(|edge| &self.graph[edge.source()])
            .collect()
    }

    /// Convert to the `{ nodes, edges }` rep handed to renderers, both in
    /// insertion order.
    pub fn to_json(&self) -> Value {
        json!({
            "nodes": self.nodes().collect::<Vec<_>>(),
            "edges": self.edges().collect::<Vec<_>>(),
        })
    }
}
