use dot_structures::{
    Attribute, Edge, EdgeTy, Graph, GraphAttributes, Id, Node, NodeId, Stmt, Vertex,
};
use graphviz_rust::printer::{DotPrinter, PrinterContext};

use crate::inventory::{GraphNode, InventoryGraph, NodeKind};

/// Quote an arbitrary string as a DOT id.  Inventory ids routinely contain
/// `:`, `.` and `-`, which plain ids can't.
fn quoted(s: &str) -> Id {
    Id::Escaped(format!("\"{}\"", s.replace('\\', "\\\\").replace('"', "\\\"")))
}

fn attr(key: &str, value: &str) -> Attribute {
    Attribute(Id::Plain(key.to_string()), quoted(value))
}

fn node_attributes(node: &GraphNode) -> Vec<Attribute> {
    let mut attributes = vec![attr("label", &node.label)];
    let (shape, fill, border) = match node.kind {
        NodeKind::Group => ("box", "#4C7BD9", "#2F4EA2"),
        NodeKind::Host => ("box", "#4CD98F", "#2FA26A"),
        NodeKind::Var => ("diamond", "#D9B84C", "#A2852F"),
    };
    let (fill, border) = if node.warning {
        ("#FF8C42", "#D96704")
    } else {
        (fill, border)
    };
    attributes.push(attr("shape", shape));
    if node.kind != NodeKind::Var {
        attributes.push(attr("style", "rounded,filled"));
    } else {
        attributes.push(attr("style", "filled"));
    }
    attributes.push(attr("fillcolor", fill));
    attributes.push(attr("color", border));
    attributes
}

/// Build the graphviz model of the inventory graph: one statement per node in
/// insertion order, then one per edge (duplicates included).
pub fn to_dot_graph(graph: &InventoryGraph) -> Graph {
    let mut stmts = vec![
        Stmt::GAttribute(GraphAttributes::Graph(vec![attr("rankdir", "LR")])),
        Stmt::GAttribute(GraphAttributes::Node(vec![attr("fontsize", "10")])),
        Stmt::GAttribute(GraphAttributes::Edge(vec![attr("color", "#B7C1D6")])),
    ];
    for node in graph.nodes() {
        stmts.push(Stmt::Node(Node {
            id: NodeId(quoted(&node.id), None),
            attributes: node_attributes(node),
        }));
    }
    for edge in graph.edges() {
        stmts.push(Stmt::Edge(Edge {
            ty: EdgeTy::Pair(
                Vertex::N(NodeId(quoted(&edge.source), None)),
                Vertex::N(NodeId(quoted(&edge.target), None)),
            ),
            attributes: vec![],
        }));
    }

    Graph::DiGraph {
        id: Id::Plain("inventory".to_string()),
        strict: false,
        stmts,
    }
}

pub fn to_dot(graph: &InventoryGraph) -> String {
    to_dot_graph(graph).print(&mut PrinterContext::default())
}
