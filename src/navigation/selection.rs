use std::collections::BTreeSet;

use itertools::Itertools;
use serde::Serialize;
use tracing::trace;

use crate::inventory::{GraphNode, InventoryGraph};

/// Everything the detail panel needs to know about one selected node.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectionInfo {
    pub selected_id: String,
    /// None when the id isn't in the graph.
    pub node: Option<GraphNode>,
    pub child_ids: BTreeSet<String>,
    /// Ascending, case-sensitive.  The listing order in the UI depends on it.
    pub child_labels: Vec<String>,
    /// Label of the source of the first edge into the node.  Later incoming
    /// edges (name collisions across branches) are not reported.
    pub parent_label: Option<String>,
}

impl SelectionInfo {
    pub fn child_count(&self) -> usize {
        self.child_ids.len()
    }
}

/// Work out children and parent of `selected_id`.  Pure; an unknown id yields
/// no node, no children and no parent.
pub fn resolve(graph: &InventoryGraph, selected_id: &str) -> SelectionInfo {
    let children = graph.successors(selected_id);
    let child_ids = children.iter().map(|node| node.id.clone()).collect();
    let child_labels = children
        .iter()
        .map(|node| node.label.clone())
        .sorted()
        .collect();
    let parent_label = graph
        .predecessors(selected_id)
        .first()
        .map(|node| node.label.clone());

    SelectionInfo {
        selected_id: selected_id.to_string(),
        node: graph.node(selected_id).cloned(),
        child_ids,
        child_labels,
        parent_label,
    }
}

/// The single active selection.  Owned by whoever presents the graph; every
/// transition replaces the previous selection outright.
#[derive(Debug, Clone, Default)]
pub struct Selection {
    current: Option<String>,
}

impl Selection {
    pub fn new() -> Self {
        Selection { current: None }
    }

    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// Select `id`, implicitly dropping any previous selection.
    pub fn select(&mut self, graph: &InventoryGraph, id: &str) -> SelectionInfo {
        trace!(id, previous = ?self.current, "select");
        self.current = Some(id.to_string());
        resolve(graph, id)
    }

    pub fn clear(&mut self) {
        trace!(previous = ?self.current, "clear selection");
        self.current = None;
    }

    /// Re-resolve whatever is currently selected.
    pub fn info(&self, graph: &InventoryGraph) -> Option<SelectionInfo> {
        self.current.as_deref().map(|id| resolve(graph, id))
    }
}
