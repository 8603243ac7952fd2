use serde::Serialize;
use tracing::trace;

use super::selection::{Selection, SelectionInfo};
use crate::inventory::InventoryGraph;

/// Padding, in rendered pixels, around a node the view is fitted to.
pub const FIT_PADDING: u32 = 100;
/// How long the renderer should spend animating towards the node.
pub const FIT_DURATION_MS: u32 = 500;

/// Request for the renderer to bring a single node into view.  The actual
/// centering and animation are the renderer's business.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NavigationRequest {
    pub node_id: String,
    pub padding: u32,
    pub duration_ms: u32,
}

impl NavigationRequest {
    pub fn fit_to(node_id: &str) -> Self {
        NavigationRequest {
            node_id: node_id.to_string(),
            padding: FIT_PADDING,
            duration_ms: FIT_DURATION_MS,
        }
    }
}

/// First node, in insertion order, whose label is exactly `label`.
pub fn find_by_label<'g>(graph: &'g InventoryGraph, label: &str) -> Option<&'g str> {
    graph
        .nodes()
        .find(|node| node.label == label)
        .map(|node| node.id.as_str())
}

impl Selection {
    /// Jump to the node labelled `label`: replace the selection with it and
    /// ask the renderer to fit the view around it.  Without a match nothing
    /// changes, including the current selection.
    pub fn navigate_to_label(
        &mut self,
        graph: &InventoryGraph,
        label: &str,
    ) -> Option<(NavigationRequest, SelectionInfo)> {
        let id = match find_by_label(graph, label) {
            Some(id) => id,
            None => {
                trace!(label, "no node with label");
                return None;
            }
        };
        self.clear();
        let info = self.select(graph, id);
        Some((NavigationRequest::fit_to(id), info))
    }
}
