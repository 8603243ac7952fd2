use serde_json::{json, to_string_pretty, Value};

use super::layout::{LayoutKind, MAX_ZOOM, MIN_ZOOM};
use crate::inventory::{InventoryGraph, Result};

/// Flatten the graph into the element list a browser graph renderer consumes:
/// every node as `{ data: {...} }` followed by every edge.
///
/// `vars` travels as pretty-printed JSON text and `warning` as the strings
/// "true"/"false" so the renderer's attribute selectors can match on them.
pub fn to_elements(graph: &InventoryGraph) -> Result<Vec<Value>> {
    let mut elements = Vec::with_capacity(graph.node_count() + graph.edge_count());
    for node in graph.nodes() {
        elements.push(json!({
            "data": {
                "id": node.id,
                "label": node.label,
                "type": node.kind,
                "vars": to_string_pretty(&node.vars)?,
                "warning": if node.warning { "true" } else { "false" },
            }
        }));
    }
    for edge in graph.edges() {
        elements.push(json!({
            "data": { "source": edge.source, "target": edge.target }
        }));
    }
    Ok(elements)
}

/// Elements plus the layout and zoom bounds to render them with.
pub fn to_view(graph: &InventoryGraph, layout: LayoutKind) -> Result<Value> {
    Ok(json!({
        "elements": to_elements(graph)?,
        "layout": layout.options(),
        "minZoom": MIN_ZOOM,
        "maxZoom": MAX_ZOOM,
    }))
}
