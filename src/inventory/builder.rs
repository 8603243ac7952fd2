use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, trace, trace_span, warn};

use super::{
    error::{ErrorDetails, ErrorLayer, GraphError, Result},
    graph::{DuplicateIdPolicy, GraphNode, Insertion, InventoryGraph, NodeKind},
    truthiness::{scalar_text, warning_flag},
};

/// The root entry every inventory is expected to be nested under.
pub const DEFAULT_ROOT_NAME: &str = "all";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BuildOptions {
    /// Expand every `vars` entry into its own var-leaf node.
    #[serde(default)]
    pub show_vars: bool,
    #[serde(default)]
    pub duplicate_policy: DuplicateIdPolicy,
}

impl BuildOptions {
    pub fn with_vars(show_vars: bool) -> Self {
        BuildOptions {
            show_vars,
            ..Default::default()
        }
    }
}

/// One pending inventory object on the traversal worklist.
struct PendingEntity<'a> {
    object: &'a Value,
    parent_id: Option<String>,
    name: String,
}

/// The state threaded through a single build.  Nothing here outlives the
/// build, so toggling options never sees stale ids from a previous graph.
struct BuildState<'o> {
    graph: InventoryGraph,
    options: &'o BuildOptions,
}

/// Look up `key` on an inventory object, treating explicit nulls (`children:`
/// with nothing after it) the same as an absent key.
fn defined<'a>(object: &'a Value, key: &str) -> Option<&'a Value> {
    match object.get(key) {
        None | Some(Value::Null) => None,
        Some(value) => Some(value),
    }
}

/// Entries of a mapping-valued section, or nothing if the section is some
/// other shape.
fn entries<'a>(section: &'a Value, owner: &str, key: &str) -> Option<&'a Map<String, Value>> {
    match section.as_object() {
        Some(map) => Some(map),
        None => {
            warn!(owner, key, "ignoring non-mapping inventory section");
            None
        }
    }
}

impl<'o> BuildState<'o> {
    fn new(options: &'o BuildOptions) -> Self {
        BuildState {
            graph: InventoryGraph::new(),
            options,
        }
    }

    /// Insert a node subject to the duplicate policy.  Returns true if the
    /// node was newly added.
    fn emit_node(&mut self, node: GraphNode) -> Result<bool> {
        let id = node.id.clone();
        match self.graph.insert_node(node) {
            Insertion::Added(_) => Ok(true),
            Insertion::Existing(_) => match self.options.duplicate_policy {
                DuplicateIdPolicy::KeepFirst => {
                    debug!(id = id.as_str(), "duplicate id, keeping first definition");
                    Ok(false)
                }
                DuplicateIdPolicy::Reject => Err(GraphError::DuplicateId(ErrorDetails {
                    layer: ErrorLayer::DataLayer,
                    message: format!("Inventory defines \"{}\" more than once", id),
                })),
            },
        }
    }

    fn emit_edge(&mut self, source: &str, target: &str) {
        // Both ends are always emitted before their edge.
        if !self.graph.add_edge(source, target) {
            warn!(source, target, "dropping edge with an unknown endpoint");
        }
    }

    /// Emit one var leaf per variable, owned by `owner_id`.
    fn emit_var_leaves(&mut self, owner_id: &str, vars: &Map<String, Value>) -> Result<()> {
        for (key, value) in vars {
            let var_id = format!("{}::{}", owner_id, key);
            self.emit_node(GraphNode {
                id: var_id.clone(),
                label: format!("{}: {}", key, scalar_text(value)),
                kind: NodeKind::Var,
                vars: Map::new(),
                warning: false,
            })?;
            self.emit_edge(owner_id, &var_id);
        }
        Ok(())
    }

    /// Process a single inventory object: its own node, the edge from its
    /// parent, its var leaves and hosts.  Returns the children to visit next,
    /// in document order.
    fn visit<'a>(&mut self, pending: PendingEntity<'a>) -> Result<Vec<PendingEntity<'a>>> {
        let PendingEntity {
            object,
            parent_id,
            name,
        } = pending;
        let id = name;

        let vars_section = defined(object, "vars");
        let hosts_section = defined(object, "hosts");
        let children_section = defined(object, "children");

        let is_group =
            vars_section.is_some() || hosts_section.is_some() || children_section.is_some();
        let vars = vars_section.and_then(|section| entries(section, &id, "vars"));

        trace!(id = id.as_str(), is_group, "visit");
        self.emit_node(GraphNode {
            id: id.clone(),
            label: id.clone(),
            kind: if is_group { NodeKind::Group } else { NodeKind::Var },
            vars: vars.cloned().unwrap_or_default(),
            warning: warning_flag(vars),
        })?;
        // The edge is appended even when the node itself was a duplicate.
        if let Some(parent_id) = &parent_id {
            self.emit_edge(parent_id, &id);
        }

        if self.options.show_vars {
            if let Some(vars) = vars {
                self.emit_var_leaves(&id, vars)?;
            }
        }

        if let Some(hosts) = hosts_section.and_then(|section| entries(section, &id, "hosts")) {
            for (hostname, host_vars) in hosts {
                let host_vars = host_vars.as_object();
                self.emit_node(GraphNode {
                    id: hostname.clone(),
                    label: hostname.clone(),
                    kind: NodeKind::Host,
                    vars: host_vars.cloned().unwrap_or_default(),
                    warning: warning_flag(host_vars),
                })?;
                self.emit_edge(&id, hostname);

                if self.options.show_vars {
                    if let Some(host_vars) = host_vars {
                        self.emit_var_leaves(hostname, host_vars)?;
                    }
                }
            }
        }

        let mut children = vec![];
        if let Some(section) = children_section {
            if let Some(child_map) = entries(section, &id, "children") {
                for (child_name, child_object) in child_map {
                    children.push(PendingEntity {
                        object: child_object,
                        parent_id: Some(id.clone()),
                        name: child_name.clone(),
                    });
                }
            }
        }
        Ok(children)
    }
}

/// Convert an already-extracted inventory root into a graph.
///
/// The walk is a pre-order depth-first traversal driven by an explicit stack:
/// every node is emitted before any edge that uses it as a source, and a
/// subtree is finished before its next sibling starts.
pub fn build(root: &Value, root_name: &str, options: &BuildOptions) -> Result<InventoryGraph> {
    let span = trace_span!("build", root_name, show_vars = options.show_vars);
    let _span_guard = span.enter();

    let mut state = BuildState::new(options);
    let mut stack = vec![PendingEntity {
        object: root,
        parent_id: None,
        name: root_name.to_string(),
    }];

    while let Some(pending) = stack.pop() {
        let children = state.visit(pending)?;
        // Reversed so the first child in document order is popped first.
        stack.extend(children.into_iter().rev());
    }

    debug!(
        nodes = state.graph.node_count(),
        edges = state.graph.edge_count(),
        "built inventory graph"
    );
    Ok(state.graph)
}

/// Pull the root entry out of a parsed document.  A document that isn't a
/// mapping, lacks the key, or maps it to null has no usable root.
pub fn extract_root<'a>(document: &'a Value, root_name: &str) -> Result<&'a Value> {
    match document.get(root_name) {
        None | Some(Value::Null) => Err(GraphError::schema(format!(
            "Inventory must have an \"{}\" root key",
            root_name
        ))),
        Some(root) => Ok(root),
    }
}

/// Extract the root from a parsed document and build its graph.
pub fn build_document(
    document: &Value,
    root_name: &str,
    options: &BuildOptions,
) -> Result<InventoryGraph> {
    let root = extract_root(document, root_name)?;
    build(root, root_name, options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn ids(graph: &InventoryGraph) -> Vec<String> {
        graph.nodes().map(|n| n.id.clone()).collect()
    }

    fn edge_pairs(graph: &InventoryGraph) -> Vec<(String, String)> {
        graph.edges().map(|e| (e.source, e.target)).collect()
    }

    fn prod_doc() -> Value {
        json!({
            "all": {
                "children": {
                    "prod": {
                        "hosts": {
                            "db1": { "warning": "true" },
                            "db2": {}
                        }
                    }
                }
            }
        })
    }

    #[test]
    fn test_prod_scenario_without_vars() {
        let graph = build_document(&prod_doc(), "all", &BuildOptions::default()).unwrap();

        assert_eq!(ids(&graph), vec!["all", "prod", "db1", "db2"]);
        assert_eq!(
            edge_pairs(&graph),
            vec![
                ("all".to_string(), "prod".to_string()),
                ("prod".to_string(), "db1".to_string()),
                ("prod".to_string(), "db2".to_string()),
            ]
        );
        assert!(graph.node("db1").unwrap().warning);
        assert!(!graph.node("db2").unwrap().warning);
        assert_eq!(graph.node("db1").unwrap().kind, NodeKind::Host);
        assert_eq!(graph.node("prod").unwrap().kind, NodeKind::Group);
    }

    #[test]
    fn test_prod_scenario_with_vars() {
        let graph = build_document(&prod_doc(), "all", &BuildOptions::with_vars(true)).unwrap();

        assert_eq!(ids(&graph), vec!["all", "prod", "db1", "db1::warning", "db2"]);
        let leaf = graph.node("db1::warning").unwrap();
        assert_eq!(leaf.label, "warning: true");
        assert_eq!(leaf.kind, NodeKind::Var);
        assert!(edge_pairs(&graph).contains(&("db1".to_string(), "db1::warning".to_string())));
    }

    #[test]
    fn test_group_vars_come_before_hosts_and_children() {
        let doc = json!({
            "all": {
                "children": {
                    "web": {
                        "vars": { "http_port": 80, "warning": false },
                        "hosts": { "web1": null },
                        "children": { "edge": { "hosts": { "cdn1": {} } } }
                    }
                }
            }
        });
        let graph = build_document(&doc, "all", &BuildOptions::with_vars(true)).unwrap();

        assert_eq!(
            ids(&graph),
            vec![
                "all",
                "web",
                "web::http_port",
                "web::warning",
                "web1",
                "edge",
                "cdn1"
            ]
        );
        assert_eq!(graph.node("web::http_port").unwrap().label, "http_port: 80");
        assert_eq!(graph.node("web::warning").unwrap().label, "warning: false");
        // A host declared with no vars at all has nothing to expand.
        assert!(graph.node("web1").unwrap().vars.is_empty());
        assert!(!graph.node("web").unwrap().warning);
    }

    #[test]
    fn test_pre_order_depth_first() {
        let doc = json!({
            "all": {
                "children": {
                    "a": { "children": { "a1": { "hosts": { "h1": {} } } } },
                    "b": { "hosts": { "h2": {} } }
                }
            }
        });
        let graph = build_document(&doc, "all", &BuildOptions::default()).unwrap();
        assert_eq!(ids(&graph), vec!["all", "a", "a1", "h1", "b", "h2"]);
    }

    #[test]
    fn test_shared_name_keeps_first_but_both_edges() {
        let doc = json!({
            "all": {
                "children": {
                    "east": { "children": { "shared": { "vars": { "region": "east" } } } },
                    "west": { "children": { "shared": { "vars": { "region": "west" } } } }
                }
            }
        });
        let graph = build_document(&doc, "all", &BuildOptions::default()).unwrap();

        assert_eq!(ids(&graph), vec!["all", "east", "shared", "west"]);
        assert_eq!(graph.node("shared").unwrap().vars["region"], json!("east"));
        let into_shared: Vec<String> = graph
            .edges()
            .filter(|e| e.target == "shared")
            .map(|e| e.source)
            .collect();
        assert_eq!(into_shared, vec!["east", "west"]);
    }

    #[test]
    fn test_reject_policy_fails_on_duplicates() {
        let doc = json!({
            "all": {
                "children": {
                    "east": { "hosts": { "shared": {} } },
                    "west": { "hosts": { "shared": {} } }
                }
            }
        });
        let options = BuildOptions {
            show_vars: false,
            duplicate_policy: DuplicateIdPolicy::Reject,
        };
        match build_document(&doc, "all", &options) {
            Err(GraphError::DuplicateId(details)) => {
                assert!(details.message.contains("\"shared\""))
            }
            other => panic!("expected DuplicateId, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_root_is_schema_error() {
        let err = build_document(&json!({ "ungrouped": {} }), "all", &BuildOptions::default())
            .unwrap_err();
        assert_eq!(
            err,
            GraphError::schema("Inventory must have an \"all\" root key")
        );

        assert!(matches!(
            build_document(&json!({ "all": null }), "all", &BuildOptions::default()),
            Err(GraphError::SchemaError(_))
        ));
        assert!(matches!(
            build_document(&json!("all"), "all", &BuildOptions::default()),
            Err(GraphError::SchemaError(_))
        ));
    }

    #[test]
    fn test_leaf_root_is_var() {
        let graph = build(&json!({}), "all", &BuildOptions::default()).unwrap();
        assert_eq!(ids(&graph), vec!["all"]);
        assert_eq!(graph.node("all").unwrap().kind, NodeKind::Var);
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn test_non_mapping_sections_are_ignored() {
        let doc = json!({ "all": { "hosts": "not-a-mapping", "vars": ["x"] } });
        let graph = build_document(&doc, "all", &BuildOptions::with_vars(true)).unwrap();
        assert_eq!(ids(&graph), vec!["all"]);
        assert_eq!(graph.node("all").unwrap().kind, NodeKind::Group);
    }
}
