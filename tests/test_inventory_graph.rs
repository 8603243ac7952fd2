use std::collections::HashSet;

use inventory_graph::{
    inventory::{
        inventory_to_graph, is_affirmative, BuildOptions, InventoryGraph, NodeKind,
    },
    navigation::{find_by_label, resolve, Selection},
};
use serde_json::{json, Value};

const DEMO_HOSTS: &str = include_str!("../demos/hosts.yml");

const PROD: &str = r#"
all:
  children:
    prod:
      hosts:
        db1:
          warning: "true"
        db2: {}
"#;

const SHARED: &str = r#"
all:
  children:
    east:
      children:
        shared:
          hosts:
            e1: {}
    west:
      children:
        shared:
          hosts:
            w1: {}
"#;

fn build(text: &str, show_vars: bool) -> InventoryGraph {
    inventory_to_graph(text, "all", &BuildOptions::with_vars(show_vars)).unwrap()
}

fn structural_subset(graph: &InventoryGraph) -> (Vec<String>, Vec<(String, String)>) {
    let is_var = |id: &str| graph.node(id).map(|n| n.kind) == Some(NodeKind::Var);
    let nodes = graph
        .nodes()
        .filter(|n| n.kind != NodeKind::Var)
        .map(|n| n.id.clone())
        .collect();
    let edges = graph
        .edges()
        .filter(|e| !is_var(&e.target))
        .map(|e| (e.source, e.target))
        .collect();
    (nodes, edges)
}

#[test]
fn test_prod_graph_snapshot() {
    let graph = build(PROD, false);
    insta::assert_json_snapshot!(graph.to_json(), @r###"
    {
      "nodes": [
        {
          "id": "all",
          "label": "all",
          "type": "group",
          "vars": {},
          "warning": false
        },
        {
          "id": "prod",
          "label": "prod",
          "type": "group",
          "vars": {},
          "warning": false
        },
        {
          "id": "db1",
          "label": "db1",
          "type": "host",
          "vars": {
            "warning": "true"
          },
          "warning": true
        },
        {
          "id": "db2",
          "label": "db2",
          "type": "host",
          "vars": {},
          "warning": false
        }
      ],
      "edges": [
        {
          "source": "all",
          "target": "prod"
        },
        {
          "source": "prod",
          "target": "db1"
        },
        {
          "source": "prod",
          "target": "db2"
        }
      ]
    }
    "###);
}

#[test]
fn test_prod_graph_with_vars() {
    let graph = build(PROD, true);
    let leaf = graph.node("db1::warning").unwrap();
    assert_eq!(leaf.label, "warning: true");
    assert_eq!(leaf.kind, NodeKind::Var);

    let edges: Vec<(String, String)> = graph.edges().map(|e| (e.source, e.target)).collect();
    assert!(edges.contains(&("db1".to_string(), "db1::warning".to_string())));
    assert_eq!(graph.node_count(), 5);
}

#[test]
fn test_ids_are_unique() {
    for text in [DEMO_HOSTS, PROD, SHARED].iter() {
        for show_vars in [false, true].iter() {
            let graph = build(text, *show_vars);
            let ids: HashSet<&str> = graph.nodes().map(|n| n.id.as_str()).collect();
            assert_eq!(ids.len(), graph.node_count());
        }
    }
}

#[test]
fn test_edges_never_dangle() {
    for text in [DEMO_HOSTS, PROD, SHARED].iter() {
        let graph = build(text, true);
        for edge in graph.edges() {
            assert!(graph.contains(&edge.source), "source {}", edge.source);
            assert!(graph.contains(&edge.target), "target {}", edge.target);
        }
    }
}

#[test]
fn test_show_vars_only_adds_var_leaves() {
    for text in [DEMO_HOSTS, PROD, SHARED].iter() {
        let without = build(text, false);
        let with = build(text, true);
        assert_eq!(structural_subset(&without), structural_subset(&with));
        assert!(with.node_count() >= without.node_count());
    }
}

#[test]
fn test_truthiness_table() {
    for value in [json!(true), json!("true"), json!("TRUE"), json!("True")].iter() {
        assert!(is_affirmative(value), "{} should be affirmative", value);
    }
    for value in [json!(false), json!("false"), Value::Null, json!(0)].iter() {
        assert!(!is_affirmative(value), "{} should not be affirmative", value);
    }
}

#[test]
fn test_children_listed_lexicographically() {
    let graph = build(DEMO_HOSTS, false);
    let info = resolve(&graph, "web");
    assert_eq!(info.child_labels, vec!["web1", "web2"]);
    assert_eq!(info.parent_label.as_deref(), Some("all"));

    let info = resolve(&graph, "all");
    assert_eq!(info.child_labels, vec!["db", "monitoring", "web"]);
    assert_eq!(info.parent_label, None);
}

#[test]
fn test_shared_name_collision() {
    let graph = build(SHARED, false);
    let ids: Vec<&str> = graph.nodes().map(|n| n.id.as_str()).collect();
    assert_eq!(ids, vec!["all", "east", "shared", "e1", "west", "w1"]);

    let into_shared: Vec<String> = graph
        .edges()
        .filter(|e| e.target == "shared")
        .map(|e| e.source)
        .collect();
    assert_eq!(into_shared, vec!["east", "west"]);

    let info = resolve(&graph, "shared");
    assert_eq!(info.parent_label.as_deref(), Some("east"));
    // Hosts from both definitions hang off the one retained node.
    assert_eq!(info.child_labels, vec!["e1", "w1"]);
}

#[test]
fn test_locator_miss_leaves_selection() {
    let graph = build(DEMO_HOSTS, true);
    assert_eq!(find_by_label(&graph, "http_port: 80"), Some("web::http_port"));
    assert_eq!(find_by_label(&graph, "nothing here"), None);

    let mut selection = Selection::new();
    selection.select(&graph, "db1");
    assert!(selection.navigate_to_label(&graph, "nothing here").is_none());
    assert_eq!(selection.current(), Some("db1"));
}

#[test]
fn test_demo_warnings() {
    let graph = build(DEMO_HOSTS, false);
    let warned: Vec<&str> = graph
        .nodes()
        .filter(|n| n.warning)
        .map(|n| n.id.as_str())
        .collect();
    assert_eq!(warned, vec!["db1"]);
}
