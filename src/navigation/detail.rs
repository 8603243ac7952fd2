use std::fmt;

use serde::Serialize;

use super::selection::SelectionInfo;
use crate::inventory::{is_affirmative, scalar_text, NodeKind};

pub const EMPTY_SELECTION_HINT: &str = "Click a node to see details";
pub const VAR_NODE_PLACEHOLDER: &str = "(variable node)";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VarLine {
    pub key: String,
    pub value: String,
    /// Rendered with warning emphasis.
    pub highlighted: bool,
}

/// Content of the side panel describing the current selection.  Child and
/// parent labels are meant to be clickable; activating one goes through
/// `Selection::navigate_to_label`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DetailPanel {
    Empty,
    Group {
        label: String,
        child_count: usize,
        child_labels: Vec<String>,
    },
    Host {
        label: String,
        vars: Vec<VarLine>,
        parent_label: Option<String>,
    },
    Var,
}

impl DetailPanel {
    pub fn from_selection(info: Option<&SelectionInfo>) -> Self {
        let (info, node) = match info.and_then(|info| info.node.as_ref().map(|n| (info, n))) {
            Some(pair) => pair,
            None => return DetailPanel::Empty,
        };

        match node.kind {
            NodeKind::Group => DetailPanel::Group {
                label: node.label.clone(),
                child_count: info.child_count(),
                child_labels: info.child_labels.clone(),
            },
            NodeKind::Host => DetailPanel::Host {
                label: node.label.clone(),
                // The note explaining a warning is emphasized together with it.
                vars: node
                    .vars
                    .iter()
                    .map(|(key, value)| VarLine {
                        key: key.clone(),
                        value: scalar_text(value),
                        highlighted: (key == "warning" && is_affirmative(value))
                            || (key == "note" && node.warning),
                    })
                    .collect(),
                parent_label: info.parent_label.clone(),
            },
            NodeKind::Var => DetailPanel::Var,
        }
    }
}

impl fmt::Display for DetailPanel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DetailPanel::Empty => writeln!(f, "{}", EMPTY_SELECTION_HINT),
            DetailPanel::Group {
                label,
                child_count,
                child_labels,
            } => {
                writeln!(f, "Group: {}", label)?;
                writeln!(f, "Children: {}", child_count)?;
                if !child_labels.is_empty() {
                    writeln!(f, "Child nodes:")?;
                    for child in child_labels {
                        writeln!(f, "  {}", child)?;
                    }
                }
                Ok(())
            }
            DetailPanel::Host {
                label,
                vars,
                parent_label,
            } => {
                writeln!(f, "Host: {}", label)?;
                for line in vars {
                    let marker = if line.highlighted { "!" } else { " " };
                    writeln!(f, "{} {}: {}", marker, line.key, line.value)?;
                }
                if let Some(parent) = parent_label {
                    writeln!(f, "Parent: {}", parent)?;
                }
                Ok(())
            }
            DetailPanel::Var => writeln!(f, "{}", VAR_NODE_PLACEHOLDER),
        }
    }
}
