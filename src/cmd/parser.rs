use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::config::ViewerConfig;
use crate::inventory::DuplicateIdPolicy;
use crate::render::LayoutKind;

#[derive(Clone, Copy, Debug, PartialEq, ValueEnum)]
pub enum OutputFormat {
    /// Un-pretty-printed JSON.
    Concise,
    /// Pretty-printed JSON.
    Pretty,
    /// Human readable text where a command has one, pretty JSON otherwise.
    Text,
}

#[derive(Clone, Copy, Debug, PartialEq, ValueEnum)]
pub enum DuplicatePolicyArg {
    KeepFirst,
    Reject,
}

impl From<DuplicatePolicyArg> for DuplicateIdPolicy {
    fn from(arg: DuplicatePolicyArg) -> Self {
        match arg {
            DuplicatePolicyArg::KeepFirst => DuplicateIdPolicy::KeepFirst,
            DuplicatePolicyArg::Reject => DuplicateIdPolicy::Reject,
        }
    }
}

/// Render an inventory (groups, hosts, vars) as a directed graph and answer
/// navigation questions about it.
#[derive(Debug, Parser)]
#[command(name = "inventory-graph", version)]
pub struct ToolOpts {
    /// TOML file with viewer settings; command line flags override it.
    #[arg(long, env = "INVENTORY_GRAPH_CONFIG")]
    pub config: Option<PathBuf>,

    /// Inventory file to load.  Defaults to hosts.yml.
    #[arg(long, short, env = "INVENTORY_PATH")]
    pub inventory: Option<PathBuf>,

    /// Name of the root entry.  Defaults to "all".
    #[arg(long)]
    pub root: Option<String>,

    /// Expand every variable into its own leaf node.
    #[arg(long)]
    pub show_vars: bool,

    /// What to do when a name is defined in more than one place.
    #[arg(long, value_enum)]
    pub duplicate_policy: Option<DuplicatePolicyArg>,

    #[arg(long, short, value_enum, ignore_case = true, default_value = "concise")]
    pub output_format: OutputFormat,

    #[command(subcommand)]
    pub cmd: Command,
}

impl ToolOpts {
    /// The subset of the options that can also come from a config file.
    pub fn config_overrides(&self) -> ViewerConfig {
        ViewerConfig {
            inventory: self.inventory.clone(),
            root: self.root.clone(),
            show_vars: if self.show_vars { Some(true) } else { None },
            duplicate_policy: self.duplicate_policy.map(DuplicateIdPolicy::from),
            layout: match &self.cmd {
                Command::Elements { layout } => *layout,
                _ => None,
            },
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Emit the `{ nodes, edges }` graph.
    Graph,
    /// Emit renderer elements along with layout options.
    Elements {
        /// One of dagre, breadthfirst, concentric, cose.
        #[arg(long)]
        layout: Option<LayoutKind>,
    },
    /// Emit a Graphviz digraph.
    Dot,
    /// Select a node by id and describe its children and parent.
    Select { id: String },
    /// Jump to the first node with exactly this label.
    Find { label: String },
}
