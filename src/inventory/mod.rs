pub mod builder;
pub mod error;
pub mod graph;
pub mod source;
pub mod truthiness;

pub use builder::{build, build_document, extract_root, BuildOptions, DEFAULT_ROOT_NAME};
pub use error::{ErrorDetails, ErrorLayer, GraphError, Result};
pub use graph::{DuplicateIdPolicy, GraphEdge, GraphNode, InventoryGraph, NodeKind};
pub use source::{inventory_to_graph, load_inventory, parse_inventory, DEFAULT_INVENTORY_PATH};
pub use truthiness::{is_affirmative, scalar_text, warning_flag};
