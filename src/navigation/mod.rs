//! Answering "what is this node related to" for a built graph, and the
//! single-selection state that drives click-to-navigate.

pub mod detail;
pub mod locator;
pub mod selection;
pub mod session;

pub use detail::{DetailPanel, VarLine};
pub use locator::{find_by_label, NavigationRequest};
pub use selection::{resolve, Selection, SelectionInfo};
pub use session::ViewerSession;
