//! Hand-off formats for the external rendering engines.  Layout, styling and
//! animation all happen on the other side.

pub mod dot;
pub mod elements;
pub mod layout;

pub use dot::{to_dot, to_dot_graph};
pub use elements::{to_elements, to_view};
pub use layout::LayoutKind;
