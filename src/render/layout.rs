use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Padding around the whole graph when a layout fits it to the viewport.
pub const LAYOUT_PADDING: u32 = 16;
pub const MIN_ZOOM: f64 = 0.2;
pub const MAX_ZOOM: f64 = 3.0;

/// Layout presets offered by the viewer toolbar.  Positioning itself is done
/// by the rendering engine; we only hand over its options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutKind {
    /// Layered, left to right.  The default.
    Dagre,
    Breadthfirst,
    Concentric,
    Cose,
}

impl Default for LayoutKind {
    fn default() -> Self {
        LayoutKind::Dagre
    }
}

impl LayoutKind {
    pub const ALL: [LayoutKind; 4] = [
        LayoutKind::Dagre,
        LayoutKind::Breadthfirst,
        LayoutKind::Concentric,
        LayoutKind::Cose,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            LayoutKind::Dagre => "dagre",
            LayoutKind::Breadthfirst => "breadthfirst",
            LayoutKind::Concentric => "concentric",
            LayoutKind::Cose => "cose",
        }
    }

    /// Options object understood by the rendering engine's layout of the
    /// same name.
    pub fn options(&self) -> Value {
        match self {
            LayoutKind::Dagre => json!({
                "name": self.name(),
                "rankDir": "LR",
                "nodeSep": 40,
                "edgeSep": 16,
                "rankSep": 100,
                "fit": true,
                "padding": LAYOUT_PADDING,
            }),
            LayoutKind::Breadthfirst => json!({
                "name": self.name(),
                "directed": true,
                "spacingFactor": 1.2,
                "fit": true,
                "padding": LAYOUT_PADDING,
            }),
            LayoutKind::Concentric => json!({
                "name": self.name(),
                "minNodeSpacing": 20,
                "fit": true,
                "padding": LAYOUT_PADDING,
            }),
            LayoutKind::Cose => json!({
                "name": self.name(),
                "padding": LAYOUT_PADDING,
            }),
        }
    }
}

impl fmt::Display for LayoutKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for LayoutKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LayoutKind::ALL
            .iter()
            .find(|kind| kind.name() == s.to_lowercase())
            .copied()
            .ok_or_else(|| format!("Unknown layout: {}", s))
    }
}
