use tracing::{info, warn};

use super::{
    detail::DetailPanel,
    locator::NavigationRequest,
    selection::{Selection, SelectionInfo},
};
use crate::inventory::{inventory_to_graph, BuildOptions, GraphError, InventoryGraph};

/// One loaded inventory document plus the view state built from it.
///
/// The graph is never patched in place: every option change throws the
/// previous graph and selection away and rebuilds from the source text.  A
/// failed build leaves only the error, but the options can still be toggled
/// to try again.
pub struct ViewerSession {
    source: String,
    root_name: String,
    options: BuildOptions,
    built: Result<InventoryGraph, GraphError>,
    selection: Selection,
}

impl ViewerSession {
    pub fn new(source: String, root_name: &str, options: BuildOptions) -> Self {
        let built = inventory_to_graph(&source, root_name, &options);
        if let Err(err) = &built {
            warn!(%err, "inventory build failed");
        }
        ViewerSession {
            source,
            root_name: root_name.to_string(),
            options,
            built,
            selection: Selection::new(),
        }
    }

    pub fn options(&self) -> &BuildOptions {
        &self.options
    }

    pub fn graph(&self) -> Option<&InventoryGraph> {
        self.built.as_ref().ok()
    }

    pub fn error(&self) -> Option<&GraphError> {
        self.built.as_ref().err()
    }

    fn rebuild(&mut self) {
        self.selection.clear();
        self.built = inventory_to_graph(&self.source, &self.root_name, &self.options);
        match &self.built {
            Ok(graph) => info!(
                show_vars = self.options.show_vars,
                nodes = graph.node_count(),
                "rebuilt inventory graph"
            ),
            Err(err) => warn!(%err, "inventory rebuild failed"),
        }
    }

    pub fn set_show_vars(&mut self, show_vars: bool) {
        if self.options.show_vars != show_vars {
            self.options.show_vars = show_vars;
            self.rebuild();
        }
    }

    pub fn toggle_vars(&mut self) {
        self.set_show_vars(!self.options.show_vars);
    }

    pub fn selected(&self) -> Option<&str> {
        self.selection.current()
    }

    /// Renderer reported a node selection.
    pub fn select(&mut self, id: &str) -> Option<SelectionInfo> {
        let graph = self.built.as_ref().ok()?;
        Some(self.selection.select(graph, id))
    }

    /// Renderer reported the selection was dropped.
    pub fn unselect(&mut self) {
        self.selection.clear();
    }

    /// A child/parent entry in the detail panel was activated.
    pub fn navigate_to_label(&mut self, label: &str) -> Option<NavigationRequest> {
        let graph = self.built.as_ref().ok()?;
        self.selection
            .navigate_to_label(graph, label)
            .map(|(request, _)| request)
    }

    pub fn detail_panel(&self) -> DetailPanel {
        let info = self
            .built
            .as_ref()
            .ok()
            .and_then(|graph| self.selection.info(graph));
        DetailPanel::from_selection(info.as_ref())
    }
}
