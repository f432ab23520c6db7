use log::{debug, info};

use super::edit::EditSession;
use super::interaction::Gesture;
use super::types::{ConceptGraph, ConceptNode, PALETTE, ROOT_ID};
use super::viewport::Viewport;
use crate::config::NewNodeConfig;

/// Where the current graph came from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MapMode {
	/// Generated by the remote service.
	#[default]
	Ai,
	/// Authored by hand, starting from the topic alone.
	Manual,
}

/// What the panel under the canvas shows. Kept free of the edit buffer so
/// typing into the form does not rebuild it.
#[derive(Clone, Debug, PartialEq)]
pub enum PanelView {
	/// Nothing selected.
	Empty,
	/// Read-only view of the selected node.
	Details {
		/// Node label.
		label: String,
		/// Node details, if non-empty.
		details: Option<String>,
	},
	/// Edit form for the selected node.
	Editing,
}

/// Everything one mounted editor owns.
#[derive(Clone, Debug, Default)]
pub struct ConceptMapState {
	/// The map being shown.
	pub graph: ConceptGraph,
	/// Zoom and offset used to draw `graph`.
	pub viewport: Viewport,
	/// Where `graph` came from.
	pub mode: MapMode,
	pub(super) selected: Option<String>,
	pub(super) gesture: Gesture,
	pub(super) edit: Option<EditSession>,
}

impl ConceptMapState {
	/// Swap in a whole new graph. Selection, drag and edit state refer to the
	/// old graph and are dropped with it.
	pub fn replace_graph(&mut self, graph: ConceptGraph, mode: MapMode) {
		info!(
			"concept-map: loaded {} nodes, {} links ({:?})",
			graph.nodes().len(),
			graph.links().len(),
			mode
		);
		self.graph = graph;
		self.mode = mode;
		self.selected = None;
		self.gesture = Gesture::Idle;
		self.edit = None;
	}

	/// Id of the selected node.
	pub fn selected_id(&self) -> Option<&str> {
		self.selected.as_deref()
	}

	/// The selected node, if it still exists.
	pub fn selected_node(&self) -> Option<&ConceptNode> {
		self.selected.as_deref().and_then(|id| self.graph.node(id))
	}

	/// Edit buffer of the selected node.
	pub fn edit_session(&self) -> Option<&EditSession> {
		self.edit.as_ref()
	}

	/// Change the selection. A different node starts a fresh edit session;
	/// pressing the already-selected node keeps the current one.
	pub(super) fn select(&mut self, id: Option<String>) {
		if id.is_some() && id == self.selected && self.edit.is_some() {
			return;
		}
		self.edit = id
			.as_deref()
			.and_then(|id| self.graph.node(id))
			.map(EditSession::for_node);
		self.selected = id;
	}

	/// Open the edit form for the selected node. The graph is not touched.
	pub fn begin_edit(&mut self) {
		if let Some(edit) = &mut self.edit {
			edit.begin();
		}
	}

	/// Replace the buffered label.
	pub fn set_edit_label(&mut self, label: String) {
		if let Some(edit) = &mut self.edit {
			edit.label = label;
		}
	}

	/// Replace the buffered details.
	pub fn set_edit_details(&mut self, details: String) {
		if let Some(edit) = &mut self.edit {
			edit.details = details;
		}
	}

	/// Write the edit buffer back into the graph and close the form.
	pub fn save_edit(&mut self) {
		let Some(edit) = &mut self.edit else {
			return;
		};
		debug!("concept-map: saving text for {}", edit.node_id);
		self.graph
			.update_node_text(&edit.node_id, edit.label.clone(), edit.details.clone());
		edit.editing = false;
	}

	/// Append a new concept linked from the root node.
	pub fn add_concept(&mut self, new_node: &NewNodeConfig) {
		let color = PALETTE[self.graph.nodes().len() % PALETTE.len()];
		let id = self
			.graph
			.add_node(new_node.label.clone(), new_node.position, Some(color.into()))
			.id
			.clone();
		self.graph.add_link(ROOT_ID, id, new_node.link_label.clone());
	}

	/// What the panel under the canvas should show.
	pub fn panel_view(&self) -> PanelView {
		match (self.selected_node(), &self.edit) {
			(None, _) => PanelView::Empty,
			(Some(_), Some(edit)) if edit.editing => PanelView::Editing,
			(Some(node), _) => PanelView::Details {
				label: node.label.clone(),
				details: node.details.clone().filter(|d| !d.is_empty()),
			},
		}
	}
}
