use super::types::ConceptNode;

/// Unsaved label/details text for the selected node.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EditSession {
	/// Node the buffer belongs to.
	pub node_id: String,
	/// Label being edited.
	pub label: String,
	/// Details being edited. Empty when the node has none.
	pub details: String,
	/// Whether the edit form is open.
	pub editing: bool,
}

impl EditSession {
	/// Buffer loaded from the node's current text, form closed.
	pub fn for_node(node: &ConceptNode) -> Self {
		Self {
			node_id: node.id.clone(),
			label: node.label.clone(),
			details: node.details.clone().unwrap_or_default(),
			editing: false,
		}
	}

	/// Open the edit form.
	pub fn begin(&mut self) {
		self.editing = true;
	}
}
