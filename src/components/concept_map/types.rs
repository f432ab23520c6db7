//! Concept graph model: nodes, labelled links, and the update operations the
//! editor is allowed to perform on them.

use std::sync::Arc;

use serde::Deserialize;

/// Fill colours for nodes that carry no explicit colour, picked by position
/// in the node sequence.
pub const PALETTE: &[&str] = &["#2563eb", "#16a34a", "#dc2626", "#9333ea", "#ea580c"];

/// Id of the root concept in manual maps and the anchor for added concepts.
pub const ROOT_ID: &str = "main";

/// A single concept.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ConceptNode {
	/// Unique within its graph. Never changes after creation.
	pub id: String,
	/// Text drawn inside the node box.
	pub label: String,
	/// Model-space position. Sources may omit it; it is filled in before the
	/// node is first drawn.
	#[serde(default)]
	pub x: Option<f64>,
	/// See `x`.
	#[serde(default)]
	pub y: Option<f64>,
	/// Optional CSS colour override (e.g., "#ff0000").
	#[serde(default)]
	pub color: Option<String>,
	/// Free-form notes shown when the node is selected.
	#[serde(default)]
	pub details: Option<String>,
}

impl ConceptNode {
	/// Both coordinates, if the node has been placed.
	pub fn position(&self) -> Option<(f64, f64)> {
		self.x.zip(self.y)
	}
}

/// A labelled relation from `source` to `target`, by node id.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ConceptLink {
	/// Id of the node the link starts at.
	pub source: String,
	/// Id of the node the link points to.
	pub target: String,
	/// Text drawn at the link midpoint.
	#[serde(default)]
	pub label: String,
}

/// Nodes and links of one concept map.
///
/// Nodes are shared behind [`Arc`]. Every update swaps in a fresh node
/// instead of editing the old one, so clones taken earlier keep seeing the
/// previous state and untouched nodes stay pointer-identical.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ConceptGraph {
	nodes: Vec<Arc<ConceptNode>>,
	links: Vec<ConceptLink>,
}

impl ConceptGraph {
	/// Build a graph from already-owned nodes and links.
	pub fn from_parts(nodes: Vec<ConceptNode>, links: Vec<ConceptLink>) -> Self {
		Self {
			nodes: nodes.into_iter().map(Arc::new).collect(),
			links,
		}
	}

	/// The single-node map used in manual mode and as the fallback when
	/// generation fails.
	pub fn manual(topic: &str, root: (f64, f64)) -> Self {
		Self::from_parts(
			vec![ConceptNode {
				id: ROOT_ID.into(),
				label: topic.into(),
				x: Some(root.0),
				y: Some(root.1),
				color: None,
				details: None,
			}],
			Vec::new(),
		)
	}

	/// Nodes in display order.
	pub fn nodes(&self) -> &[Arc<ConceptNode>] {
		&self.nodes
	}

	/// Links in display order.
	pub fn links(&self) -> &[ConceptLink] {
		&self.links
	}

	/// The node with this id, if any.
	pub fn node(&self, id: &str) -> Option<&ConceptNode> {
		self.nodes.iter().find(|n| n.id == id).map(Arc::as_ref)
	}

	/// Position of the node with this id, if it exists and is placed.
	pub fn position_of(&self, id: &str) -> Option<(f64, f64)> {
		self.node(id).and_then(ConceptNode::position)
	}

	/// Append a new node with a generated id and return it.
	pub fn add_node(
		&mut self,
		label: impl Into<String>,
		position: (f64, f64),
		color: Option<String>,
	) -> &ConceptNode {
		let id = self.fresh_id();
		self.nodes.push(Arc::new(ConceptNode {
			id,
			label: label.into(),
			x: Some(position.0),
			y: Some(position.1),
			color,
			details: None,
		}));
		&self.nodes[self.nodes.len() - 1]
	}

	/// Append a link. Endpoints are not checked; the renderer skips links
	/// whose endpoints are missing.
	pub fn add_link(
		&mut self,
		source: impl Into<String>,
		target: impl Into<String>,
		label: impl Into<String>,
	) {
		self.links.push(ConceptLink {
			source: source.into(),
			target: target.into(),
			label: label.into(),
		});
	}

	/// Move one node. Returns `false` if no node has this id.
	pub fn update_node_position(&mut self, id: &str, x: f64, y: f64) -> bool {
		self.replace_node(id, |node| {
			node.x = Some(x);
			node.y = Some(y);
		})
	}

	/// Replace a node's label and details, keeping its position and colour.
	pub fn update_node_text(&mut self, id: &str, label: String, details: String) -> bool {
		self.replace_node(id, |node| {
			node.label = label;
			node.details = Some(details);
		})
	}

	/// Give every node without a coordinate one from `place`, called once
	/// per missing axis.
	pub(crate) fn fill_missing_positions(&mut self, mut place: impl FnMut(Axis) -> f64) {
		for slot in &mut self.nodes {
			if slot.position().is_some() {
				continue;
			}
			let mut node = ConceptNode::clone(slot);
			node.x = node.x.or_else(|| Some(place(Axis::X)));
			node.y = node.y.or_else(|| Some(place(Axis::Y)));
			*slot = Arc::new(node);
		}
	}

	fn replace_node(&mut self, id: &str, edit: impl FnOnce(&mut ConceptNode)) -> bool {
		let Some(slot) = self.nodes.iter_mut().find(|n| n.id == id) else {
			return false;
		};
		let mut node = ConceptNode::clone(slot);
		edit(&mut node);
		*slot = Arc::new(node);
		true
	}

	fn fresh_id(&self) -> String {
		let mut n = self.nodes.len() + 1;
		loop {
			let id = format!("node{n}");
			if self.node(&id).is_none() {
				return id;
			}
			n += 1;
		}
	}
}

/// Coordinate axis, used when filling in missing positions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
	/// Horizontal.
	X,
	/// Vertical.
	Y,
}

#[cfg(test)]
mod tests {
	use super::*;

	fn node(id: &str, x: f64, y: f64) -> ConceptNode {
		ConceptNode {
			id: id.into(),
			label: id.to_uppercase(),
			x: Some(x),
			y: Some(y),
			color: None,
			details: None,
		}
	}

	fn sample() -> ConceptGraph {
		ConceptGraph::from_parts(
			vec![node("main", 400.0, 300.0), node("node2", 10.0, 20.0)],
			vec![ConceptLink {
				source: "main".into(),
				target: "node2".into(),
				label: "includes".into(),
			}],
		)
	}

	#[test]
	fn add_node_generates_unique_ids_and_leaves_others_alone() {
		let mut graph = sample();
		let before = graph.clone();

		let first = graph.add_node("A", (1.0, 2.0), None).id.clone();
		let second = graph.add_node("B", (3.0, 4.0), None).id.clone();

		assert_ne!(first, second);
		// "node2" is already taken, so numbering skips past it.
		assert_eq!(first, "node3");
		assert_eq!(graph.node("node2").map(|n| n.label.as_str()), Some("NODE2"));
		for (old, new) in before.nodes().iter().zip(graph.nodes()) {
			assert!(Arc::ptr_eq(old, new));
		}
		assert_eq!(before.links(), graph.links());
		assert_eq!(before.nodes().len(), 2);
		assert_eq!(graph.nodes().len(), 4);
	}

	#[test]
	fn add_link_accepts_dangling_endpoints() {
		let mut graph = sample();
		graph.add_link("main", "ghost", "haunts");
		assert_eq!(graph.links().len(), 2);
		assert_eq!(graph.links()[1].target, "ghost");
	}

	#[test]
	fn update_position_replaces_only_the_target() {
		let mut graph = sample();
		let snapshot = graph.clone();

		assert!(graph.update_node_position("main", 120.0, 80.0));

		assert_eq!(graph.position_of("main"), Some((120.0, 80.0)));
		assert_eq!(snapshot.position_of("main"), Some((400.0, 300.0)));
		assert!(!Arc::ptr_eq(&snapshot.nodes()[0], &graph.nodes()[0]));
		assert!(Arc::ptr_eq(&snapshot.nodes()[1], &graph.nodes()[1]));
		assert_eq!(snapshot.links(), graph.links());
	}

	#[test]
	fn update_unknown_node_is_noop() {
		let mut graph = sample();
		let snapshot = graph.clone();
		assert!(!graph.update_node_position("missing", 0.0, 0.0));
		assert!(!graph.update_node_text("missing", "x".into(), "y".into()));
		assert_eq!(graph, snapshot);
	}

	#[test]
	fn update_text_keeps_position_and_color() {
		let mut graph = sample();
		graph.add_node("Colored", (5.0, 6.0), Some("#abcdef".into()));

		assert!(graph.update_node_text("node3", "Renamed".into(), "notes".into()));

		let node = graph.node("node3").unwrap();
		assert_eq!(node.label, "Renamed");
		assert_eq!(node.details.as_deref(), Some("notes"));
		assert_eq!(node.position(), Some((5.0, 6.0)));
		assert_eq!(node.color.as_deref(), Some("#abcdef"));
	}

	#[test]
	fn manual_graph_has_single_root() {
		let graph = ConceptGraph::manual("Algebra", (400.0, 300.0));
		assert_eq!(graph.nodes().len(), 1);
		assert!(graph.links().is_empty());
		let root = graph.node(ROOT_ID).unwrap();
		assert_eq!(root.label, "Algebra");
		assert_eq!(root.position(), Some((400.0, 300.0)));
	}

	#[test]
	fn fill_missing_positions_keeps_zero_coordinates() {
		let mut graph = ConceptGraph::from_parts(
			vec![
				node("origin", 0.0, 0.0),
				ConceptNode {
					x: Some(7.0),
					y: None,
					..node("half", 0.0, 0.0)
				},
			],
			Vec::new(),
		);
		graph.fill_missing_positions(|axis| match axis {
			Axis::X => 1.0,
			Axis::Y => 2.0,
		});
		assert_eq!(graph.position_of("origin"), Some((0.0, 0.0)));
		assert_eq!(graph.position_of("half"), Some((7.0, 2.0)));
	}
}
