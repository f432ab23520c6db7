//! Pointer handling: hit-testing, selection and live node dragging.

use super::state::ConceptMapState;
use super::types::ConceptGraph;
use super::viewport::ZoomDirection;

/// Pick radius around a node centre, in model units.
pub const HIT_RADIUS: f64 = 20.0;

/// Press/drag state of the pointer.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Gesture {
	/// No button held on a node.
	#[default]
	Idle,
	/// Pressed on a node, not moved yet.
	Pressed(String),
	/// Moving the node with this id.
	Dragging(String),
}

impl Gesture {
	/// Id of the node being pressed or dragged.
	pub fn drag_target(&self) -> Option<&str> {
		match self {
			Gesture::Idle => None,
			Gesture::Pressed(id) | Gesture::Dragging(id) => Some(id),
		}
	}
}

/// First node in sequence order whose centre is within [`HIT_RADIUS`] of the
/// model-space point. Unplaced nodes never match.
pub fn hit_test(graph: &ConceptGraph, x: f64, y: f64) -> Option<&str> {
	graph
		.nodes()
		.iter()
		.find(|node| {
			node.position().is_some_and(|(nx, ny)| {
				let (dx, dy) = (nx - x, ny - y);
				(dx * dx + dy * dy).sqrt() < HIT_RADIUS
			})
		})
		.map(|node| node.id.as_str())
}

impl ConceptMapState {
	/// Current press/drag state.
	pub fn gesture(&self) -> &Gesture {
		&self.gesture
	}

	/// Select and start dragging the node under the pointer, or clear the
	/// selection when there is none.
	pub fn pointer_down(&mut self, sx: f64, sy: f64) {
		let (x, y) = self.viewport.to_model(sx, sy);
		match hit_test(&self.graph, x, y).map(str::to_owned) {
			Some(id) => {
				self.select(Some(id.clone()));
				self.gesture = Gesture::Pressed(id);
			}
			None => {
				self.select(None);
				self.gesture = Gesture::Idle;
			}
		}
	}

	/// Move the drag target under the pointer. Every move is applied.
	pub fn pointer_move(&mut self, sx: f64, sy: f64) {
		let Some(id) = self.gesture.drag_target().map(str::to_owned) else {
			return;
		};
		let (x, y) = self.viewport.to_model(sx, sy);
		self.graph.update_node_position(&id, x, y);
		self.gesture = Gesture::Dragging(id);
	}

	/// Pointer released or left the canvas. The selection is kept.
	pub fn pointer_up(&mut self) {
		self.gesture = Gesture::Idle;
	}

	/// One wheel event: zoom in or out by one step.
	pub fn wheel(&mut self, delta_y: f64) {
		self.viewport.zoom(ZoomDirection::from_wheel(delta_y));
	}
}
