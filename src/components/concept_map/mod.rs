//! Concept-map editor: graph model, viewport, renderer, pointer handling,
//! content loading and the Leptos component tying them together.

mod component;
mod edit;
mod interaction;
mod render;
mod source;
mod state;
mod types;
mod viewport;

pub use component::ConceptMapCanvas;
pub use edit::EditSession;
pub use interaction::{Gesture, HIT_RADIUS, hit_test};
pub use render::{CanvasSurface, Surface, TextBaseline, render};
pub use source::{
	SourceError, fetch_concept_map, manual_map, parse_map_response, resolve_fetch,
	scatter_missing_positions,
};
pub use state::{ConceptMapState, MapMode, PanelView};
pub use types::{ConceptGraph, ConceptLink, ConceptNode, PALETTE, ROOT_ID};
pub use viewport::{MAX_SCALE, MIN_SCALE, Viewport, ZoomDirection};
