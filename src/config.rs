//! Editor configuration.
//!
//! Read from an optional JSON script element so a host page can override the
//! defaults without rebuilding the bundle.

use log::{info, warn};
use serde::Deserialize;
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

/// Id of the `<script type="application/json">` element holding overrides.
pub const CONFIG_ELEMENT_ID: &str = "concept-map-config";

/// Settings for one concept-map editor.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct MapConfig {
	/// Endpoint that turns `{ "topic": ... }` into a graph.
	pub endpoint: String,
	/// Box that generated nodes without coordinates are scattered into.
	pub scatter: ScatterBounds,
	/// Where the root concept of a manual map is placed.
	pub root_position: (f64, f64),
	/// Defaults for concepts added from the toolbar.
	pub new_node: NewNodeConfig,
	/// Canvas height in CSS pixels when the component has no explicit height.
	pub canvas_height: f64,
}

impl Default for MapConfig {
	fn default() -> Self {
		Self {
			endpoint: "/api/generate-map".into(),
			scatter: ScatterBounds::default(),
			root_position: (400.0, 300.0),
			new_node: NewNodeConfig::default(),
			canvas_height: 500.0,
		}
	}
}

/// Width and height of the random placement box, anchored at the origin.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct ScatterBounds {
	/// Largest generated `x`.
	pub width: f64,
	/// Largest generated `y`.
	pub height: f64,
}

impl Default for ScatterBounds {
	fn default() -> Self {
		Self {
			width: 800.0,
			height: 600.0,
		}
	}
}

/// Label, link label and position for newly added concepts.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct NewNodeConfig {
	/// Label of the added node.
	pub label: String,
	/// Label of the link from the root to it.
	pub link_label: String,
	/// Model-space position it is placed at.
	pub position: (f64, f64),
}

impl Default for NewNodeConfig {
	fn default() -> Self {
		Self {
			label: "New concept".into(),
			link_label: "related to".into(),
			position: (200.0, 200.0),
		}
	}
}

/// Parse a JSON override. Missing fields keep their defaults.
pub fn parse_config(json: &str) -> Result<MapConfig, serde_json::Error> {
	serde_json::from_str(json)
}

/// Load the configuration from the page, falling back to the defaults.
pub fn load_config() -> MapConfig {
	let Some(json) = config_element_text() else {
		return MapConfig::default();
	};
	match parse_config(&json) {
		Ok(config) => {
			info!("concept-map: loaded config, endpoint {}", config.endpoint);
			config
		}
		Err(e) => {
			warn!("concept-map: failed to parse config: {}", e);
			MapConfig::default()
		}
	}
}

fn config_element_text() -> Option<String> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id(CONFIG_ELEMENT_ID)?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	script.text().ok()
}
