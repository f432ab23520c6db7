//! Where graphs come from: the generation endpoint, or a one-node manual map.

use std::collections::HashSet;

use gloo_net::http::Request;
use log::{debug, warn};
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::state::MapMode;
use super::types::{Axis, ConceptGraph, ConceptLink, ConceptNode};
use crate::config::{MapConfig, ScatterBounds};

/// Why a generated map could not be used.
#[derive(Debug, Error)]
pub enum SourceError {
	/// The request never got an answer.
	#[error("request failed: {0}")]
	Transport(#[from] gloo_net::Error),

	/// Non-success HTTP status.
	#[error("server answered with status {0}")]
	Status(u16),

	/// Body is not a concept map.
	#[error("malformed concept map: {0}")]
	Malformed(#[from] serde_json::Error),
}

#[derive(Serialize)]
struct MapRequest<'a> {
	topic: &'a str,
}

#[derive(Deserialize)]
struct MapResponse {
	nodes: Vec<ConceptNode>,
	#[serde(default)]
	links: Vec<ConceptLink>,
}

/// Ask the generation endpoint for a map of `topic`.
pub async fn fetch_concept_map(endpoint: &str, topic: &str) -> Result<ConceptGraph, SourceError> {
	debug!("concept-map: requesting map for {:?} from {}", topic, endpoint);
	let response = Request::post(endpoint)
		.header("Accept", "application/json")
		.json(&MapRequest { topic })?
		.send()
		.await?;
	if !response.ok() {
		return Err(SourceError::Status(response.status()));
	}
	let body = response.text().await?;
	parse_map_response(&body)
}

/// Parse a map body. Generated JSON is sometimes wrapped in a markdown code
/// fence, which is stripped first. A body without `nodes` is rejected.
///
/// Node ids must be unique; a node repeating an earlier id is dropped.
pub fn parse_map_response(body: &str) -> Result<ConceptGraph, SourceError> {
	let json = body.replace("```json", "").replace("```", "");
	let MapResponse { mut nodes, links } = serde_json::from_str(json.trim())?;
	let mut seen = HashSet::new();
	nodes.retain(|node| {
		let first = seen.insert(node.id.clone());
		if !first {
			warn!("concept-map: dropping node with duplicate id {:?}", node.id);
		}
		first
	});
	Ok(ConceptGraph::from_parts(nodes, links))
}

/// Place every node that arrived without coordinates uniformly at random
/// inside `bounds`.
pub fn scatter_missing_positions(graph: &mut ConceptGraph, bounds: ScatterBounds, rng: &mut impl Rng) {
	graph.fill_missing_positions(|axis| {
		let extent = match axis {
			Axis::X => bounds.width,
			Axis::Y => bounds.height,
		};
		rng.gen_range(0.0..extent.max(f64::MIN_POSITIVE))
	});
}

/// Turn the outcome of a fetch into the graph to show. Failures fall back to
/// the manual map so the editor always has something to display.
pub fn resolve_fetch(
	result: Result<ConceptGraph, SourceError>,
	topic: &str,
	config: &MapConfig,
	rng: &mut impl Rng,
) -> (ConceptGraph, MapMode) {
	match result {
		Ok(mut graph) => {
			scatter_missing_positions(&mut graph, config.scatter, rng);
			(graph, MapMode::Ai)
		}
		Err(e) => {
			warn!("concept-map: generating map for {:?} failed: {}", topic, e);
			(manual_map(topic, config), MapMode::Manual)
		}
	}
}

/// The one-node map for `topic`, rooted at the configured position.
pub fn manual_map(topic: &str, config: &MapConfig) -> ConceptGraph {
	ConceptGraph::manual(topic, config.root_position)
}
