use log::warn;
use web_sys::CanvasRenderingContext2d;

use super::state::ConceptMapState;
use super::types::PALETTE;

const LINK_COLOR: &str = "#94a3b8";
const LINK_LABEL_COLOR: &str = "#64748b";
const LINK_LABEL_FONT: &str = "11px sans-serif";
const LINK_LABEL_LIFT: f64 = 5.0;
const NODE_FONT: &str = "13px sans-serif";
const SELECTED_NODE_FONT: &str = "bold 14px sans-serif";
const NODE_PADDING: f64 = 10.0;
const NODE_HEIGHT: f64 = 30.0;
const NODE_CORNER: f64 = 5.0;
const NODE_TEXT_COLOR: &str = "#fff";
const SELECTED_OUTLINE: &str = "#000";

/// Vertical alignment for [`Surface::text`]: centred inside node boxes,
/// baseline-aligned for link labels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextBaseline {
	/// Text sits on `y`.
	Alphabetic,
	/// Text is centred on `y`.
	Middle,
}

/// The 2D drawing operations the renderer needs.
pub trait Surface {
	/// Erase everything.
	fn clear(&mut self);
	/// CSS font used by later `measure_text` and `text` calls.
	fn set_font(&mut self, font: &str);
	/// Width of `text` in pixels with the current font.
	fn measure_text(&self, text: &str) -> f64;
	/// Stroke a one-pixel straight line.
	fn line(&mut self, from: (f64, f64), to: (f64, f64), color: &str);
	/// Fill and outline a rectangle with rounded corners.
	#[allow(clippy::too_many_arguments)]
	fn rounded_rect(
		&mut self,
		x: f64,
		y: f64,
		width: f64,
		height: f64,
		radius: f64,
		fill: &str,
		stroke: &str,
		line_width: f64,
	);
	/// Draw text horizontally centred on `x`.
	fn text(&mut self, text: &str, x: f64, y: f64, color: &str, baseline: TextBaseline);
}

/// Paint the whole map. Links first so nodes sit on top of them.
pub fn render(state: &ConceptMapState, surface: &mut impl Surface) {
	surface.clear();
	draw_links(state, surface);
	draw_nodes(state, surface);
}

fn draw_links(state: &ConceptMapState, surface: &mut impl Surface) {
	let (graph, vp) = (&state.graph, &state.viewport);
	for link in graph.links() {
		let (Some(source), Some(target)) =
			(graph.position_of(&link.source), graph.position_of(&link.target))
		else {
			continue;
		};
		let (sx, sy) = vp.to_screen(source.0, source.1);
		let (tx, ty) = vp.to_screen(target.0, target.1);
		surface.line((sx, sy), (tx, ty), LINK_COLOR);

		surface.set_font(LINK_LABEL_FONT);
		let (mx, my) = ((sx + tx) / 2.0, (sy + ty) / 2.0);
		surface.text(
			&link.label,
			mx,
			my - LINK_LABEL_LIFT,
			LINK_LABEL_COLOR,
			TextBaseline::Alphabetic,
		);
	}
}

fn draw_nodes(state: &ConceptMapState, surface: &mut impl Surface) {
	let selected = state.selected_id();
	for (i, node) in state.graph.nodes().iter().enumerate() {
		let Some((x, y)) = node.position() else {
			continue;
		};
		let (x, y) = state.viewport.to_screen(x, y);
		let is_selected = selected == Some(node.id.as_str());

		surface.set_font(if is_selected { SELECTED_NODE_FONT } else { NODE_FONT });
		let width = surface.measure_text(&node.label) + NODE_PADDING * 2.0;
		let fill = node
			.color
			.as_deref()
			.unwrap_or(PALETTE[i % PALETTE.len()]);
		let (stroke, line_width) = if is_selected {
			(SELECTED_OUTLINE, 2.0)
		} else {
			(fill, 1.0)
		};
		surface.rounded_rect(
			x - width / 2.0,
			y - NODE_HEIGHT / 2.0,
			width,
			NODE_HEIGHT,
			NODE_CORNER,
			fill,
			stroke,
			line_width,
		);
		surface.text(&node.label, x, y, NODE_TEXT_COLOR, TextBaseline::Middle);
	}
}

/// Browser canvas target. Sized in CSS pixels.
pub struct CanvasSurface<'a> {
	ctx: &'a CanvasRenderingContext2d,
	width: f64,
	height: f64,
}

impl<'a> CanvasSurface<'a> {
	/// Paint onto `ctx`, whose canvas is `width` by `height` pixels.
	pub fn new(ctx: &'a CanvasRenderingContext2d, width: f64, height: f64) -> Self {
		Self { ctx, width, height }
	}
}

impl Surface for CanvasSurface<'_> {
	fn clear(&mut self) {
		self.ctx.clear_rect(0.0, 0.0, self.width, self.height);
	}

	fn set_font(&mut self, font: &str) {
		self.ctx.set_font(font);
	}

	fn measure_text(&self, text: &str) -> f64 {
		match self.ctx.measure_text(text) {
			Ok(metrics) => metrics.width(),
			Err(e) => {
				warn!("concept-map: measure_text failed: {:?}", e);
				0.0
			}
		}
	}

	fn line(&mut self, from: (f64, f64), to: (f64, f64), color: &str) {
		self.ctx.begin_path();
		self.ctx.move_to(from.0, from.1);
		self.ctx.line_to(to.0, to.1);
		self.ctx.set_stroke_style_str(color);
		self.ctx.set_line_width(1.0);
		self.ctx.stroke();
	}

	fn rounded_rect(
		&mut self,
		x: f64,
		y: f64,
		width: f64,
		height: f64,
		radius: f64,
		fill: &str,
		stroke: &str,
		line_width: f64,
	) {
		let ctx = self.ctx;
		let r = radius.min(width / 2.0).min(height / 2.0);
		ctx.begin_path();
		ctx.move_to(x + r, y);
		ctx.line_to(x + width - r, y);
		ctx.quadratic_curve_to(x + width, y, x + width, y + r);
		ctx.line_to(x + width, y + height - r);
		ctx.quadratic_curve_to(x + width, y + height, x + width - r, y + height);
		ctx.line_to(x + r, y + height);
		ctx.quadratic_curve_to(x, y + height, x, y + height - r);
		ctx.line_to(x, y + r);
		ctx.quadratic_curve_to(x, y, x + r, y);
		ctx.close_path();
		ctx.set_fill_style_str(fill);
		ctx.fill();
		ctx.set_stroke_style_str(stroke);
		ctx.set_line_width(line_width);
		ctx.stroke();
	}

	fn text(&mut self, text: &str, x: f64, y: f64, color: &str, baseline: TextBaseline) {
		self.ctx.set_fill_style_str(color);
		self.ctx.set_text_align("center");
		self.ctx.set_text_baseline(match baseline {
			TextBaseline::Alphabetic => "alphabetic",
			TextBaseline::Middle => "middle",
		});
		let _ = self.ctx.fill_text(text, x, y);
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::concept_map::state::MapMode;
	use crate::components::concept_map::types::{ConceptGraph, ConceptLink, ConceptNode};
	use crate::components::concept_map::viewport::Viewport;

	#[derive(Clone, Debug, PartialEq)]
	enum Op {
		Clear,
		Line((f64, f64), (f64, f64)),
		Rect {
			x: f64,
			width: f64,
			fill: String,
			stroke: String,
			line_width: f64,
		},
		Text(String, f64, f64, String),
	}

	/// Records draw calls; every glyph is 7px wide.
	#[derive(Default)]
	struct Recorder {
		ops: Vec<Op>,
		font: String,
	}

	impl Surface for Recorder {
		fn clear(&mut self) {
			self.ops.push(Op::Clear);
		}

		fn set_font(&mut self, font: &str) {
			self.font = font.into();
		}

		fn measure_text(&self, text: &str) -> f64 {
			let glyph = if self.font.starts_with("bold") { 8.0 } else { 7.0 };
			text.chars().count() as f64 * glyph
		}

		fn line(&mut self, from: (f64, f64), to: (f64, f64), _color: &str) {
			self.ops.push(Op::Line(from, to));
		}

		fn rounded_rect(
			&mut self,
			x: f64,
			_y: f64,
			width: f64,
			_height: f64,
			_radius: f64,
			fill: &str,
			stroke: &str,
			line_width: f64,
		) {
			self.ops.push(Op::Rect {
				x,
				width,
				fill: fill.into(),
				stroke: stroke.into(),
				line_width,
			});
		}

		fn text(&mut self, text: &str, x: f64, y: f64, color: &str, _baseline: TextBaseline) {
			self.ops.push(Op::Text(text.into(), x, y, color.into()));
		}
	}

	fn node(id: &str, x: f64, y: f64) -> ConceptNode {
		ConceptNode {
			id: id.into(),
			label: id.into(),
			x: Some(x),
			y: Some(y),
			color: None,
			details: None,
		}
	}

	fn link(source: &str, target: &str) -> ConceptLink {
		ConceptLink {
			source: source.into(),
			target: target.into(),
			label: "rel".into(),
		}
	}

	fn state(nodes: Vec<ConceptNode>, links: Vec<ConceptLink>) -> ConceptMapState {
		let mut state = ConceptMapState::default();
		state.replace_graph(ConceptGraph::from_parts(nodes, links), MapMode::Ai);
		state
	}

	fn lines(ops: &[Op]) -> Vec<&Op> {
		ops.iter().filter(|op| matches!(op, Op::Line(..))).collect()
	}

	#[test]
	fn dangling_link_draws_nothing() {
		let state = state(
			vec![node("main", 0.0, 0.0)],
			vec![link("main", "ghost"), link("ghost", "main")],
		);
		let mut surface = Recorder::default();
		render(&state, &mut surface);

		assert!(lines(&surface.ops).is_empty());
		assert!(!surface.ops.iter().any(|op| matches!(op, Op::Text(t, ..) if t == "rel")));
		assert_eq!(surface.ops.iter().filter(|op| matches!(op, Op::Rect { .. })).count(), 1);
	}

	#[test]
	fn link_is_drawn_through_viewport_with_label_above_midpoint() {
		let mut state = state(
			vec![node("a", 10.0, 10.0), node("b", 110.0, 60.0)],
			vec![link("a", "b")],
		);
		state.viewport = Viewport::new(2.0, 5.0, 0.0);
		let mut surface = Recorder::default();
		render(&state, &mut surface);

		assert_eq!(surface.ops[1], Op::Line((25.0, 20.0), (225.0, 120.0)));
		assert_eq!(
			surface.ops[2],
			Op::Text("rel".into(), 125.0, 65.0, LINK_LABEL_COLOR.into())
		);
	}

	#[test]
	fn nodes_sized_by_label_and_colored_by_order() {
		let mut colored = node("main", 100.0, 100.0);
		colored.color = Some("#123456".into());
		let state = state(vec![colored, node("second", 300.0, 100.0)], Vec::new());
		let mut surface = Recorder::default();
		render(&state, &mut surface);

		let rects: Vec<_> = surface
			.ops
			.iter()
			.filter(|op| matches!(op, Op::Rect { .. }))
			.collect();
		assert_eq!(
			rects[0],
			&Op::Rect {
				x: 100.0 - (28.0 + 20.0) / 2.0,
				width: 28.0 + 20.0,
				fill: "#123456".into(),
				stroke: "#123456".into(),
				line_width: 1.0,
			}
		);
		assert_eq!(
			rects[1],
			&Op::Rect {
				x: 300.0 - (42.0 + 20.0) / 2.0,
				width: 42.0 + 20.0,
				fill: PALETTE[1].into(),
				stroke: PALETTE[1].into(),
				line_width: 1.0,
			}
		);
	}

	#[test]
	fn selected_node_is_outlined_in_bold() {
		let mut state = state(vec![node("main", 100.0, 100.0)], Vec::new());
		state.pointer_down(100.0, 100.0);
		let mut surface = Recorder::default();
		render(&state, &mut surface);

		assert_eq!(
			surface.ops[1],
			Op::Rect {
				x: 100.0 - (32.0 + 20.0) / 2.0,
				width: 32.0 + 20.0,
				fill: PALETTE[0].into(),
				stroke: SELECTED_OUTLINE.into(),
				line_width: 2.0,
			}
		);
		assert_eq!(
			surface.ops[2],
			Op::Text("main".into(), 100.0, 100.0, NODE_TEXT_COLOR.into())
		);
	}

	#[test]
	fn unplaced_nodes_are_skipped() {
		let mut floating = node("floating", 0.0, 0.0);
		floating.y = None;
		let state = state(vec![floating, node("b", 1.0, 1.0)], vec![link("floating", "b")]);
		let mut surface = Recorder::default();
		render(&state, &mut surface);
		assert!(lines(&surface.ops).is_empty());
		assert_eq!(surface.ops.iter().filter(|op| matches!(op, Op::Rect { .. })).count(), 1);
	}

	#[test]
	fn rendering_is_repeatable() {
		let state = state(
			vec![node("main", 400.0, 300.0), node("node2", 200.0, 200.0)],
			vec![link("main", "node2")],
		);
		let (mut first, mut second) = (Recorder::default(), Recorder::default());
		render(&state, &mut first);
		render(&state, &mut second);
		assert_eq!(first.ops, second.ops);
	}
}
