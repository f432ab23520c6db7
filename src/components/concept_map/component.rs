use leptos::html::Canvas;
use leptos::prelude::*;
use leptos::task::spawn_local;
use log::warn;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, WheelEvent};

use super::render::{self, CanvasSurface};
use super::source;
use super::state::{ConceptMapState, MapMode, PanelView};
use crate::config::MapConfig;

/// Interactive concept map for `topic`.
///
/// The map is regenerated whenever the topic changes, in whichever mode the
/// editor is currently in. Nodes can be dragged, the wheel zooms, and a
/// selected node's label and details can be edited below the canvas.
#[component]
pub fn ConceptMapCanvas(
	#[prop(into)] topic: Signal<String>,
	#[prop(default = MapConfig::default())] config: MapConfig,
	#[prop(default = None)] width: Option<f64>,
	#[prop(default = None)] height: Option<f64>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<Canvas>::new();
	let state = RwSignal::new(ConceptMapState::default());
	let config = StoredValue::new(config);
	let mode = Memo::new(move |_| state.with(|s| s.mode));
	let panel = Memo::new(move |_| state.with(ConceptMapState::panel_view));

	let load = move |mode: MapMode| {
		let topic = topic.get_untracked();
		match mode {
			MapMode::Manual => {
				let graph = config.with_value(|c| source::manual_map(&topic, c));
				state.update(|s| s.replace_graph(graph, MapMode::Manual));
			}
			MapMode::Ai => {
				state.update(|s| s.mode = MapMode::Ai);
				let config = config.get_value();
				spawn_local(async move {
					let result = source::fetch_concept_map(&config.endpoint, &topic).await;
					let (graph, mode) =
						source::resolve_fetch(result, &topic, &config, &mut rand::thread_rng());
					// No cancellation: the last fetch to complete wins.
					let _ = state.try_update(|s| s.replace_graph(graph, mode));
				});
			}
		}
	};

	Effect::new(move |_| {
		topic.track();
		load(state.with_untracked(|s| s.mode));
	});

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let (w, h) = (
			width.unwrap_or_else(|| {
				canvas
					.parent_element()
					.map(|p| p.client_width() as f64)
					.filter(|w| *w > 0.0)
					.unwrap_or(800.0)
			}),
			height.unwrap_or_else(|| config.with_value(|c| c.canvas_height)),
		);
		if canvas.width() != w as u32 {
			canvas.set_width(w as u32);
		}
		if canvas.height() != h as u32 {
			canvas.set_height(h as u32);
		}

		let Some(ctx) = canvas
			.get_context("2d")
			.ok()
			.flatten()
			.and_then(|ctx| ctx.dyn_into::<CanvasRenderingContext2d>().ok())
		else {
			warn!("concept-map: canvas has no 2d context");
			return;
		};
		state.with(|s| render::render(s, &mut CanvasSurface::new(&ctx, w, h)));
	});

	let on_mousedown = move |ev: MouseEvent| {
		if let Some((x, y)) = canvas_point(canvas_ref, &ev) {
			state.update(|s| s.pointer_down(x, y));
		}
	};

	let on_mousemove = move |ev: MouseEvent| {
		if state.with_untracked(|s| s.gesture().drag_target().is_none()) {
			return;
		}
		if let Some((x, y)) = canvas_point(canvas_ref, &ev) {
			state.update(|s| s.pointer_move(x, y));
		}
	};

	let on_release = move |_: MouseEvent| {
		if state.with_untracked(|s| s.gesture().drag_target().is_some()) {
			state.update(|s| s.pointer_up());
		}
	};

	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		state.update(|s| s.wheel(ev.delta_y()));
	};

	let mode_class = move |wanted: MapMode| {
		if mode.get() == wanted {
			"concept-map-button active"
		} else {
			"concept-map-button"
		}
	};

	view! {
		<div class="concept-map">
			<div class="concept-map-toolbar">
				<button class=move || mode_class(MapMode::Ai) on:click=move |_| load(MapMode::Ai)>
					"AI Map"
				</button>
				<button class=move || mode_class(MapMode::Manual) on:click=move |_| load(MapMode::Manual)>
					"Manual Map"
				</button>
				<button
					class="concept-map-button"
					on:click=move |_| {
						let new_node = config.with_value(|c| c.new_node.clone());
						state.update(|s| s.add_concept(&new_node));
					}
				>
					"Add concept"
				</button>
				{move || {
					matches!(panel.get(), PanelView::Details { .. })
						.then(|| {
							view! {
								<button class="concept-map-button" on:click=move |_| state.update(|s| s.begin_edit())>
									"Edit"
								</button>
							}
						})
				}}
			</div>
			<canvas
				node_ref=canvas_ref
				class="concept-map-canvas"
				on:mousedown=on_mousedown
				on:mousemove=on_mousemove
				on:mouseup=on_release
				on:mouseleave=on_release
				on:wheel=on_wheel
				style="display: block; cursor: grab;"
			/>
			{move || match panel.get() {
				PanelView::Empty => ().into_any(),
				PanelView::Details { label, details } => {
					view! {
						<div class="concept-map-details">
							<h3>{label}</h3>
							{details.map(|d| view! { <p>{d}</p> })}
						</div>
					}
						.into_any()
				}
				PanelView::Editing => {
					let (label, details) = state
						.with_untracked(|s| {
							s.edit_session().map(|e| (e.label.clone(), e.details.clone()))
						})
						.unwrap_or_default();
					view! {
						<div class="concept-map-edit">
							<label>
								"Label"
								<input
									type="text"
									prop:value=label
									on:input=move |ev| state.update(|s| s.set_edit_label(event_target_value(&ev)))
								/>
							</label>
							<label>
								"Details"
								<input
									type="text"
									prop:value=details
									on:input=move |ev| {
										state.update(|s| s.set_edit_details(event_target_value(&ev)))
									}
								/>
							</label>
							<button class="concept-map-button" on:click=move |_| state.update(|s| s.save_edit())>
								"Save changes"
							</button>
						</div>
					}
						.into_any()
				}
			}}
		</div>
	}
}

/// Pointer position relative to the canvas' top-left corner.
fn canvas_point(canvas_ref: NodeRef<Canvas>, ev: &MouseEvent) -> Option<(f64, f64)> {
	let canvas: HtmlCanvasElement = canvas_ref.get()?.into();
	let rect = canvas.get_bounding_client_rect();
	Some((
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	))
}
