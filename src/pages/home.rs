use leptos::prelude::*;

use crate::components::concept_map::ConceptMapCanvas;
use crate::config::load_config;

const DEFAULT_TOPIC: &str = "Algebra";

/// Study page: pick a topic, explore its concept map.
#[component]
pub fn Home() -> impl IntoView {
	let config = load_config();
	let (draft, set_draft) = signal(String::from(DEFAULT_TOPIC));
	let (topic, set_topic) = signal(String::from(DEFAULT_TOPIC));

	let on_submit = move |ev: leptos::ev::SubmitEvent| {
		ev.prevent_default();
		let next = draft.get_untracked().trim().to_owned();
		if !next.is_empty() && next != topic.get_untracked() {
			set_topic.set(next);
		}
	};

	view! {
		<div class="study-page">
			<form class="topic-search" on:submit=on_submit>
				<input
					type="text"
					placeholder="Search a topic"
					prop:value=draft
					on:input=move |ev| set_draft.set(event_target_value(&ev))
				/>
				<button type="submit">"Study"</button>
			</form>
			<h2>{move || topic.get()}</h2>
			<ConceptMapCanvas topic=topic config=config />
			<p class="subtitle">"Drag concepts to reposition. Scroll to zoom. Click a concept to see or edit it."</p>
		</div>
	}
}
