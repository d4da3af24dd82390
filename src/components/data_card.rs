use leptos::prelude::*;

use crate::data::stellar::{StellarObject, format_distance, format_magnitude, format_temperature};

/// Summary card for one catalog entry.
#[component]
pub fn DataCard(
	object: &'static StellarObject,
	#[prop(into, default = Signal::stored(false))] is_selected: Signal<bool>,
	#[prop(optional, into)] on_click: Option<Callback<String>>,
) -> impl IntoView {
	let class = move || {
		if is_selected.get() {
			"data-card data-card--selected"
		} else {
			"data-card"
		}
	};
	let handle_click = move |_: leptos::ev::MouseEvent| {
		if let Some(cb) = on_click {
			cb.run(object.id.to_owned());
		}
	};

	view! {
		<div class=class on:click=handle_click>
			<header class="data-card__header">
				<div>
					<h3 class="data-card__title">{object.name}</h3>
					<p class="data-card__kind">
						<span class="data-card__icon">{object.kind.icon()}</span>
						<span>{object.kind.display_name()}</span>
					</p>
				</div>
				<div
					class="data-card__swatch"
					style=format!("background-color: {};", object.color)
				/>
			</header>
			<dl class="data-card__facts">
				<div>
					<dt>"Distance"</dt>
					<dd>{format_distance(object.distance_ly)}</dd>
				</div>
				<div>
					<dt>"Temperature"</dt>
					<dd>{format_temperature(object.temperature_k)}</dd>
				</div>
				<div>
					<dt>"Magnitude"</dt>
					<dd>{format_magnitude(object.magnitude)}</dd>
				</div>
				<div>
					<dt>"Connections"</dt>
					<dd>{object.connections.len()}</dd>
				</div>
			</dl>
			<p class="data-card__description">{object.description}</p>
		</div>
	}
}
