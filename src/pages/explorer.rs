use leptos::prelude::*;
use log::info;

use crate::components::data_card::DataCard;
use crate::components::stellar_graph::StellarGraphCanvas;
use crate::data::stellar;

/// Full-window stellar graph with the selected object's details on top.
#[component]
pub fn Explorer() -> impl IntoView {
	let graph_data = Signal::derive(stellar::graph_data);
	let (selected, set_selected) = signal(None::<String>);

	let select = Callback::new(move |id: String| {
		info!("showing details for {id}");
		set_selected.set(Some(id));
	});

	let selected_object = move || selected.get().and_then(|id| stellar::find(&id));

	view! {
		<ErrorBoundary fallback=|errors| {
			view! {
				<h1>"Uh oh! Something went wrong!"</h1>

				<p>"Errors: "</p>
				<ul>
					{move || {
						errors
							.get()
							.into_iter()
							.map(|(_, e)| view! { <li>{e.to_string()}</li> })
							.collect_view()
					}}
				</ul>
			}
		}>

			<div class="fullscreen-graph">
				<StellarGraphCanvas
					data=graph_data
					selected=selected
					on_select=select
					fullscreen=true
				/>
				<div class="graph-overlay">
					<h1>"Stellar Data Stream"</h1>
					<p class="subtitle">"Click a body to inspect it and its connections."</p>
					{move || match selected_object() {
						Some(object) => {
							view! {
								<div class="detail">
									<DataCard object=object is_selected=true />
									<button on:click=move |_| set_selected.set(None)>"Clear"</button>
									<div class="connections">
										{stellar::connected(object.id)
											.into_iter()
											.map(|neighbour| {
												view! { <DataCard object=neighbour on_click=select /> }
											})
											.collect_view()}
									</div>
								</div>
							}
								.into_any()
						}
						None => view! { <p class="hint">"Nothing selected yet."</p> }.into_any(),
					}}
				</div>
			</div>
		</ErrorBoundary>
	}
}
