use leptos::prelude::*;
use web_sys::MouseEvent;

use crate::components::node_details::NodeDetails;
use crate::components::registry_graph::RegistryGraphCanvas;
use crate::components::registry_list::RegistryList;
use crate::registry::{LayoutConfig, RegistryGraph, SelectionState, sample_table};

/// Registry list on the left, network and selection details on the right.
#[component]
pub fn Home() -> impl IntoView {
	let config = LayoutConfig::default();
	let table = sample_table();
	// One build per page session; layout and cross-links differ between sessions
	let graph = StoredValue::new(RegistryGraph::build(&table, &config, &mut rand::rng()));
	let table = StoredValue::new(table);
	let selection = RwSignal::new(SelectionState::default());

	let reset = move |_: MouseEvent| selection.update(SelectionState::reset);

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

			<div class="registry-page">
				<div class="registry-column">
					<RegistryList table=table graph=graph selection=selection />
				</div>
				<div class="graph-column">
					<h3>"🌐 Network Visualization"</h3>
					<div class="graph-frame">
						<RegistryGraphCanvas
							graph=graph
							selection=selection
							config=config.clone()
							height=Some(500.0)
						/>
					</div>
					<NodeDetails graph=graph selection=selection />
					<button class="reset-button" on:click=reset>
						"🔄 Reset View"
					</button>
				</div>
			</div>
		</ErrorBoundary>
	}
}
