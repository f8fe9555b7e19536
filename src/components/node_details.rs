use leptos::prelude::*;

use crate::registry::{ConnectionSummary, RegistryGraph, SelectionState};

/// Details of the selected node and its first few connections.
#[component]
pub fn NodeDetails(
	graph: StoredValue<RegistryGraph>,
	selection: RwSignal<SelectionState>,
) -> impl IntoView {
	let details = move || {
		let selected = selection.get();
		graph.with_value(|g| {
			let node = selected.node(g)?;
			let summary = ConnectionSummary::of(g, node.id);
			let connections = (summary.total > 0).then(|| {
				let lines = summary
					.preview
					.iter()
					.map(|c| view! { <p class="caption">{c.caption()}</p> })
					.collect_view();
				view! {
					<p>
						<b>"Connections: "</b>
						{format!("{} items", summary.total)}
					</p>
					{lines}
				}
			});

			Some(view! {
				<div class="node-info">
					<h3>{format!("🎯 Selected: {}", node.name)}</h3>
					<div class="info-columns">
						<div>
							<p><b>"Category: "</b>{node.category.clone()}</p>
							<p><b>"Department: "</b>{node.department.clone()}</p>
						</div>
						<div>
							<p><b>"Status: "</b>{node.status.to_string()}</p>
							<p><b>"Version: "</b>{node.version.clone()}</p>
						</div>
					</div>
					{connections}
				</div>
			})
		})
	};

	view! { {details} }
}
