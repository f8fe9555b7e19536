use leptos::prelude::*;
use web_sys::MouseEvent;

use crate::registry::{RegistryCategory, RegistryGraph, RegistryTable, SelectionState};

/// Summary metrics plus one expandable section per category.
#[component]
pub fn RegistryList(
	table: StoredValue<RegistryTable>,
	graph: StoredValue<RegistryGraph>,
	selection: RwSignal<SelectionState>,
) -> impl IntoView {
	let (total, active) = table.with_value(|t| (t.total_items(), t.active_items()));
	let sections = table.with_value(|t| {
		t.categories
			.iter()
			.map(|category| {
				view! {
					<CategorySection category=category.clone() graph=graph selection=selection />
				}
			})
			.collect_view()
	});

	view! {
		<aside class="registry-list">
			<div class="main-header">
				<h2>"🏢 Enterprise Registry"</h2>
			</div>
			<div class="metrics">
				<div class="metric-card">
					<span class="metric-label">"Total Items"</span>
					<span class="metric-value">{total}</span>
				</div>
				<div class="metric-card">
					<span class="metric-label">"Active Items"</span>
					<span class="metric-value">{active}</span>
				</div>
			</div>
			<hr />
			{sections}
		</aside>
	}
}

#[component]
fn CategorySection(
	category: RegistryCategory,
	graph: StoredValue<RegistryGraph>,
	selection: RwSignal<SelectionState>,
) -> impl IntoView {
	let title = format!("📋 {} ({})", category.name, category.items.len());
	let name = category.name.clone();
	// Expanded while one of its items is selected
	let expanded = move || {
		let selected = selection.get();
		graph.with_value(|g| selected.node(g).is_some_and(|n| n.category == name))
	};

	let items = category
		.items
		.into_iter()
		.map(|item| {
			let label = format!("{} {}", item.status.marker(), item.name);
			let caption = format!("Dept: {} | Version: {}", item.department, item.version);
			let category_name = category.name.clone();
			let on_click = move |_: MouseEvent| {
				graph.with_value(|g| {
					selection.maybe_update(|s| s.select_item(g, &item.name, &category_name))
				});
			};
			view! {
				<div class="registry-item">
					<button class="item-button" on:click=on_click>
						{label}
					</button>
					<p class="caption">{caption}</p>
				</div>
			}
		})
		.collect_view();

	view! {
		<details class="registry-section" open=expanded>
			<summary>{title}</summary>
			{items}
		</details>
	}
}
