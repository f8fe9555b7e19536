use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::state::{NODE_RADIUS, RegistryGraphState, SELECTED_RADIUS};
use crate::registry::{Node, NodeId};

const BACKGROUND: &str = "#000000";
const EDGE_RGB: &str = "68, 68, 68";
const EDGE_HIGHLIGHT_RGB: &str = "170, 170, 170";
const SELECTED_COLOR: &str = "#FFD700";
const BORDER_COLOR: &str = "white";
const TITLE: &str = "Enterprise Registry Network Visualization";
const HINT: &str = "Click on nodes to center the view and see details";

fn ease_out_cubic(t: f64) -> f64 {
	1.0 - (1.0 - t).powi(3)
}

pub fn render(state: &RegistryGraphState, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str(BACKGROUND);
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
	draw_edges(state, ctx);
	draw_nodes(state, ctx);
	draw_chrome(state, ctx);
	draw_tooltip(state, ctx);
}

const ARROW_SIZE: f64 = 7.0;

/// Screen geometry of one edge.
#[derive(Clone, Copy, Debug, PartialEq)]
struct EdgeShape {
	start: (f64, f64),
	end: (f64, f64),
	/// Tip and the two back corners; absent when the markers leave no room.
	arrow: Option<[(f64, f64); 3]>,
}

/// Line between two markers, trimmed to their rims when there is space for
/// the arrowhead. Shorter edges run centre to centre without one, so the line
/// still shows between the markers. Coincident endpoints give `None`.
fn edge_shape(
	(x1, y1): (f64, f64),
	(x2, y2): (f64, f64),
	source_radius: f64,
	target_radius: f64,
) -> Option<EdgeShape> {
	let (dx, dy) = (x2 - x1, y2 - y1);
	let dist = (dx * dx + dy * dy).sqrt();
	if dist < 0.001 {
		return None;
	}
	if dist <= source_radius + target_radius + ARROW_SIZE {
		return Some(EdgeShape {
			start: (x1, y1),
			end: (x2, y2),
			arrow: None,
		});
	}

	let (ux, uy) = (dx / dist, dy / dist);
	let (tip_x, tip_y) = (x2 - ux * target_radius, y2 - uy * target_radius);
	let (back_x, back_y) = (tip_x - ux * ARROW_SIZE, tip_y - uy * ARROW_SIZE);
	let (px, py) = (-uy * ARROW_SIZE * 0.5, ux * ARROW_SIZE * 0.5);
	Some(EdgeShape {
		start: (x1 + ux * source_radius, y1 + uy * source_radius),
		end: (back_x, back_y),
		arrow: Some([
			(tip_x, tip_y),
			(back_x + px, back_y + py),
			(back_x - px, back_y - py),
		]),
	})
}

fn marker_radius(state: &RegistryGraphState, id: NodeId) -> f64 {
	if state.is_selected(id) {
		SELECTED_RADIUS
	} else {
		NODE_RADIUS
	}
}

fn draw_edges(state: &RegistryGraphState, ctx: &CanvasRenderingContext2d) {
	let t = ease_out_cubic(state.hover.highlight_t);

	state.graph.visit_edges(|n1, n2, _| {
		let Some(shape) = edge_shape(
			state.transform.to_screen(n1.x() as f64, n1.y() as f64),
			state.transform.to_screen(n2.x() as f64, n2.y() as f64),
			marker_radius(state, n1.data.user_data.id),
			marker_radius(state, n2.data.user_data.id),
		) else {
			return;
		};

		let is_highlighted = state.is_highlighted(n1.index()) && state.is_highlighted(n2.index());

		// t=0: every edge at base; t=1: highlighted edges bright, the rest faded
		let (rgb, alpha, width) = if is_highlighted {
			(EDGE_HIGHLIGHT_RGB, 0.4 + 0.6 * t, 1.0 + 0.5 * t)
		} else {
			(EDGE_RGB, 1.0 - 0.6 * t, 1.0)
		};

		ctx.set_stroke_style_str(&format!("rgba({}, {})", rgb, alpha));
		ctx.set_line_width(width);
		ctx.begin_path();
		ctx.move_to(shape.start.0, shape.start.1);
		ctx.line_to(shape.end.0, shape.end.1);
		ctx.stroke();

		if let Some([tip, left, right]) = shape.arrow {
			ctx.set_fill_style_str(&format!("rgba({}, {})", rgb, alpha));
			ctx.begin_path();
			ctx.move_to(tip.0, tip.1);
			ctx.line_to(left.0, left.1);
			ctx.line_to(right.0, right.1);
			ctx.close_path();
			ctx.fill();
		}
	});
}

fn draw_marker(
	ctx: &CanvasRenderingContext2d,
	(x, y): (f64, f64),
	radius: f64,
	color: &str,
	label: &str,
	alpha: f64,
) {
	ctx.set_global_alpha(alpha);
	ctx.begin_path();
	let _ = ctx.arc(x, y, radius, 0.0, 2.0 * PI);
	ctx.set_fill_style_str(color);
	ctx.fill();
	ctx.set_stroke_style_str(BORDER_COLOR);
	ctx.set_line_width(2.0);
	ctx.stroke();

	ctx.set_fill_style_str(color);
	ctx.set_font("11px monospace");
	ctx.set_text_align("center");
	let _ = ctx.fill_text(label, x, y - radius - 5.0);
	ctx.set_text_align("start");
	ctx.set_global_alpha(1.0);
}

fn draw_nodes(state: &RegistryGraphState, ctx: &CanvasRenderingContext2d) {
	let (has_highlight, t) = (
		state.has_active_highlight(),
		ease_out_cubic(state.hover.highlight_t),
	);

	// Faded pass, then highlighted nodes on top, then the selection above all
	state.graph.visit_nodes(|node| {
		let info = &node.data.user_data;
		if (has_highlight && state.is_highlighted(node.index())) || state.is_selected(info.id) {
			return;
		}
		let pos = state.transform.to_screen(node.x() as f64, node.y() as f64);
		draw_marker(ctx, pos, NODE_RADIUS, info.color, &info.label, 1.0 - 0.7 * t);
	});

	if has_highlight {
		state.graph.visit_nodes(|node| {
			let info = &node.data.user_data;
			if !state.is_highlighted(node.index()) || state.is_selected(info.id) {
				return;
			}
			let (x, y) = state.transform.to_screen(node.x() as f64, node.y() as f64);
			let radius = if state.is_hovered(node.index()) {
				NODE_RADIUS * (1.0 + 0.3 * t)
			} else {
				NODE_RADIUS * (1.0 + 0.1 * t)
			};

			if state.is_hovered(node.index()) && t > 0.01 {
				let glow = radius * (1.8 + 1.2 * t);
				if let Ok(gradient) = ctx.create_radial_gradient(x, y, radius * 0.3, x, y, glow) {
					let _ = gradient.add_color_stop(0.0, &format!("rgba(255, 255, 255, {})", 0.35 * t));
					let _ = gradient.add_color_stop(1.0, "rgba(255, 255, 255, 0)");
					ctx.begin_path();
					let _ = ctx.arc(x, y, glow, 0.0, 2.0 * PI);
					#[allow(deprecated)]
					ctx.set_fill_style(&gradient);
					ctx.fill();
				}
			}

			draw_marker(ctx, (x, y), radius, info.color, &info.label, 1.0);
		});
	}

	state.graph.visit_nodes(|node| {
		let info = &node.data.user_data;
		if !state.is_selected(info.id) {
			return;
		}
		let pos = state.transform.to_screen(node.x() as f64, node.y() as f64);
		draw_marker(ctx, pos, SELECTED_RADIUS, SELECTED_COLOR, &info.label, 1.0);
	});
}

/// Title, legend and hint in screen space.
fn draw_chrome(state: &RegistryGraphState, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str("white");
	ctx.set_font("16px sans-serif");
	let _ = ctx.fill_text(TITLE, 8.0, 20.0);

	ctx.set_font("12px sans-serif");
	let legend_x = state.width - 170.0;
	for (i, (category, color)) in state.registry.categories().into_iter().enumerate() {
		let y = 20.0 + 18.0 * i as f64;
		ctx.begin_path();
		let _ = ctx.arc(legend_x, y - 4.0, 5.0, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(color);
		ctx.fill();
		ctx.set_fill_style_str("white");
		let _ = ctx.fill_text(category, legend_x + 12.0, y);
	}

	ctx.set_fill_style_str("gray");
	let _ = ctx.fill_text(HINT, 8.0, state.height - 8.0);
}

fn tooltip_lines(node: &Node) -> [String; 5] {
	[
		node.name.clone(),
		format!("Category: {}", node.category),
		format!("Department: {}", node.department),
		format!("Status: {}", node.status),
		format!("Version: {}", node.version),
	]
}

fn draw_tooltip(state: &RegistryGraphState, ctx: &CanvasRenderingContext2d) {
	let t = ease_out_cubic(state.hover.highlight_t);
	if t < 0.01 {
		return;
	}
	let Some(node) = state.hovered_node() else {
		return;
	};

	let lines = tooltip_lines(node);
	let (line_height, pad) = (15.0, 6.0);
	let chars = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);
	let (w, h) = (
		chars as f64 * 7.0 + 2.0 * pad,
		lines.len() as f64 * line_height + 2.0 * pad,
	);
	let (nx, ny) = state.transform.to_screen(node.x, node.y);
	// Flip to the other side near the right/bottom edges
	let x = if nx + 14.0 + w > state.width { nx - 14.0 - w } else { nx + 14.0 };
	let y = if ny + h > state.height { state.height - h } else { ny };

	ctx.set_global_alpha(t);
	ctx.set_fill_style_str("rgba(20, 20, 20, 0.92)");
	ctx.fill_rect(x, y, w, h);
	ctx.set_stroke_style_str(node.color);
	ctx.set_line_width(1.0);
	ctx.stroke_rect(x, y, w, h);

	ctx.set_font("12px monospace");
	for (i, line) in lines.iter().enumerate() {
		ctx.set_fill_style_str(if i == 0 { node.color } else { "white" });
		let _ = ctx.fill_text(line, x + pad, y + pad + line_height * (i as f64 + 0.8));
	}
	ctx.set_global_alpha(1.0);
}

#[cfg(test)]
mod tests {
	use rand::SeedableRng;
	use rand::rngs::StdRng;

	use super::*;
	use crate::registry::{LayoutConfig, RegistryGraph, SelectionState, sample_table};

	#[test]
	fn long_edge_gets_trimmed_line_and_arrow() {
		let shape = edge_shape((0.0, 0.0), (100.0, 0.0), NODE_RADIUS, NODE_RADIUS).unwrap();
		assert_eq!(shape.start, (NODE_RADIUS, 0.0));
		assert_eq!(shape.end, (100.0 - NODE_RADIUS - ARROW_SIZE, 0.0));
		let [tip, _, _] = shape.arrow.unwrap();
		assert_eq!(tip, (100.0 - NODE_RADIUS, 0.0));
	}

	#[test]
	fn short_edge_still_drawn_without_arrow() {
		let shape = edge_shape((0.0, 0.0), (12.0, 5.0), NODE_RADIUS, SELECTED_RADIUS).unwrap();
		assert_eq!(shape.start, (0.0, 0.0));
		assert_eq!(shape.end, (12.0, 5.0));
		assert!(shape.arrow.is_none());
	}

	#[test]
	fn coincident_endpoints_are_skipped() {
		assert!(edge_shape((3.0, 3.0), (3.0, 3.0), NODE_RADIUS, NODE_RADIUS).is_none());
	}

	#[test]
	fn every_built_edge_is_drawn_in_the_overview() {
		let table = sample_table();
		let config = LayoutConfig::default();
		for seed in 0..200 {
			let graph = RegistryGraph::build(&table, &config, &mut StdRng::seed_from_u64(seed));
			let state =
				RegistryGraphState::new(&graph, &config, SelectionState::default(), 800.0, 500.0);
			// Positions go through f32 the same way the canvas graph stores them
			let screen = |id: NodeId| {
				let node = &graph.nodes[id];
				state
					.transform
					.to_screen(node.x as f32 as f64, node.y as f32 as f64)
			};
			for edge in &graph.edges {
				let shape = edge_shape(
					screen(edge.source),
					screen(edge.target),
					marker_radius(&state, edge.source),
					marker_radius(&state, edge.target),
				);
				assert!(shape.is_some(), "seed {} edge {:?}", seed, edge);
			}
		}
	}
}
