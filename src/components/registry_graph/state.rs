use std::collections::HashSet;

use force_graph::{DefaultNodeIdx, EdgeData, ForceGraph, NodeData, SimulationParameters};

use super::scale::ViewTransform;
use crate::registry::{LayoutConfig, Node, NodeId, RegistryGraph, SelectionState, Viewport};

/// Marker radius in pixels (15px diameter).
pub const NODE_RADIUS: f64 = 7.5;
/// Selected marker radius in pixels (20px diameter).
pub const SELECTED_RADIUS: f64 = 10.0;
/// Click and hover tolerance around a marker centre, in pixels.
pub const HIT_RADIUS: f64 = 12.0;

/// Fraction of the remaining distance the view covers per second.
const RECENTER_SPEED: f64 = 6.0;

#[derive(Clone, Debug)]
pub struct NodeInfo {
	pub id: NodeId,
	pub label: String,
	pub color: &'static str,
}

#[derive(Clone, Debug, Default)]
pub struct HoverState {
	pub node: Option<DefaultNodeIdx>,
	pub neighbors: HashSet<DefaultNodeIdx>,
	pub highlight_t: f64,
	pub prev_node: Option<DefaultNodeIdx>,
	pub prev_neighbors: HashSet<DefaultNodeIdx>,
	delay_t: f64,
}

/// Canvas-side view of one registry build.
///
/// Every node is an anchor, so the layout computed by the builder is what gets
/// drawn; the simulation graph is only used for storage and traversal.
pub struct RegistryGraphState {
	pub graph: ForceGraph<NodeInfo, ()>,
	pub registry: RegistryGraph,
	pub config: LayoutConfig,
	pub selected: Option<NodeId>,
	pub transform: ViewTransform,
	pub target: ViewTransform,
	pub hover: HoverState,
	pub width: f64,
	pub height: f64,
	indices: Vec<DefaultNodeIdx>,
	edges: Vec<(DefaultNodeIdx, DefaultNodeIdx)>,
}

impl RegistryGraphState {
	pub fn new(
		registry: &RegistryGraph,
		config: &LayoutConfig,
		selection: SelectionState,
		width: f64,
		height: f64,
	) -> Self {
		let mut graph = ForceGraph::new(SimulationParameters {
			force_charge: 0.0,
			force_spring: 0.0,
			force_max: 0.0,
			node_speed: 0.0,
			damping_factor: 1.0,
		});
		let mut indices = Vec::with_capacity(registry.nodes.len());
		let mut edges = Vec::with_capacity(registry.edges.len());

		for node in &registry.nodes {
			let idx = graph.add_node(NodeData {
				x: node.x as f32,
				y: node.y as f32,
				mass: 10.0,
				is_anchor: true,
				user_data: NodeInfo {
					id: node.id,
					label: node.name.clone(),
					color: node.color,
				},
			});
			indices.push(idx);
		}

		for edge in &registry.edges {
			if let (Some(&src), Some(&tgt)) = (indices.get(edge.source), indices.get(edge.target)) {
				graph.add_edge(src, tgt, EdgeData::default());
				edges.push((src, tgt));
			}
		}

		let mut state = Self {
			graph,
			registry: registry.clone(),
			config: config.clone(),
			selected: None,
			transform: ViewTransform::default(),
			target: ViewTransform::default(),
			hover: HoverState::default(),
			width,
			height,
			indices,
			edges,
		};
		state.set_selected(selection.selected);
		state.transform = state.target;
		state
	}

	/// Follow a new selection; the view eases towards the implied viewport.
	pub fn set_selected(&mut self, selected: Option<NodeId>) {
		self.selected = selected.filter(|&id| id < self.indices.len());
		self.retarget();
	}

	fn retarget(&mut self) {
		let selection = SelectionState {
			selected: self.selected,
		};
		let viewport = Viewport::for_selection(&self.registry, &selection, &self.config);
		self.target = ViewTransform::fit(&viewport, self.width, self.height);
	}

	/// Node under the screen position, with its registry id.
	pub fn node_at_position(&self, sx: f64, sy: f64) -> Option<(DefaultNodeIdx, NodeId)> {
		let mut found = None;
		self.graph.visit_nodes(|node| {
			let (nx, ny) = self.transform.to_screen(node.x() as f64, node.y() as f64);
			// Hit radius is in screen space; markers don't scale with the view
			if (nx - sx).hypot(ny - sy) < HIT_RADIUS {
				found = Some((node.index(), node.data.user_data.id));
			}
		});
		found
	}

	pub fn is_selected(&self, id: NodeId) -> bool {
		self.selected == Some(id)
	}

	pub fn hovered_node(&self) -> Option<&Node> {
		let idx = self.hover.node.or(self.hover.prev_node)?;
		let id = self.indices.iter().position(|&i| i == idx)?;
		self.registry.node(id)
	}

	pub fn set_hover(&mut self, node: Option<DefaultNodeIdx>) {
		if self.hover.node == node {
			return;
		}
		let was_hovering = self.hover.node.is_some();

		// Keep the old highlight around while it fades out
		if was_hovering && node.is_none() {
			self.hover.prev_node = self.hover.node.take();
			self.hover.prev_neighbors = std::mem::take(&mut self.hover.neighbors);
		} else {
			self.hover.prev_node = None;
			self.hover.prev_neighbors.clear();
		}

		self.hover.node = node;
		self.hover.neighbors.clear();

		if let Some(idx) = node {
			if !was_hovering {
				self.hover.delay_t = 0.0;
			}
			for &(src, tgt) in &self.edges {
				if src == idx {
					self.hover.neighbors.insert(tgt);
				} else if tgt == idx {
					self.hover.neighbors.insert(src);
				}
			}
		}
	}

	pub fn is_highlighted(&self, idx: DefaultNodeIdx) -> bool {
		self.hover.node == Some(idx)
			|| self.hover.neighbors.contains(&idx)
			|| self.hover.prev_node == Some(idx)
			|| self.hover.prev_neighbors.contains(&idx)
	}

	pub fn is_hovered(&self, idx: DefaultNodeIdx) -> bool {
		self.hover.node == Some(idx) || self.hover.prev_node == Some(idx)
	}

	pub fn has_active_highlight(&self) -> bool {
		self.hover.node.is_some() || self.hover.prev_node.is_some()
	}

	pub fn tick(&mut self, dt: f64) {
		self.transform.approach(&self.target, RECENTER_SPEED * dt);

		let (target, delay, speed) = if self.hover.node.is_some() {
			(1.0, 0.08, 1.8)
		} else {
			(0.0, 0.0, 1.26)
		};

		if self.hover.node.is_some() {
			self.hover.delay_t = (self.hover.delay_t + dt).min(delay);
			if self.hover.delay_t >= delay {
				self.hover.highlight_t += (target - self.hover.highlight_t) * speed * dt;
			}
		} else {
			self.hover.highlight_t += (target - self.hover.highlight_t) * speed * dt;
			if self.hover.highlight_t < 0.01 {
				self.hover.highlight_t = 0.0;
				self.hover.prev_node = None;
				self.hover.prev_neighbors.clear();
			}
		}
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
		self.retarget();
		self.transform = self.target;
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::registry::{CategoryKind, Edge, Relationship, Status};

	fn node(id: NodeId, name: &str, x: f64, y: f64) -> Node {
		Node {
			id,
			name: name.into(),
			category: "Agents".into(),
			kind: CategoryKind::Agent,
			department: "IT".into(),
			status: Status::Active,
			version: "v1".into(),
			x,
			y,
			color: CategoryKind::Agent.color(),
		}
	}

	fn registry() -> RegistryGraph {
		RegistryGraph {
			nodes: vec![
				node(0, "A", 0.0, 0.0),
				node(1, "B", 1.0, 1.0),
				node(2, "C", 2.0, 0.0),
			],
			edges: vec![
				Edge {
					source: 0,
					target: 1,
					relationship: Relationship::ConnectsTo,
				},
				Edge {
					source: 1,
					target: 2,
					relationship: Relationship::DependsOn,
				},
			],
		}
	}

	fn state(selection: SelectionState) -> RegistryGraphState {
		RegistryGraphState::new(&registry(), &LayoutConfig::default(), selection, 800.0, 500.0)
	}

	#[test]
	fn starts_on_the_overview() {
		let s = state(SelectionState::default());
		let overview = Viewport::for_selection(
			&s.registry,
			&SelectionState::default(),
			&LayoutConfig::default(),
		);
		assert_eq!(s.transform, ViewTransform::fit(&overview, 800.0, 500.0));
		assert_eq!(s.transform, s.target);
	}

	#[test]
	fn click_position_resolves_node_id() {
		let s = state(SelectionState::default());
		let (sx, sy) = s.transform.to_screen(1.0, 1.0);
		let (_, id) = s.node_at_position(sx + 2.0, sy - 2.0).unwrap();
		assert_eq!(id, 1);
		assert!(s.node_at_position(sx + 200.0, sy).is_none());
	}

	#[test]
	fn selection_retargets_the_view() {
		let mut s = state(SelectionState::default());
		s.set_selected(Some(2));
		assert!(s.is_selected(2));
		assert_eq!(
			s.target,
			ViewTransform::fit(&Viewport::around(2.0, 0.0, 1.5), 800.0, 500.0)
		);
		assert_ne!(s.transform, s.target);

		for _ in 0..600 {
			s.tick(0.016);
		}
		let (cx, cy) = s.transform.to_screen(2.0, 0.0);
		assert!((cx - 400.0).abs() < 1e-3 && (cy - 250.0).abs() < 1e-3);
	}

	#[test]
	fn unknown_selection_falls_back_to_overview() {
		let overview = ViewTransform::fit(
			&Viewport::for_selection(&registry(), &SelectionState::default(), &LayoutConfig::default()),
			800.0,
			500.0,
		);
		let mut s = state(SelectionState { selected: Some(9) });
		assert_eq!(s.selected, None);
		assert_eq!(s.target, overview);

		s.set_selected(Some(1));
		assert_ne!(s.target, overview);
		s.set_selected(Some(9));
		assert_eq!(s.selected, None);
		assert_eq!(s.target, overview);
		assert!(!s.is_selected(1));
	}

	#[test]
	fn hover_collects_neighbors() {
		let mut s = state(SelectionState::default());
		let (sx, sy) = s.transform.to_screen(1.0, 1.0);
		let (idx, _) = s.node_at_position(sx, sy).unwrap();
		s.set_hover(Some(idx));
		assert_eq!(s.hover.neighbors.len(), 2);
		assert_eq!(s.hovered_node().map(|n| n.name.as_str()), Some("B"));

		s.set_hover(None);
		assert!(s.has_active_highlight());
		assert!(s.is_highlighted(idx));
		for _ in 0..600 {
			s.tick(0.016);
		}
		assert!(!s.has_active_highlight());
	}
}
