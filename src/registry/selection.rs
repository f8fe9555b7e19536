//! Per-session selection, the viewport it implies, and connection summaries.

use log::debug;

use super::graph::{LayoutConfig, Node, NodeId, RegistryGraph, Relationship};

/// Connections listed in detail for the selected node.
pub const CONNECTION_PREVIEW: usize = 3;

/// Which node, if any, the session has selected.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SelectionState {
	/// Selected node id.
	pub selected: Option<NodeId>,
}

impl SelectionState {
	/// Select `id` if it exists in `graph`. Returns whether the state changed.
	pub fn select(&mut self, graph: &RegistryGraph, id: NodeId) -> bool {
		if graph.node(id).is_none() {
			debug!("Ignoring selection of unknown node {}", id);
			return false;
		}
		let changed = self.selected != Some(id);
		self.selected = Some(id);
		debug!("Selected node {}", id);
		changed
	}

	/// Select the node built from the side-list entry `(name, category)`.
	/// Unmatched entries leave the state as it was.
	pub fn select_item(&mut self, graph: &RegistryGraph, name: &str, category: &str) -> bool {
		match graph.find(name, category) {
			Some(node) => self.select(graph, node.id),
			None => {
				debug!("No node for {:?} in {:?}", name, category);
				false
			}
		}
	}

	/// Clear the selection.
	pub fn reset(&mut self) {
		self.selected = None;
	}

	/// The selected node, when it belongs to `graph`.
	pub fn node<'g>(&self, graph: &'g RegistryGraph) -> Option<&'g Node> {
		self.selected.and_then(|id| graph.node(id))
	}

	/// Whether `id` is the selected node.
	pub fn is_selected(&self, id: NodeId) -> bool {
		self.selected == Some(id)
	}
}

/// Visible layout-space range.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
	/// Left edge.
	pub x_min: f64,
	/// Right edge.
	pub x_max: f64,
	/// Bottom edge.
	pub y_min: f64,
	/// Top edge.
	pub y_max: f64,
}

impl Viewport {
	/// Square window of half-width `margin` centred on `(x, y)`.
	pub fn around(x: f64, y: f64, margin: f64) -> Self {
		Self {
			x_min: x - margin,
			x_max: x + margin,
			y_min: y - margin,
			y_max: y + margin,
		}
	}

	/// Range to show for `graph` given the current selection.
	///
	/// Focuses on the selected node, otherwise fits every node. An empty graph
	/// gets the unit square.
	pub fn for_selection(
		graph: &RegistryGraph,
		selection: &SelectionState,
		config: &LayoutConfig,
	) -> Self {
		if let Some(node) = selection.node(graph) {
			return Self::around(node.x, node.y, config.focus_margin);
		}
		match graph.bounds() {
			Some((x0, x1, y0, y1)) => Self {
				x_min: x0 - config.overview_margin,
				x_max: x1 + config.overview_margin,
				y_min: y0 - config.overview_margin,
				y_max: y1 + config.overview_margin,
			},
			None => Self {
				x_min: 0.0,
				x_max: 1.0,
				y_min: 0.0,
				y_max: 1.0,
			},
		}
	}

	/// Horizontal extent.
	pub fn width(&self) -> f64 {
		self.x_max - self.x_min
	}

	/// Vertical extent.
	pub fn height(&self) -> f64 {
		self.y_max - self.y_min
	}

	/// Centre point.
	pub fn center(&self) -> (f64, f64) {
		(
			(self.x_min + self.x_max) / 2.0,
			(self.y_min + self.y_max) / 2.0,
		)
	}
}

/// Edge direction relative to the selected node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
	/// The selected node is the source.
	Outgoing,
	/// The selected node is the target.
	Incoming,
}

impl Direction {
	/// Arrow shown before the partner's name.
	pub fn arrow(self) -> &'static str {
		match self {
			Self::Outgoing => "→",
			Self::Incoming => "←",
		}
	}
}

/// One edge seen from the selected node.
#[derive(Clone, Debug, PartialEq)]
pub struct Connection<'g> {
	/// Node on the other end.
	pub partner: &'g Node,
	/// Relationship label of the edge.
	pub relationship: Relationship,
	/// Whether the edge leaves or enters the selected node.
	pub direction: Direction,
}

impl Connection<'_> {
	/// One-line summary, e.g. `→ Data Gateway (connects_to)`.
	pub fn caption(&self) -> String {
		format!(
			"{} {} ({})",
			self.direction.arrow(),
			self.partner.name,
			self.relationship
		)
	}
}

/// Every edge touching `id`, in edge order.
pub fn connections(graph: &RegistryGraph, id: NodeId) -> Vec<Connection<'_>> {
	graph
		.edges
		.iter()
		.filter_map(|edge| {
			let (partner, direction) = if edge.source == id {
				(edge.target, Direction::Outgoing)
			} else if edge.target == id {
				(edge.source, Direction::Incoming)
			} else {
				return None;
			};
			Some(Connection {
				partner: graph.node(partner)?,
				relationship: edge.relationship,
				direction,
			})
		})
		.collect()
}

/// Total connection count and the first few, for the details panel.
#[derive(Clone, Debug, PartialEq)]
pub struct ConnectionSummary<'g> {
	/// Number of edges touching the node.
	pub total: usize,
	/// At most [`CONNECTION_PREVIEW`] connections, in edge order.
	pub preview: Vec<Connection<'g>>,
}

impl<'g> ConnectionSummary<'g> {
	/// Summarise the connections of `id`.
	pub fn of(graph: &'g RegistryGraph, id: NodeId) -> Self {
		let mut all = connections(graph, id);
		let total = all.len();
		all.truncate(CONNECTION_PREVIEW);
		Self {
			total,
			preview: all,
		}
	}
}

#[cfg(test)]
mod tests {
	use rand::SeedableRng;
	use rand::rngs::StdRng;

	use super::*;
	use crate::registry::graph::Edge;
	use crate::registry::table::{CategoryKind, Status, sample_table};

	fn node(id: NodeId, name: &str, x: f64, y: f64) -> Node {
		Node {
			id,
			name: name.into(),
			category: "X".into(),
			kind: CategoryKind::Other,
			department: "IT".into(),
			status: Status::Active,
			version: "v1".into(),
			x,
			y,
			color: CategoryKind::Other.color(),
		}
	}

	fn line_graph() -> RegistryGraph {
		RegistryGraph {
			nodes: vec![
				node(0, "A", 0.0, 0.0),
				node(1, "B", 2.0, 3.0),
				node(2, "C", 4.0, -1.0),
			],
			edges: vec![
				Edge {
					source: 0,
					target: 1,
					relationship: Relationship::Uses,
				},
				Edge {
					source: 1,
					target: 2,
					relationship: Relationship::DependsOn,
				},
			],
		}
	}

	#[test]
	fn select_present_node() {
		let graph = line_graph();
		let mut selection = SelectionState::default();
		assert!(selection.select(&graph, 1));
		assert_eq!(selection.selected, Some(1));
		assert!(!selection.select(&graph, 1));
		assert_eq!(selection.selected, Some(1));
	}

	#[test]
	fn select_absent_node_is_noop() {
		let graph = line_graph();
		let mut selection = SelectionState::default();
		assert!(!selection.select(&graph, 42));
		assert_eq!(selection.selected, None);

		selection.select(&graph, 0);
		assert!(!selection.select(&graph, 42));
		assert_eq!(selection.selected, Some(0));
	}

	#[test]
	fn reset_clears_any_state() {
		let graph = line_graph();
		let mut selection = SelectionState::default();
		selection.reset();
		assert_eq!(selection.selected, None);
		selection.select(&graph, 2);
		selection.reset();
		assert_eq!(selection.selected, None);
	}

	#[test]
	fn select_item_matches_name_and_category() {
		let graph = RegistryGraph::build(
			&sample_table(),
			&LayoutConfig::default(),
			&mut StdRng::seed_from_u64(3),
		);
		let mut selection = SelectionState::default();
		assert!(selection.select_item(&graph, "Backup Agent", "Agents"));
		let node = selection.node(&graph).unwrap();
		assert_eq!(node.name, "Backup Agent");

		assert!(!selection.select_item(&graph, "Backup Agent", "MCP Servers"));
		assert_eq!(selection.node(&graph).unwrap().name, "Backup Agent");
	}

	#[test]
	fn first_node_is_selectable() {
		let graph = line_graph();
		let mut selection = SelectionState::default();
		selection.select(&graph, 0);
		let viewport = Viewport::for_selection(&graph, &selection, &LayoutConfig::default());
		assert_eq!(viewport, Viewport::around(0.0, 0.0, 1.5));
	}

	#[test]
	fn viewport_focuses_selected_node() {
		let graph = line_graph();
		let mut selection = SelectionState::default();
		selection.select(&graph, 1);
		let viewport = Viewport::for_selection(&graph, &selection, &LayoutConfig::default());
		assert_eq!(viewport.x_min, 0.5);
		assert_eq!(viewport.x_max, 3.5);
		assert_eq!(viewport.y_min, 1.5);
		assert_eq!(viewport.y_max, 4.5);
	}

	#[test]
	fn viewport_fits_all_nodes_without_selection() {
		let graph = line_graph();
		let viewport =
			Viewport::for_selection(&graph, &SelectionState::default(), &LayoutConfig::default());
		assert_eq!(viewport.x_min, -0.5);
		assert_eq!(viewport.x_max, 4.5);
		assert_eq!(viewport.y_min, -1.5);
		assert_eq!(viewport.y_max, 3.5);
		assert_eq!(viewport.center(), (2.0, 1.0));
	}

	#[test]
	fn viewport_for_empty_graph() {
		let viewport = Viewport::for_selection(
			&RegistryGraph::default(),
			&SelectionState::default(),
			&LayoutConfig::default(),
		);
		assert_eq!(viewport.width(), 1.0);
		assert_eq!(viewport.height(), 1.0);
	}

	#[test]
	fn connections_carry_direction() {
		let graph = line_graph();
		let conns = connections(&graph, 1);
		assert_eq!(conns.len(), 2);
		assert_eq!(conns[0].direction, Direction::Incoming);
		assert_eq!(conns[0].partner.name, "A");
		assert_eq!(conns[0].caption(), "← A (uses)");
		assert_eq!(conns[1].direction, Direction::Outgoing);
		assert_eq!(conns[1].caption(), "→ C (depends_on)");
	}

	#[test]
	fn summary_previews_first_three() {
		let mut graph = line_graph();
		for target in [0, 2, 0] {
			graph.edges.push(Edge {
				source: 1,
				target,
				relationship: Relationship::DependsOn,
			});
		}
		let summary = ConnectionSummary::of(&graph, 1);
		assert_eq!(summary.total, 5);
		assert_eq!(summary.preview.len(), CONNECTION_PREVIEW);
		assert_eq!(summary.preview[0].partner.name, "A");
		assert_eq!(summary.preview[2].direction, Direction::Outgoing);
	}
}
