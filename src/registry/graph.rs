//! Builds the registry network: one node per item, synthetic edges between them.

use std::fmt;

use log::info;
use rand::Rng;
use rand::seq::IndexedRandom;

use super::table::{CategoryKind, RegistryTable, Status};

/// Dense node identifier, assigned in table order.
pub type NodeId = usize;

/// Base layout coordinate per department.
const DEPARTMENT_POSITIONS: &[(&str, (f64, f64))] = &[
	("Support", (0.0, 0.0)),
	("Finance", (1.0, 0.0)),
	("Legal", (2.0, 0.0)),
	("Marketing", (0.0, 1.0)),
	("Manufacturing", (1.0, 1.0)),
	("Supply Chain", (2.0, 1.0)),
	("IT", (0.0, 2.0)),
	("Data Science", (1.0, 2.0)),
	("Research", (2.0, 2.0)),
	("Legacy", (0.0, 3.0)),
	("Analytics", (1.0, 3.0)),
	("DevOps", (2.0, 3.0)),
	("Security", (0.0, 4.0)),
	("Compliance", (1.0, 4.0)),
	("Development", (2.0, 4.0)),
	("Infrastructure", (0.0, 5.0)),
];

/// Base coordinate for a known department.
pub fn department_position(department: &str) -> Option<(f64, f64)> {
	DEPARTMENT_POSITIONS
		.iter()
		.find(|(name, _)| *name == department)
		.map(|&(_, pos)| pos)
}

/// Tunables for node placement, cross-linking and the viewport.
#[derive(Clone, Debug, PartialEq)]
pub struct LayoutConfig {
	/// Maximum jitter applied on each axis around the department position.
	pub jitter: f64,
	/// Upper bound (exclusive) of the random x base for unknown departments.
	pub random_base_width: f64,
	/// Upper bound (exclusive) of the random y base for unknown departments.
	pub random_base_height: f64,
	/// Number of random `depends_on` pairs drawn; self-pairs are discarded.
	pub cross_links: usize,
	/// Half-width of the viewport around a selected node.
	pub focus_margin: f64,
	/// Padding around the bounding box when nothing is selected.
	pub overview_margin: f64,
}

impl Default for LayoutConfig {
	fn default() -> Self {
		Self {
			jitter: 0.3,
			random_base_width: 3.0,
			random_base_height: 5.0,
			cross_links: 5,
			focus_margin: 1.5,
			overview_margin: 0.5,
		}
	}
}

/// Synthetic relationship between two registry items.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Relationship {
	/// Application → platform.
	Uses,
	/// Agent → server.
	ConnectsTo,
	/// Random cross-link.
	DependsOn,
}

impl fmt::Display for Relationship {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(match self {
			Self::Uses => "uses",
			Self::ConnectsTo => "connects_to",
			Self::DependsOn => "depends_on",
		})
	}
}

/// A placed registry item.
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
	/// Index into [`RegistryGraph::nodes`].
	pub id: NodeId,
	/// Item name.
	pub name: String,
	/// Name of the category the item came from.
	pub category: String,
	/// Relationship role of the category.
	pub kind: CategoryKind,
	/// Owning department.
	pub department: String,
	/// Lifecycle status.
	pub status: Status,
	/// Version string.
	pub version: String,
	/// Layout x, in layout units.
	pub x: f64,
	/// Layout y, in layout units. Grows upwards.
	pub y: f64,
	/// Fill colour derived from the category kind.
	pub color: &'static str,
}

/// A directed relationship between two nodes of the same build.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Edge {
	/// Origin node.
	pub source: NodeId,
	/// Destination node.
	pub target: NodeId,
	/// Relationship label.
	pub relationship: Relationship,
}

/// Nodes and edges of one build. Node `i` has id `i`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RegistryGraph {
	/// Nodes in table order.
	pub nodes: Vec<Node>,
	/// Edges; duplicates between the same pair are allowed.
	pub edges: Vec<Edge>,
}

impl RegistryGraph {
	/// Place every item of `table` and generate synthetic edges.
	///
	/// Jitter, unknown-department bases and edge targets are drawn from `rng`,
	/// so a seeded generator gives a reproducible build.
	pub fn build<R: Rng>(
		table: &RegistryTable,
		config: &LayoutConfig,
		rng: &mut R,
	) -> Self {
		let mut nodes = Vec::with_capacity(table.total_items());

		for category in &table.categories {
			for item in &category.items {
				let (bx, by) = department_position(&item.department).unwrap_or_else(|| {
					(
						rng.random_range(0.0..config.random_base_width),
						rng.random_range(0.0..config.random_base_height),
					)
				});
				let (x, y) = (bx + jitter(rng, config.jitter), by + jitter(rng, config.jitter));

				nodes.push(Node {
					id: nodes.len(),
					name: item.name.clone(),
					category: category.name.clone(),
					kind: category.kind,
					department: item.department.clone(),
					status: item.status,
					version: item.version.clone(),
					x,
					y,
					color: category.kind.color(),
				});
			}
		}

		let mut edges = Vec::new();
		link_kinds(
			&nodes,
			CategoryKind::Application,
			CategoryKind::Platform,
			Relationship::Uses,
			rng,
			&mut edges,
		);
		link_kinds(
			&nodes,
			CategoryKind::Agent,
			CategoryKind::Server,
			Relationship::ConnectsTo,
			rng,
			&mut edges,
		);

		if !nodes.is_empty() {
			for _ in 0..config.cross_links {
				let (source, target) = (
					rng.random_range(0..nodes.len()),
					rng.random_range(0..nodes.len()),
				);
				if source != target {
					edges.push(Edge {
						source,
						target,
						relationship: Relationship::DependsOn,
					});
				}
			}
		}

		info!("Built registry graph: {} nodes, {} edges", nodes.len(), edges.len());
		Self { nodes, edges }
	}

	/// Node by id.
	pub fn node(&self, id: NodeId) -> Option<&Node> {
		self.nodes.get(id)
	}

	/// Resolve a side-list entry to its node by exact name and category.
	pub fn find(&self, name: &str, category: &str) -> Option<&Node> {
		self.nodes
			.iter()
			.find(|n| n.name == name && n.category == category)
	}

	/// Axis-aligned bounds `(min_x, max_x, min_y, max_y)`, `None` when empty.
	pub fn bounds(&self) -> Option<(f64, f64, f64, f64)> {
		let first = self.nodes.first()?;
		Some(self.nodes.iter().fold(
			(first.x, first.x, first.y, first.y),
			|(x0, x1, y0, y1), n| (x0.min(n.x), x1.max(n.x), y0.min(n.y), y1.max(n.y)),
		))
	}

	/// Category names and colours in first-seen order.
	pub fn categories(&self) -> Vec<(&str, &'static str)> {
		let mut seen: Vec<(&str, &'static str)> = Vec::new();
		for node in &self.nodes {
			if !seen.iter().any(|(name, _)| *name == node.category) {
				seen.push((node.category.as_str(), node.color));
			}
		}
		seen
	}
}

fn jitter<R: Rng>(rng: &mut R, amount: f64) -> f64 {
	if amount > 0.0 {
		rng.random_range(-amount..amount)
	} else {
		0.0
	}
}

/// Link every node of kind `from` to one random node of kind `to`.
fn link_kinds<R: Rng>(
	nodes: &[Node],
	from: CategoryKind,
	to: CategoryKind,
	relationship: Relationship,
	rng: &mut R,
	edges: &mut Vec<Edge>,
) {
	let targets: Vec<NodeId> = nodes.iter().filter(|n| n.kind == to).map(|n| n.id).collect();
	for node in nodes.iter().filter(|n| n.kind == from) {
		// No candidates means no edge, not a failed build.
		let Some(&target) = targets.choose(rng) else {
			return;
		};
		edges.push(Edge {
			source: node.id,
			target,
			relationship,
		});
	}
}

#[cfg(test)]
mod tests {
	use rand::SeedableRng;
	use rand::rngs::StdRng;

	use super::*;
	use crate::registry::table::{RegistryItem, sample_table};

	fn build(table: &RegistryTable, seed: u64) -> RegistryGraph {
		RegistryGraph::build(table, &LayoutConfig::default(), &mut StdRng::seed_from_u64(seed))
	}

	#[test]
	fn one_node_per_item() {
		let table = sample_table();
		for seed in 0..20 {
			let graph = build(&table, seed);
			assert_eq!(graph.nodes.len(), table.total_items());
			for (i, node) in graph.nodes.iter().enumerate() {
				assert_eq!(node.id, i);
			}
		}
	}

	#[test]
	fn edges_reference_valid_distinct_nodes() {
		let table = sample_table();
		for seed in 0..50 {
			let graph = build(&table, seed);
			for edge in &graph.edges {
				assert!(edge.source < graph.nodes.len());
				assert!(edge.target < graph.nodes.len());
				assert_ne!(edge.source, edge.target);
			}
		}
	}

	#[test]
	fn typed_edges_follow_category_roles() {
		let graph = build(&sample_table(), 7);
		let uses: Vec<_> = graph
			.edges
			.iter()
			.filter(|e| e.relationship == Relationship::Uses)
			.collect();
		let connects: Vec<_> = graph
			.edges
			.iter()
			.filter(|e| e.relationship == Relationship::ConnectsTo)
			.collect();
		let cross = graph.edges.len() - uses.len() - connects.len();

		assert_eq!(uses.len(), 6);
		assert_eq!(connects.len(), 5);
		assert!(cross <= LayoutConfig::default().cross_links);
		for e in uses {
			assert_eq!(graph.nodes[e.source].kind, CategoryKind::Application);
			assert_eq!(graph.nodes[e.target].kind, CategoryKind::Platform);
		}
		for e in connects {
			assert_eq!(graph.nodes[e.source].kind, CategoryKind::Agent);
			assert_eq!(graph.nodes[e.target].kind, CategoryKind::Server);
		}
	}

	#[test]
	fn single_category_table() {
		let table = RegistryTable::default().with_category(
			"X",
			CategoryKind::Other,
			vec![RegistryItem::new("A", Status::Active, "IT", "v1")],
		);
		let graph = build(&table, 1);
		assert_eq!(graph.nodes.len(), 1);
		assert_eq!(graph.nodes[0].category, "X");
		assert!(graph.edges.is_empty());
	}

	#[test]
	fn known_department_stays_within_jitter() {
		let graph = build(&sample_table(), 3);
		let config = LayoutConfig::default();
		for node in &graph.nodes {
			let (bx, by) = department_position(&node.department).unwrap();
			assert!((node.x - bx).abs() <= config.jitter);
			assert!((node.y - by).abs() <= config.jitter);
		}
	}

	#[test]
	fn unknown_department_gets_random_base() {
		let table = RegistryTable::default().with_category(
			"Misc",
			CategoryKind::Other,
			vec![RegistryItem::new("Orphan", Status::Testing, "Nowhere", "v0")],
		);
		let config = LayoutConfig::default();
		let graph = build(&table, 11);
		let node = &graph.nodes[0];
		assert!(node.x >= -config.jitter && node.x < config.random_base_width + config.jitter);
		assert!(node.y >= -config.jitter && node.y < config.random_base_height + config.jitter);
	}

	#[test]
	fn missing_targets_skip_typed_edges() {
		let table = RegistryTable::default().with_category(
			"AI Applications",
			CategoryKind::Application,
			vec![
				RegistryItem::new("Bot", Status::Active, "Support", "v1"),
				RegistryItem::new("Analyzer", Status::Active, "Legal", "v1"),
			],
		);
		let config = LayoutConfig {
			cross_links: 0,
			..LayoutConfig::default()
		};
		let graph = RegistryGraph::build(&table, &config, &mut StdRng::seed_from_u64(0));
		assert_eq!(graph.nodes.len(), 2);
		assert!(graph.edges.is_empty());
	}

	#[test]
	fn seeded_builds_are_reproducible() {
		let table = sample_table();
		assert_eq!(build(&table, 42), build(&table, 42));
	}

	#[test]
	fn find_requires_exact_name_and_category() {
		let graph = build(&sample_table(), 5);
		let node = graph.find("Data Gateway", "MCP Servers").unwrap();
		assert_eq!(node.department, "IT");
		assert!(graph.find("Data Gateway", "Agents").is_none());
		assert!(graph.find("data gateway", "MCP Servers").is_none());
	}

	#[test]
	fn categories_in_table_order() {
		let graph = build(&sample_table(), 9);
		let names: Vec<_> = graph.categories().into_iter().map(|(name, _)| name).collect();
		assert_eq!(
			names,
			["AI Applications", "Model Platforms", "Agents", "MCP Servers"]
		);
	}
}
