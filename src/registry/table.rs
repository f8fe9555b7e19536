//! The embedded registry table: categories of registered items.

use std::fmt;

/// Lifecycle status of a registered item.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Status {
	/// In production use.
	Active,
	/// Being evaluated before rollout.
	Testing,
	/// Temporarily degraded or under maintenance.
	Maintenance,
	/// Scheduled for removal.
	Deprecated,
}

impl Status {
	/// Short marker shown next to the item in the side list.
	pub fn marker(self) -> &'static str {
		match self {
			Self::Active => "✅",
			Self::Testing => "⚠️",
			Self::Maintenance => "🔧",
			Self::Deprecated => "❌",
		}
	}
}

impl fmt::Display for Status {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(match self {
			Self::Active => "Active",
			Self::Testing => "Testing",
			Self::Maintenance => "Maintenance",
			Self::Deprecated => "Deprecated",
		})
	}
}

/// What role a category's items play in the synthetic relationship model.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CategoryKind {
	/// AI applications; each one uses a platform.
	Application,
	/// Model platforms.
	Platform,
	/// Agents; each one connects to a server.
	Agent,
	/// MCP servers.
	Server,
	/// Anything else. Only takes part in random cross-links.
	Other,
}

impl CategoryKind {
	/// Node colour for items of this kind.
	pub fn color(self) -> &'static str {
		match self {
			Self::Application => "#00ff00",
			Self::Platform => "#ffb000",
			Self::Agent => "#00ffff",
			Self::Server => "#ff00ff",
			Self::Other => "#7f7f7f",
		}
	}
}

/// A single registered item.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegistryItem {
	/// Display name, unique within its category.
	pub name: String,
	/// Lifecycle status.
	pub status: Status,
	/// Owning department; drives the layout position.
	pub department: String,
	/// Free-form version string.
	pub version: String,
}

impl RegistryItem {
	/// Build an item from borrowed parts.
	pub fn new(name: &str, status: Status, department: &str, version: &str) -> Self {
		Self {
			name: name.into(),
			status,
			department: department.into(),
			version: version.into(),
		}
	}
}

/// A named category and its items, in display order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegistryCategory {
	/// Display name, also used as the node's category.
	pub name: String,
	/// Relationship role of the items.
	pub kind: CategoryKind,
	/// Items in table order.
	pub items: Vec<RegistryItem>,
}

/// Ordered category → items table.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RegistryTable {
	/// Categories in table order.
	pub categories: Vec<RegistryCategory>,
}

impl RegistryTable {
	/// Append a category, returning the table for chaining.
	pub fn with_category(
		mut self,
		name: &str,
		kind: CategoryKind,
		items: Vec<RegistryItem>,
	) -> Self {
		self.categories.push(RegistryCategory {
			name: name.into(),
			kind,
			items,
		});
		self
	}

	/// Number of items across all categories.
	pub fn total_items(&self) -> usize {
		self.categories.iter().map(|c| c.items.len()).sum()
	}

	/// Number of items whose status is [`Status::Active`].
	pub fn active_items(&self) -> usize {
		self.categories
			.iter()
			.flat_map(|c| &c.items)
			.filter(|item| item.status == Status::Active)
			.count()
	}
}

/// The enterprise sample registry shown by the app.
pub fn sample_table() -> RegistryTable {
	use Status::*;

	RegistryTable::default()
		.with_category(
			"AI Applications",
			CategoryKind::Application,
			vec![
				RegistryItem::new("Customer Service Bot", Active, "Support", "v2.1"),
				RegistryItem::new("Fraud Detection AI", Active, "Finance", "v1.8"),
				RegistryItem::new("Document Analyzer", Maintenance, "Legal", "v3.0"),
				RegistryItem::new("Recommendation Engine", Active, "Marketing", "v2.5"),
				RegistryItem::new("Quality Control AI", Active, "Manufacturing", "v1.3"),
				RegistryItem::new("Inventory Optimizer", Testing, "Supply Chain", "v2.0-beta"),
			],
		)
		.with_category(
			"Model Platforms",
			CategoryKind::Platform,
			vec![
				RegistryItem::new("Azure OpenAI Service", Active, "IT", "GPT-4"),
				RegistryItem::new("AWS SageMaker", Active, "Data Science", "Latest"),
				RegistryItem::new("Google Vertex AI", Active, "Research", "v2.0"),
				RegistryItem::new("IBM Watson", Deprecated, "Legacy", "v1.5"),
				RegistryItem::new("Hugging Face Hub", Active, "Research", "v4.21"),
			],
		)
		.with_category(
			"Agents",
			CategoryKind::Agent,
			vec![
				RegistryItem::new("Data Collection Agent", Active, "Analytics", "v1.2"),
				RegistryItem::new("Monitoring Agent", Active, "DevOps", "v2.0"),
				RegistryItem::new("Security Agent", Active, "Security", "v1.7"),
				RegistryItem::new("Backup Agent", Active, "IT", "v3.1"),
				RegistryItem::new("Compliance Agent", Testing, "Compliance", "v1.0-beta"),
			],
		)
		.with_category(
			"MCP Servers",
			CategoryKind::Server,
			vec![
				RegistryItem::new("Central Auth Server", Active, "Security", "v2.3"),
				RegistryItem::new("Data Gateway", Active, "IT", "v1.9"),
				RegistryItem::new("API Gateway", Active, "Development", "v2.1"),
				RegistryItem::new("Message Broker", Maintenance, "Infrastructure", "v1.5"),
			],
		)
}
