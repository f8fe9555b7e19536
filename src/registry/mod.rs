//! Registry data, graph construction and selection state.
//!
//! Everything here is plain Rust with no browser dependency; the canvas
//! components in `components` only read from it.

mod graph;
mod selection;
mod table;

pub use graph::{
	Edge, LayoutConfig, Node, NodeId, RegistryGraph, Relationship, department_position,
};
pub use selection::{
	CONNECTION_PREVIEW, Connection, ConnectionSummary, Direction, SelectionState, Viewport,
	connections,
};
pub use table::{
	CategoryKind, RegistryCategory, RegistryItem, RegistryTable, Status, sample_table,
};
