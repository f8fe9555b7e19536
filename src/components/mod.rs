pub mod node_details;
pub mod registry_graph;
pub mod registry_list;
