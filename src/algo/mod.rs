//! Graph algorithms over [`crate::graph::Graph`].
//!
//! The flow algorithms build short-lived `petgraph` views (residual graphs,
//! relaxation views) whose node indices mirror the vertex ids of the graph
//! they were derived from. The two helpers below encode that convention.

use petgraph::graph::NodeIndex;

use crate::graph::VertexId;

pub mod matching;
pub mod max_flow;
pub mod min_cost_flow;
pub mod residual;
pub mod search;
pub mod shortest_path;
pub mod spanning_tree;

pub(crate) fn node_index(vertex: VertexId) -> NodeIndex {
    NodeIndex::new(vertex.index())
}

pub(crate) fn vertex_id(node: NodeIndex) -> VertexId {
    VertexId(node.index())
}
