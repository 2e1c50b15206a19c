use displaydoc::Display;

/// Conditions raised by graph queries and flow algorithms.
///
/// Infeasibility of a balance flow is deliberately *not* represented here;
/// it is a regular outcome of the min-cost-flow strategies and lives in
/// [`crate::algo::min_cost_flow::BFlow`].
#[derive(Clone, Copy, Debug, Display, PartialEq, Eq)]
pub enum Error {
    /// vertex value not present in the graph
    UnknownVertex,
    /// the requested pair of vertices is not connected by an edge
    NotConnected,
    /// operation requires a directed graph
    NotDirected,
    /// operation requires an undirected graph
    NotUndirected,
    /// negative edge weight in a graph that requires non-negative weights
    NegativeEdgeWeight,
    /// a negative cycle makes the requested shortest path unbounded
    NegativeCycle,
    /// target vertex is not reachable from the source vertex
    Unreachable,
}

impl std::error::Error for Error {}
