//! Minimum cost flow over balance graphs.
//!
//! Vertices declare how much flow they emit (positive balance) or absorb
//! (negative balance); edges offer capacity at a per-unit cost. Both
//! strategies leave the computed flow on the graph and answer with a
//! [`BFlow`]: balances that cannot be satisfied are a regular outcome of
//! the problem, not an error.

use crate::error::Error;
use crate::graph::{Graph, VertexValue};
use crate::weight::SignedWeight;

pub mod cycle_canceling;
pub mod successive_shortest_path;

/// Outcome of a min-cost-flow computation.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum BFlow<W> {
    /// Every balance is satisfied and no cheaper flow exists.
    Optimal { cost: W },
    /// The balances cannot be satisfied with the given capacities. Edge
    /// flows are left in whatever intermediate state the strategy reached.
    Infeasible,
}

/// The minimum cost flow algorithm, chosen at runtime.
pub trait MinCostFlow<V, W> {
    /// Runs the algorithm over `graph`, leaving the flow on its edges.
    fn min_cost_flow(&self, graph: &mut Graph<V, W>) -> Result<BFlow<W>, Error>;
}

#[derive(Default)]
pub struct CycleCanceling;

impl<V, W> MinCostFlow<V, W> for CycleCanceling
where
    V: VertexValue,
    W: SignedWeight,
{
    fn min_cost_flow(&self, graph: &mut Graph<V, W>) -> Result<BFlow<W>, Error> {
        cycle_canceling::min_cost_flow(graph)
    }
}

#[derive(Default)]
pub struct SuccessiveShortestPath;

impl<V, W> MinCostFlow<V, W> for SuccessiveShortestPath
where
    V: VertexValue,
    W: SignedWeight,
{
    fn min_cost_flow(&self, graph: &mut Graph<V, W>) -> Result<BFlow<W>, Error> {
        successive_shortest_path::min_cost_flow(graph)
    }
}

/// Total cost of the flow currently on the graph, `sum(flow * cost)`.
pub fn flow_cost<V, W>(graph: &Graph<V, W>) -> W
where
    V: VertexValue,
    W: SignedWeight,
{
    graph.edge_ids().fold(W::zero(), |total, edge| {
        total + graph.flow(edge) * graph.cost(edge)
    })
}
