//! Residual graphs over flow-carrying directed graphs.
//!
//! Every augmenting-path and cycle-canceling step in this crate runs on a
//! residual view rather than on the graph itself. The view is a fresh
//! `petgraph` digraph whose node indices mirror the vertex ids of the
//! underlying graph, so positions translate back and forth without lookup
//! tables.

use petgraph::graph::{DiGraph, EdgeIndex};

use crate::algo::node_index;
use crate::error::Error;
use crate::graph::{EdgeId, Graph, VertexValue};
use crate::weight::{cmp_weights, SignedWeight, Weight};

/// Orientation of a residual arc relative to the edge it mirrors.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum EdgeDirection {
    /// The arc points along the mirrored edge; pushing over it raises flow.
    Forward,
    /// The arc points against the mirrored edge; pushing cancels flow.
    Backward,
}

/// One arc of a residual graph.
#[derive(Copy, Clone, Debug)]
pub struct ResidualArc<W> {
    /// How much additional flow the arc admits.
    pub residual: W,
    /// Cost per unit of flow, negated on backward arcs.
    pub cost: W,
    pub direction: EdgeDirection,
    /// The edge of the underlying graph this arc manipulates.
    pub mirror: EdgeId,
}

/// Residual view of a directed graph, rebuilt after every flow change.
pub struct ResidualGraph<W> {
    arcs: DiGraph<(), ResidualArc<W>>,
}

impl<W> ResidualGraph<W>
where
    W: Weight,
{
    /// Builds the residual graph of `graph`, ignoring edge costs.
    ///
    /// An edge contributes a forward arc while `weight - flow` is positive
    /// and a backward arc while its flow is positive; arcs with zero
    /// residual capacity are left out entirely.
    pub fn build<V: VertexValue>(graph: &Graph<V, W>) -> Result<Self, Error> {
        Self::build_inner(graph, |_| (W::zero(), W::zero()))
    }

    /// Builds the residual graph with costs carried over: forward arcs
    /// inherit the edge cost, backward arcs carry its negation.
    pub fn build_with_costs<V: VertexValue>(graph: &Graph<V, W>) -> Result<Self, Error>
    where
        W: SignedWeight,
    {
        Self::build_inner(graph, |cost| (cost, -cost))
    }

    fn build_inner<V: VertexValue>(
        graph: &Graph<V, W>,
        costs: impl Fn(W) -> (W, W),
    ) -> Result<Self, Error> {
        if !graph.is_directed() {
            return Err(Error::NotDirected);
        }
        let mut arcs = DiGraph::with_capacity(graph.vertex_count(), 2 * graph.edge_count());
        for _ in graph.vertex_ids() {
            arcs.add_node(());
        }
        for edge in graph.edge_ids() {
            let (origin, target) = graph.endpoints(edge);
            let flow = graph.flow(edge);
            let remaining = graph.weight(edge) - flow;
            debug_assert!(
                flow >= W::zero() && remaining >= W::zero(),
                "flow {flow:?} outside the capacity bounds of edge {edge:?}"
            );
            let (forward_cost, backward_cost) = costs(graph.cost(edge));
            if remaining > W::zero() {
                arcs.add_edge(
                    node_index(origin),
                    node_index(target),
                    ResidualArc {
                        residual: remaining,
                        cost: forward_cost,
                        direction: EdgeDirection::Forward,
                        mirror: edge,
                    },
                );
            }
            if flow > W::zero() {
                arcs.add_edge(
                    node_index(target),
                    node_index(origin),
                    ResidualArc {
                        residual: flow,
                        cost: backward_cost,
                        direction: EdgeDirection::Backward,
                        mirror: edge,
                    },
                );
            }
        }
        log::trace!(
            "residual graph: {} arcs over {} vertices",
            arcs.edge_count(),
            arcs.node_count()
        );
        Ok(Self { arcs })
    }

    /// The underlying arc store, for algorithms that traverse it directly.
    pub fn digraph(&self) -> &DiGraph<(), ResidualArc<W>> {
        &self.arcs
    }

    pub fn arc(&self, arc: EdgeIndex) -> &ResidualArc<W> {
        &self.arcs[arc]
    }

    /// Smallest residual capacity along a walk of arcs.
    pub fn bottleneck(&self, walk: &[EdgeIndex]) -> W {
        walk.iter()
            .map(|&arc| self.arc(arc).residual)
            .min_by(cmp_weights)
            .expect("residual walk must contain at least one arc")
    }

    /// Pushes `delta` units of flow along a walk of residual arcs, raising
    /// flow through forward arcs and canceling it through backward arcs.
    pub fn apply<V: VertexValue>(&self, graph: &mut Graph<V, W>, walk: &[EdgeIndex], delta: W) {
        for &arc in walk {
            let arc = self.arc(arc);
            let flow = graph.flow(arc.mirror);
            match arc.direction {
                EdgeDirection::Forward => graph.set_flow(arc.mirror, flow + delta),
                EdgeDirection::Backward => graph.set_flow(arc.mirror, flow - delta),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use petgraph::visit::EdgeRef;

    use super::*;
    use crate::graph::GraphBuilder;

    fn single_edge(flow: i32) -> Graph<i32, i32> {
        let mut builder = GraphBuilder::directed();
        builder.add_vertices([0, 1]);
        let edge = builder.add_edge_with_cost(0, 1, 5, 4).unwrap();
        let mut graph = builder.build();
        graph.set_flow(edge, flow);
        graph
    }

    fn arcs_of(residual: &ResidualGraph<i32>) -> Vec<(usize, usize, ResidualArc<i32>)> {
        residual
            .digraph()
            .edge_references()
            .map(|arc| (arc.source().index(), arc.target().index(), *arc.weight()))
            .collect()
    }

    #[test]
    fn partial_flow_yields_both_directions() {
        let graph = single_edge(2);
        let residual = ResidualGraph::build(&graph).unwrap();
        let arcs = arcs_of(&residual);
        assert_eq!(arcs.len(), 2);
        let (_, _, forward) = arcs[0];
        assert_eq!(forward.direction, EdgeDirection::Forward);
        assert_eq!(forward.residual, 3);
        let (source, target, backward) = arcs[1];
        assert_eq!((source, target), (1, 0));
        assert_eq!(backward.direction, EdgeDirection::Backward);
        assert_eq!(backward.residual, 2);
        assert_eq!(backward.mirror, forward.mirror);
    }

    #[test]
    fn exhausted_directions_are_omitted() {
        let unused = ResidualGraph::build(&single_edge(0)).unwrap();
        assert_eq!(unused.digraph().edge_count(), 1);
        assert_eq!(arcs_of(&unused)[0].2.direction, EdgeDirection::Forward);

        let saturated = ResidualGraph::build(&single_edge(5)).unwrap();
        assert_eq!(saturated.digraph().edge_count(), 1);
        assert_eq!(arcs_of(&saturated)[0].2.direction, EdgeDirection::Backward);
    }

    #[test]
    fn costs_are_negated_on_backward_arcs() {
        let graph = single_edge(2);
        let residual = ResidualGraph::build_with_costs(&graph).unwrap();
        let arcs = arcs_of(&residual);
        assert_eq!(arcs[0].2.cost, 4);
        assert_eq!(arcs[1].2.cost, -4);

        // the cost-free build keeps arcs but zeroes the costs
        let plain = ResidualGraph::build(&graph).unwrap();
        assert!(arcs_of(&plain).iter().all(|(_, _, arc)| arc.cost == 0));
    }

    #[test]
    fn apply_raises_and_cancels_through_mirrors() {
        let mut graph = single_edge(2);
        let residual = ResidualGraph::build(&graph).unwrap();
        let forward: Vec<_> = residual
            .digraph()
            .edge_references()
            .filter(|arc| residual.arc(arc.id()).direction == EdgeDirection::Forward)
            .map(|arc| arc.id())
            .collect();
        let backward: Vec<_> = residual
            .digraph()
            .edge_references()
            .filter(|arc| residual.arc(arc.id()).direction == EdgeDirection::Backward)
            .map(|arc| arc.id())
            .collect();
        let edge = graph.edge_ids().next().unwrap();

        residual.apply(&mut graph, &forward, 3);
        assert_eq!(graph.flow(edge), 5);
        residual.apply(&mut graph, &backward, 2);
        assert_eq!(graph.flow(edge), 3);
    }

    #[test]
    fn bottleneck_is_the_smallest_residual() {
        let mut builder = GraphBuilder::directed();
        builder.add_vertices([0, 1, 2]);
        builder.add_edge(0, 1, 7).unwrap();
        builder.add_edge(1, 2, 3).unwrap();
        let graph = builder.build();
        let residual = ResidualGraph::build(&graph).unwrap();
        let walk: Vec<_> = residual.digraph().edge_references().map(|a| a.id()).collect();
        assert_eq!(residual.bottleneck(&walk), 3);
    }

    #[test]
    fn undirected_graphs_are_rejected() {
        let mut builder = GraphBuilder::undirected();
        builder.add_vertices([0, 1]);
        builder.add_edge(0, 1, 1).unwrap();
        let graph = builder.build();
        assert!(matches!(
            ResidualGraph::build(&graph),
            Err(Error::NotDirected)
        ));
    }
}
