//! Cycle canceling: establish any feasible flow first, then cancel
//! negative cost cycles in the residual graph until none remain.

use crate::algo::max_flow::edmonds_karp;
use crate::algo::min_cost_flow::{flow_cost, BFlow};
use crate::algo::residual::ResidualGraph;
use crate::algo::shortest_path::bellman_ford_moore::negative_cycle;
use crate::error::Error;
use crate::graph::{Graph, GraphBuilder, VertexValue};
use crate::node::Node;
use crate::weight::SignedWeight;

/// Computes a cost-minimal b-flow on `graph`, leaving it on the edges.
///
/// Feasibility is decided by a max flow between a super source feeding all
/// positive balances and a super sink draining all negative ones: the
/// balances are satisfiable exactly when that flow moves the whole supply.
pub fn min_cost_flow<V, W>(graph: &mut Graph<V, W>) -> Result<BFlow<W>, Error>
where
    V: VertexValue,
    W: SignedWeight,
{
    if !graph.is_directed() {
        return Err(Error::NotDirected);
    }

    let mut builder = GraphBuilder::directed();
    for vertex in graph.vertex_ids() {
        builder.add_vertex(Node::WithId(graph.value(vertex).clone()));
    }
    // original edges go in first: edge i of the reduction mirrors edge i
    for edge in graph.edge_ids() {
        let (origin, target) = graph.endpoints(edge);
        builder.add_edge(
            Node::WithId(graph.value(origin).clone()),
            Node::WithId(graph.value(target).clone()),
            graph.weight(edge),
        )?;
    }
    builder.add_vertex(Node::Source);
    builder.add_vertex(Node::Sink);
    let mut supply = W::zero();
    for vertex in graph.vertex_ids() {
        let balance = graph.balance(vertex);
        if balance > W::zero() {
            builder.add_edge(
                Node::Source,
                Node::WithId(graph.value(vertex).clone()),
                balance,
            )?;
            supply += balance;
        } else if balance < W::zero() {
            builder.add_edge(
                Node::WithId(graph.value(vertex).clone()),
                Node::Sink,
                -balance,
            )?;
        }
    }

    let mut reduction = builder.build();
    let source = reduction.vertex(&Node::Source)?;
    let sink = reduction.vertex(&Node::Sink)?;
    let moved = edmonds_karp(&mut reduction, source, sink)?;
    if moved != supply {
        log::debug!("balances unsatisfiable: moved {moved:?} of {supply:?}");
        return Ok(BFlow::Infeasible);
    }
    for edge in graph.edge_ids() {
        graph.set_flow(edge, reduction.flow(edge));
    }

    loop {
        let residual = ResidualGraph::build_with_costs(graph)?;
        let Some(cycle) = negative_cycle(residual.digraph(), |arc| arc.cost) else {
            break;
        };
        let delta = residual.bottleneck(&cycle);
        log::debug!(
            "canceling {delta:?} units around a cycle of {} arcs",
            cycle.len()
        );
        residual.apply(graph, &cycle, delta);
    }
    Ok(BFlow::Optimal {
        cost: flow_cost(graph),
    })
}
