//! Successive shortest paths: route outstanding balances along
//! cost-shortest residual paths until supply and demand meet.

use crate::algo::min_cost_flow::{flow_cost, BFlow};
use crate::algo::node_index;
use crate::algo::residual::ResidualGraph;
use crate::algo::shortest_path::bellman_ford_moore::{first_improvable, path_arcs, relax_from};
use crate::error::Error;
use crate::graph::{Graph, VertexId, VertexValue};
use crate::weight::SignedWeight;

/// Computes a cost-minimal b-flow on `graph`, leaving it on the edges.
///
/// Edges with negative costs start out saturated so that no shortest path
/// computation ever sees a negative cycle of untouched edges; the imbalance
/// this creates is tracked per vertex as its pseudo balance and worked off
/// together with the declared balances.
pub fn min_cost_flow<V, W>(graph: &mut Graph<V, W>) -> Result<BFlow<W>, Error>
where
    V: VertexValue,
    W: SignedWeight,
{
    if !graph.is_directed() {
        return Err(Error::NotDirected);
    }

    for edge in graph.edge_ids() {
        let initial = if graph.cost(edge) < W::zero() {
            graph.weight(edge)
        } else {
            W::zero()
        };
        graph.set_flow(edge, initial);
    }
    for vertex in graph.vertex_ids() {
        update_pseudo_balance(graph, vertex);
    }

    let mut sources: Vec<VertexId> = graph
        .vertex_ids()
        .filter(|&vertex| graph.balance(vertex) > graph.pseudo_balance(vertex))
        .collect();
    let mut targets: Vec<VertexId> = graph
        .vertex_ids()
        .filter(|&vertex| graph.balance(vertex) < graph.pseudo_balance(vertex))
        .collect();

    while !sources.is_empty() && !targets.is_empty() {
        let source = sources[0];
        let residual = ResidualGraph::build_with_costs(graph)?;
        let digraph = residual.digraph();
        let mut relaxation = relax_from(digraph, node_index(source), |arc| arc.cost);
        // with a negative cycle around, no path cost can be trusted
        if first_improvable(digraph, &mut relaxation, |arc| arc.cost).is_some() {
            break;
        }
        let Some(&target) = targets
            .iter()
            .find(|&&target| relaxation.reached(node_index(target)))
        else {
            break;
        };

        let path = path_arcs(digraph, &relaxation, node_index(source), node_index(target));
        let outstanding_supply = graph.balance(source) - graph.pseudo_balance(source);
        let outstanding_demand = graph.pseudo_balance(target) - graph.balance(target);
        let mut delta = residual.bottleneck(&path);
        if outstanding_supply < delta {
            delta = outstanding_supply;
        }
        if outstanding_demand < delta {
            delta = outstanding_demand;
        }
        log::debug!(
            "routing {delta:?} units {:?} -> {:?} over {} arcs",
            graph.value(source),
            graph.value(target),
            path.len()
        );
        residual.apply(graph, &path, delta);

        if delta == outstanding_supply {
            sources.retain(|&vertex| vertex != source);
        }
        if delta == outstanding_demand {
            targets.retain(|&vertex| vertex != target);
        }
        update_pseudo_balance(graph, source);
        update_pseudo_balance(graph, target);
    }

    let satisfied = graph
        .vertex_ids()
        .all(|vertex| graph.balance(vertex) == graph.pseudo_balance(vertex));
    if satisfied {
        Ok(BFlow::Optimal {
            cost: flow_cost(graph),
        })
    } else {
        log::debug!("no residual path left for the remaining balances");
        Ok(BFlow::Infeasible)
    }
}

fn update_pseudo_balance<V, W>(graph: &mut Graph<V, W>, vertex: VertexId)
where
    V: VertexValue,
    W: SignedWeight,
{
    let outflow = graph.net_outflow(vertex);
    graph.set_pseudo_balance(vertex, outflow);
}
