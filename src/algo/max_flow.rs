//! Edmonds-Karp maximum flow.

use std::collections::VecDeque;

use petgraph::graph::EdgeIndex;
use petgraph::visit::EdgeRef;

use crate::algo::node_index;
use crate::algo::residual::ResidualGraph;
use crate::error::Error;
use crate::graph::{Graph, VertexId, VertexValue};
use crate::weight::Weight;

/// Computes a maximum flow from `source` to `target` and returns its value,
/// leaving the flow assignment on the edges of `graph`.
///
/// Edge weights are read as capacities. Flow already present on the graph
/// is discarded before the first augmentation, so repeated runs give the
/// same result. Augmenting paths are found breadth-first, which makes the
/// path with the fewest arcs win whenever several exist.
pub fn edmonds_karp<V, W>(
    graph: &mut Graph<V, W>,
    source: VertexId,
    target: VertexId,
) -> Result<W, Error>
where
    V: VertexValue,
    W: Weight,
{
    if !graph.is_directed() {
        return Err(Error::NotDirected);
    }
    debug_assert!(
        source != target,
        "max flow between a vertex and itself is undefined"
    );

    for edge in graph.edge_ids() {
        graph.set_flow(edge, W::zero());
    }
    loop {
        let residual = ResidualGraph::build(graph)?;
        let Some(path) = augmenting_path(&residual, source, target) else {
            break;
        };
        let delta = residual.bottleneck(&path);
        log::trace!("augmenting along {} arcs by {delta:?}", path.len());
        residual.apply(graph, &path, delta);
    }

    let value = graph.net_outflow(source);
    log::debug!(
        "max flow {:?} -> {:?}: {value:?}",
        graph.value(source),
        graph.value(target)
    );
    Ok(value)
}

/// Breadth-first search for an augmenting path, returned as residual arcs
/// in source-to-target order.
fn augmenting_path<W>(
    residual: &ResidualGraph<W>,
    source: VertexId,
    target: VertexId,
) -> Option<Vec<EdgeIndex>>
where
    W: Weight,
{
    let digraph = residual.digraph();
    let start = node_index(source);
    let goal = node_index(target);
    let mut visited = vec![false; digraph.node_count()];
    let mut incoming: Vec<Option<EdgeIndex>> = vec![None; digraph.node_count()];
    let mut queue = VecDeque::new();
    visited[start.index()] = true;
    queue.push_back(start);

    'search: while let Some(node) = queue.pop_front() {
        for arc in digraph.edges(node) {
            let next = arc.target();
            if visited[next.index()] {
                continue;
            }
            visited[next.index()] = true;
            incoming[next.index()] = Some(arc.id());
            if next == goal {
                break 'search;
            }
            queue.push_back(next);
        }
    }
    if !visited[goal.index()] {
        return None;
    }

    let mut path = Vec::new();
    let mut current = goal;
    while current != start {
        let arc = incoming[current.index()].expect("visited vertex always has an incoming arc");
        path.push(arc);
        current = digraph
            .edge_endpoints(arc)
            .expect("arc comes from this digraph")
            .0;
    }
    path.reverse();
    Some(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::GraphBuilder;

    /// Two-lane network: 0 feeds 1 and 2, layers 3/4 and 5/6 sit in the
    /// middle, 7 drains. Capacities follow the edge order
    /// 0->1, 0->2, 1->3, 2->4, 3->5, 3->6, 4->5, 4->6, 5->7, 6->7.
    fn layered(capacities: [i32; 10]) -> Graph<i32, i32> {
        let mut builder = GraphBuilder::directed();
        builder.add_vertices(0..8);
        let lanes = [
            (0, 1),
            (0, 2),
            (1, 3),
            (2, 4),
            (3, 5),
            (3, 6),
            (4, 5),
            (4, 6),
            (5, 7),
            (6, 7),
        ];
        for ((origin, target), capacity) in lanes.into_iter().zip(capacities) {
            builder.add_edge(origin, target, capacity).unwrap();
        }
        builder.build()
    }

    fn assert_feasible(graph: &Graph<i32, i32>, source: i32, target: i32) {
        for vertex in graph.vertex_ids() {
            let value = *graph.value(vertex);
            if value != source && value != target {
                assert_eq!(graph.net_outflow(vertex), 0, "conservation at {value}");
            }
        }
        for edge in graph.edge_ids() {
            assert!(graph.flow(edge) >= 0, "negative flow on {edge:?}");
            assert!(graph.flow(edge) <= graph.weight(edge), "overflow on {edge:?}");
        }
    }

    #[test]
    fn saturates_the_layered_network() {
        let mut graph = layered([2, 2, 2, 2, 1, 1, 1, 1, 2, 2]);
        let source = graph.vertex(&0).unwrap();
        let target = graph.vertex(&7).unwrap();
        let value = edmonds_karp(&mut graph, source, target).unwrap();
        assert_eq!(value, 4);
        assert_eq!(graph.net_outflow(target), -4);
        assert_feasible(&graph, 0, 7);

        // a second run starts from scratch and lands on the same flow
        let again = edmonds_karp(&mut graph, source, target).unwrap();
        assert_eq!(again, 4);
    }

    #[test]
    fn higher_capacities_raise_the_flow() {
        let mut graph = layered([3, 2, 3, 2, 2, 1, 1, 2, 3, 2]);
        let source = graph.vertex(&0).unwrap();
        let target = graph.vertex(&7).unwrap();
        let value = edmonds_karp(&mut graph, source, target).unwrap();
        assert_eq!(value, 5);
        assert_feasible(&graph, 0, 7);
    }

    #[test]
    fn augments_through_backward_arcs() {
        // The first search routes its unit along 0 -> 1 -> 2 -> 3; the
        // second can only finish by canceling the 1 -> 2 leg again.
        let mut builder = GraphBuilder::directed();
        builder.add_vertices(0..6);
        builder.add_edge(0, 4, 1).unwrap();
        builder.add_edge(0, 1, 1).unwrap();
        builder.add_edge(1, 5, 1).unwrap();
        let trap = builder.add_edge(1, 2, 1).unwrap();
        builder.add_edge(2, 3, 1).unwrap();
        builder.add_edge(4, 2, 1).unwrap();
        builder.add_edge(5, 3, 1).unwrap();
        let mut graph = builder.build();

        let source = graph.vertex(&0).unwrap();
        let target = graph.vertex(&3).unwrap();
        let value = edmonds_karp(&mut graph, source, target).unwrap();
        assert_eq!(value, 2);
        assert_eq!(graph.flow(trap), 0);
        assert_feasible(&graph, 0, 3);
    }

    #[test]
    fn disconnected_targets_get_zero_flow() {
        let mut builder = GraphBuilder::directed();
        builder.add_vertices([0, 1, 2]);
        builder.add_edge(0, 1, 5).unwrap();
        let mut graph = builder.build();
        let source = graph.vertex(&0).unwrap();
        let target = graph.vertex(&2).unwrap();
        let value = edmonds_karp(&mut graph, source, target).unwrap();
        assert_eq!(value, 0);
    }

    #[test]
    fn undirected_graphs_are_rejected() {
        let mut builder = GraphBuilder::undirected();
        builder.add_vertices([0, 1]);
        builder.add_edge(0, 1, 1).unwrap();
        let mut graph = builder.build();
        let source = graph.vertex(&0).unwrap();
        let target = graph.vertex(&1).unwrap();
        let outcome = edmonds_karp(&mut graph, source, target);
        assert_eq!(outcome.err(), Some(Error::NotDirected));
    }
}
