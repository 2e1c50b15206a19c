//! Dijkstra's shortest path algorithm.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::error::Error;
use crate::graph::{EdgeId, Graph, GraphBuilder, VertexId, VertexValue};
use crate::weight::{cmp_weights, Weight};

struct QueueEntry<W> {
    distance: W,
    vertex: VertexId,
    via: Option<EdgeId>,
}

impl<W: Weight> PartialEq for QueueEntry<W> {
    fn eq(&self, other: &Self) -> bool {
        cmp_weights(&self.distance, &other.distance) == Ordering::Equal
    }
}

impl<W: Weight> Eq for QueueEntry<W> {}

impl<W: Weight> PartialOrd for QueueEntry<W> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<W: Weight> Ord for QueueEntry<W> {
    // reversed so the max-heap pops the smallest distance first
    fn cmp(&self, other: &Self) -> Ordering {
        cmp_weights(&other.distance, &self.distance)
    }
}

/// Finds the shortest path from `source` to `target` over non-negative
/// edge weights and returns it as a fresh directed graph.
///
/// The whole edge set is checked before the search starts; a single
/// negative weight anywhere in the graph is rejected even if no shortest
/// path would ever cross it.
pub fn shortest_path<V, W>(
    graph: &Graph<V, W>,
    source: VertexId,
    target: VertexId,
) -> Result<Graph<V, W>, Error>
where
    V: VertexValue,
    W: Weight,
{
    if graph.edge_ids().any(|edge| graph.weight(edge) < W::zero()) {
        return Err(Error::NegativeEdgeWeight);
    }

    let mut distance = vec![W::max_value(); graph.vertex_count()];
    let mut predecessor: Vec<Option<EdgeId>> = vec![None; graph.vertex_count()];
    let mut settled = vec![false; graph.vertex_count()];
    let mut queue = BinaryHeap::new();
    distance[source.index()] = W::zero();
    queue.push(QueueEntry {
        distance: W::zero(),
        vertex: source,
        via: None,
    });

    while let Some(entry) = queue.pop() {
        let vertex = entry.vertex;
        // stale queue entries are skipped instead of being re-prioritized
        if settled[vertex.index()] {
            continue;
        }
        settled[vertex.index()] = true;
        predecessor[vertex.index()] = entry.via;
        if vertex == target {
            break;
        }
        for &edge in graph.edges_of(vertex) {
            let next = graph.opposite(edge, vertex);
            if settled[next.index()] {
                continue;
            }
            let candidate = entry.distance + graph.weight(edge);
            if candidate < distance[next.index()] {
                distance[next.index()] = candidate;
                queue.push(QueueEntry {
                    distance: candidate,
                    vertex: next,
                    via: Some(edge),
                });
            }
        }
    }

    if !settled[target.index()] {
        return Err(Error::Unreachable);
    }
    log::debug!(
        "dijkstra {:?} -> {:?}: total {:?}",
        graph.value(source),
        graph.value(target),
        distance[target.index()]
    );

    let mut edges = Vec::new();
    let mut current = target;
    while current != source {
        let edge = predecessor[current.index()].expect("settled vertex always has a predecessor");
        let from = graph.opposite(edge, current);
        edges.push((from, current, graph.weight(edge)));
        current = from;
    }
    edges.reverse();

    let mut builder = GraphBuilder::directed();
    builder.add_vertex(graph.value(source).clone());
    for (from, to, weight) in edges {
        let to = graph.value(to).clone();
        builder.add_vertex(to.clone());
        builder.add_edge(graph.value(from).clone(), to, weight)?;
    }
    Ok(builder.build())
}
