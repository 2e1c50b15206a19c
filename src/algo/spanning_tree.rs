//! Minimum spanning trees of undirected weighted graphs.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use itertools::Itertools;
use petgraph::unionfind::UnionFind;

use crate::error::Error;
use crate::graph::{EdgeId, Graph, GraphBuilder, VertexId, VertexValue};
use crate::weight::{cmp_weights, Weight};

/// Kruskal's algorithm: accept edges from cheapest to dearest, skipping
/// any edge whose endpoints already share a component.
///
/// Disconnected graphs yield a minimum spanning forest. Ties between
/// equal weights resolve to the earlier edge.
pub fn kruskal<V, W>(graph: &Graph<V, W>) -> Result<Graph<V, W>, Error>
where
    V: VertexValue,
    W: Weight,
{
    if graph.is_directed() {
        return Err(Error::NotUndirected);
    }
    let mut components: UnionFind<usize> = UnionFind::new(graph.vertex_count());
    let mut builder = GraphBuilder::undirected();
    for vertex in graph.vertex_ids() {
        builder.add_vertex(graph.value(vertex).clone());
    }
    let mut accepted = 0;
    let by_weight = graph
        .edge_ids()
        .sorted_by(|&a, &b| cmp_weights(&graph.weight(a), &graph.weight(b)));
    for edge in by_weight {
        // a spanning tree never holds more than |V| - 1 edges
        if accepted + 1 >= graph.vertex_count() {
            break;
        }
        let (origin, target) = graph.endpoints(edge);
        if components.union(origin.index(), target.index()) {
            builder.add_edge(
                graph.value(origin).clone(),
                graph.value(target).clone(),
                graph.weight(edge),
            )?;
            accepted += 1;
        }
    }
    Ok(builder.build())
}

struct Candidate<W> {
    weight: W,
    vertex: VertexId,
    via: Option<EdgeId>,
}

impl<W: Weight> PartialEq for Candidate<W> {
    fn eq(&self, other: &Self) -> bool {
        cmp_weights(&self.weight, &other.weight) == Ordering::Equal
    }
}

impl<W: Weight> Eq for Candidate<W> {}

impl<W: Weight> PartialOrd for Candidate<W> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<W: Weight> Ord for Candidate<W> {
    // reversed so the max-heap pops the lightest candidate first
    fn cmp(&self, other: &Self) -> Ordering {
        cmp_weights(&other.weight, &self.weight)
    }
}

/// Prim's algorithm: grow the tree one vertex at a time, always crossing
/// the lightest edge that leaves it.
///
/// Vertices the growth never reaches are carried over without edges, so
/// the result covers the same vertex set as the input.
pub fn prim<V, W>(graph: &Graph<V, W>) -> Result<Graph<V, W>, Error>
where
    V: VertexValue,
    W: Weight,
{
    if graph.is_directed() {
        return Err(Error::NotUndirected);
    }
    let mut builder = GraphBuilder::undirected();
    let start = match graph.vertex_ids().next() {
        Some(vertex) => vertex,
        None => return Ok(builder.build()),
    };
    let mut in_tree = vec![false; graph.vertex_count()];
    let mut queue = BinaryHeap::new();
    queue.push(Candidate {
        weight: W::zero(),
        vertex: start,
        via: None,
    });
    while let Some(candidate) = queue.pop() {
        let vertex = candidate.vertex;
        if in_tree[vertex.index()] {
            continue;
        }
        in_tree[vertex.index()] = true;
        builder.add_vertex(graph.value(vertex).clone());
        if let Some(edge) = candidate.via {
            let other = graph.opposite(edge, vertex);
            builder.add_edge(
                graph.value(other).clone(),
                graph.value(vertex).clone(),
                graph.weight(edge),
            )?;
        }
        for &edge in graph.edges_of(vertex) {
            let next = graph.opposite(edge, vertex);
            if !in_tree[next.index()] {
                queue.push(Candidate {
                    weight: graph.weight(edge),
                    vertex: next,
                    via: Some(edge),
                });
            }
        }
    }
    for vertex in graph.vertex_ids() {
        builder.add_vertex(graph.value(vertex).clone());
    }
    Ok(builder.build())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algo::search::connected_components;

    fn assert_close(left: f64, right: f64) {
        assert!((left - right).abs() < 1e-9, "{left} differs from {right}");
    }

    fn weighted_mesh() -> Graph<i32, f64> {
        let mut builder = GraphBuilder::undirected();
        builder.add_vertices(0..5);
        builder.add_edge(0, 1, 0.2).unwrap();
        builder.add_edge(0, 2, 0.1).unwrap();
        builder.add_edge(0, 3, 0.3).unwrap();
        builder.add_edge(1, 2, 0.1).unwrap();
        builder.add_edge(1, 3, 0.2).unwrap();
        builder.add_edge(1, 4, 1.0).unwrap();
        builder.build()
    }

    #[test]
    fn kruskal_keeps_the_light_mesh_edges() {
        let graph = weighted_mesh();
        let tree = kruskal(&graph).unwrap();
        assert_eq!(tree.vertex_count(), graph.vertex_count());
        assert_eq!(tree.edge_count(), 4);
        assert_eq!(connected_components(&tree), 1);
        assert_close(tree.total_weight(), 1.4);
    }

    #[test]
    fn prim_agrees_with_kruskal() {
        let graph = weighted_mesh();
        let reference = kruskal(&graph).unwrap();
        let tree = prim(&graph).unwrap();
        assert_eq!(tree.edge_count(), reference.edge_count());
        assert_close(tree.total_weight(), reference.total_weight());
    }

    #[test]
    fn disconnected_inputs_become_forests() {
        // 0 - 1 and 2 - 3 never join; 4 stays isolated
        let mut builder = GraphBuilder::undirected();
        builder.add_vertices(0..5);
        builder.add_edge(0, 1, 1.0).unwrap();
        builder.add_edge(2, 3, 2.0).unwrap();
        let graph = builder.build();
        let forest = kruskal(&graph).unwrap();
        assert_eq!(forest.vertex_count(), 5);
        assert_eq!(forest.edge_count(), 2);
        assert_eq!(connected_components(&forest), 3);
    }

    #[test]
    fn directed_graphs_are_rejected() {
        let mut builder: GraphBuilder<i32, f64> = GraphBuilder::directed();
        builder.add_vertices([0, 1]);
        builder.add_edge(0, 1, 1.0).unwrap();
        let graph = builder.build();
        assert_eq!(kruskal(&graph).err(), Some(Error::NotUndirected));
        assert_eq!(prim(&graph).err(), Some(Error::NotUndirected));
    }
}
