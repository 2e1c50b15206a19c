//! Traversal primitives: breadth-first, depth-first, reachability and
//! component counting. Directed edges are walked along their direction.

use std::collections::{BTreeSet, VecDeque};

use crate::graph::{Graph, VertexId, VertexValue};
use crate::weight::Weight;

/// Vertices reachable from `start` in breadth-first order, `start` first.
pub fn breadth_first<V, W>(graph: &Graph<V, W>, start: VertexId) -> Vec<VertexId>
where
    V: VertexValue,
    W: Weight,
{
    let mut order = Vec::new();
    let mut visited = vec![false; graph.vertex_count()];
    let mut queue = VecDeque::new();
    visited[start.index()] = true;
    queue.push_back(start);
    while let Some(vertex) = queue.pop_front() {
        order.push(vertex);
        for next in graph.adjacent(vertex) {
            if !visited[next.index()] {
                visited[next.index()] = true;
                queue.push_back(next);
            }
        }
    }
    order
}

/// First vertex in breadth-first order whose value satisfies `predicate`.
pub fn find_breadth_first<V, W>(
    graph: &Graph<V, W>,
    start: VertexId,
    predicate: impl Fn(&V) -> bool,
) -> Option<VertexId>
where
    V: VertexValue,
    W: Weight,
{
    breadth_first(graph, start)
        .into_iter()
        .find(|&vertex| predicate(graph.value(vertex)))
}

/// Vertices reachable from `start` in depth-first order, `start` first.
pub fn depth_first<V, W>(graph: &Graph<V, W>, start: VertexId) -> Vec<VertexId>
where
    V: VertexValue,
    W: Weight,
{
    let mut order = Vec::new();
    let mut visited = vec![false; graph.vertex_count()];
    let mut stack = vec![start];
    while let Some(vertex) = stack.pop() {
        if visited[vertex.index()] {
            continue;
        }
        visited[vertex.index()] = true;
        order.push(vertex);
        for next in graph.adjacent(vertex) {
            if !visited[next.index()] {
                stack.push(next);
            }
        }
    }
    order
}

/// The set of vertices reachable from `start`, including `start`.
pub fn reachable<V, W>(graph: &Graph<V, W>, start: VertexId) -> BTreeSet<VertexId>
where
    V: VertexValue,
    W: Weight,
{
    breadth_first(graph, start).into_iter().collect()
}

/// Counts connected components by restarting a traversal on every vertex
/// not yet covered by an earlier one.
pub fn connected_components<V, W>(graph: &Graph<V, W>) -> usize
where
    V: VertexValue,
    W: Weight,
{
    let mut visited = vec![false; graph.vertex_count()];
    let mut components = 0;
    for vertex in graph.vertex_ids() {
        if visited[vertex.index()] {
            continue;
        }
        components += 1;
        for covered in breadth_first(graph, vertex) {
            visited[covered.index()] = true;
        }
    }
    components
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::GraphBuilder;

    fn forked_chain() -> Graph<i32, i32> {
        // 0 - 1 - 2 with a fork 1 - 3, plus the isolated vertex 4
        let mut builder = GraphBuilder::undirected();
        builder.add_vertices(0..5);
        builder.add_edge(0, 1, 1).unwrap();
        builder.add_edge(1, 2, 1).unwrap();
        builder.add_edge(1, 3, 1).unwrap();
        builder.build()
    }

    fn values(graph: &Graph<i32, i32>, order: &[VertexId]) -> Vec<i32> {
        order.iter().map(|&vertex| *graph.value(vertex)).collect()
    }

    #[test]
    fn breadth_first_visits_levels_in_order() {
        let graph = forked_chain();
        let order = breadth_first(&graph, graph.vertex(&0).unwrap());
        assert_eq!(values(&graph, &order), vec![0, 1, 2, 3]);
    }

    #[test]
    fn depth_first_follows_a_branch_to_its_end() {
        let graph = forked_chain();
        let order = depth_first(&graph, graph.vertex(&0).unwrap());
        assert_eq!(order.len(), 4);
        assert_eq!(*graph.value(order[0]), 0);
        // one full branch comes before the other
        let position = |value: i32| order.iter().position(|&v| *graph.value(v) == value).unwrap();
        assert!(position(1) < position(2));
        assert!(position(1) < position(3));
    }

    #[test]
    fn find_breadth_first_reports_the_nearest_match() {
        let graph = forked_chain();
        let found = find_breadth_first(&graph, graph.vertex(&0).unwrap(), |&value| value > 1);
        assert_eq!(*graph.value(found.unwrap()), 2);
        let missing = find_breadth_first(&graph, graph.vertex(&0).unwrap(), |&value| value > 9);
        assert_eq!(missing, None);
    }

    #[test]
    fn reachability_respects_edge_direction() {
        let mut builder = GraphBuilder::directed();
        builder.add_vertices([0, 1, 2]);
        builder.add_edge(0, 1, 1).unwrap();
        builder.add_edge(2, 1, 1).unwrap();
        let graph = builder.build();
        let from_zero = reachable(&graph, graph.vertex(&0).unwrap());
        assert_eq!(from_zero.len(), 2);
        assert!(!from_zero.contains(&graph.vertex(&2).unwrap()));
    }

    #[test]
    fn isolated_vertices_count_as_components() {
        let graph = forked_chain();
        assert_eq!(connected_components(&graph), 2);
    }
}
