//! Maximum bipartite matching through a unit capacity flow reduction.

use std::collections::BTreeSet;

use crate::algo::max_flow::edmonds_karp;
use crate::error::Error;
use crate::graph::{EdgeId, Graph, GraphBuilder, VertexId, VertexValue};
use crate::node::Node;
use crate::weight::Weight;

/// Computes a maximum matching between the `left` and `right` vertex sets
/// and returns the matched edges of `graph`.
///
/// The sets must be disjoint. Edges whose endpoints are not split across
/// the two sets are ignored; on directed graphs only arcs leaving the
/// left side are considered.
pub fn bipartite_matching<V, W>(
    graph: &Graph<V, W>,
    left: &[VertexId],
    right: &[VertexId],
) -> Result<Vec<EdgeId>, Error>
where
    V: VertexValue,
    W: Weight,
{
    let right_side: BTreeSet<VertexId> = right.iter().copied().collect();
    debug_assert!(
        left.iter().all(|vertex| !right_side.contains(vertex)),
        "the two sides of a bipartite graph share no vertex"
    );

    let mut builder: GraphBuilder<Node<V>, i32> = GraphBuilder::directed();
    builder.add_vertex(Node::Source);
    builder.add_vertex(Node::Sink);
    for &vertex in left.iter().chain(right) {
        builder.add_vertex(Node::WithId(graph.value(vertex).clone()));
    }

    // every lane remembers which edge of the input it stands for
    let mut lanes: Vec<(EdgeId, EdgeId)> = Vec::new();
    for &vertex in left {
        builder.add_edge(Node::Source, Node::WithId(graph.value(vertex).clone()), 1)?;
        for &edge in graph.edges_of(vertex) {
            let other = graph.opposite(edge, vertex);
            if right_side.contains(&other) {
                let lane = builder.add_edge(
                    Node::WithId(graph.value(vertex).clone()),
                    Node::WithId(graph.value(other).clone()),
                    1,
                )?;
                lanes.push((lane, edge));
            }
        }
    }
    for &vertex in right {
        builder.add_edge(Node::WithId(graph.value(vertex).clone()), Node::Sink, 1)?;
    }

    let mut reduction = builder.build();
    let source = reduction.vertex(&Node::Source)?;
    let sink = reduction.vertex(&Node::Sink)?;
    let size = edmonds_karp(&mut reduction, source, sink)?;
    log::debug!("bipartite matching covers {size} pairs");

    Ok(lanes
        .into_iter()
        .filter(|&(lane, _)| reduction.flow(lane) == 1)
        .map(|(_, edge)| edge)
        .collect())
}
