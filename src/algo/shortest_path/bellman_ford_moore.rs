//! Bellman-Ford-Moore label correcting relaxation.
//!
//! The relaxation core works on any `petgraph` digraph whose node indices
//! mirror vertex ids, with the arc weight supplied as a closure. That lets
//! the public shortest path entry point and the min-cost-flow strategies
//! (which relax residual arcs by cost) share one implementation.

use petgraph::graph::{DiGraph, EdgeIndex, EdgeReference, NodeIndex};
use petgraph::visit::EdgeRef;

use crate::algo::{node_index, vertex_id};
use crate::error::Error;
use crate::graph::{Graph, GraphBuilder, VertexId, VertexValue};
use crate::weight::Weight;

/// Distances and predecessor arcs left behind by a relaxation run.
pub(crate) struct Relaxation<W> {
    distance: Vec<W>,
    predecessor: Vec<Option<EdgeIndex>>,
}

impl<W> Relaxation<W>
where
    W: Weight,
{
    /// Whether the relaxation assigned `node` a finite distance.
    pub(crate) fn reached(&self, node: NodeIndex) -> bool {
        self.distance[node.index()] != W::max_value()
    }

    pub(crate) fn distance_to(&self, node: NodeIndex) -> W {
        self.distance[node.index()]
    }
}

/// Relaxes all arcs for `|V| - 1` rounds starting from `source`.
pub(crate) fn relax_from<E, W>(
    digraph: &DiGraph<(), E>,
    source: NodeIndex,
    weight: impl Fn(&E) -> W,
) -> Relaxation<W>
where
    W: Weight,
{
    let mut relaxation = Relaxation {
        distance: vec![W::max_value(); digraph.node_count()],
        predecessor: vec![None; digraph.node_count()],
    };
    relaxation.distance[source.index()] = W::zero();
    relax_rounds(digraph, &mut relaxation, &weight);
    relaxation
}

fn relax_rounds<E, W>(
    digraph: &DiGraph<(), E>,
    relaxation: &mut Relaxation<W>,
    weight: &impl Fn(&E) -> W,
) where
    W: Weight,
{
    for _ in 1..digraph.node_count() {
        let mut improved = false;
        for arc in digraph.edge_references() {
            improved |= relax_arc(relaxation, arc, weight);
        }
        if !improved {
            break;
        }
    }
}

fn relax_arc<E, W>(
    relaxation: &mut Relaxation<W>,
    arc: EdgeReference<'_, E>,
    weight: &impl Fn(&E) -> W,
) -> bool
where
    W: Weight,
{
    let from = relaxation.distance[arc.source().index()];
    // an unreached origin must not contribute a distance
    if from == W::max_value() {
        return false;
    }
    let candidate = from + weight(arc.weight());
    if candidate < relaxation.distance[arc.target().index()] {
        relaxation.distance[arc.target().index()] = candidate;
        relaxation.predecessor[arc.target().index()] = Some(arc.id());
        return true;
    }
    false
}

/// Scans all arcs once more and applies the first improvement it finds.
///
/// After a full relaxation this only succeeds when the digraph contains a
/// cycle of negative total weight that can still pump distances down.
pub(crate) fn first_improvable<E, W>(
    digraph: &DiGraph<(), E>,
    relaxation: &mut Relaxation<W>,
    weight: impl Fn(&E) -> W,
) -> Option<EdgeIndex>
where
    W: Weight,
{
    digraph
        .edge_references()
        .find(|&arc| relax_arc(relaxation, arc, &weight))
        .map(|arc| arc.id())
}

/// Finds a cycle of negative total weight, if one exists.
///
/// Distances start at zero everywhere, which is equivalent to relaxing from
/// a super source connected to every node at no cost; reachability therefore
/// never masks a cycle. The returned arcs form the cycle in forward order.
pub(crate) fn negative_cycle<E, W>(
    digraph: &DiGraph<(), E>,
    weight: impl Fn(&E) -> W,
) -> Option<Vec<EdgeIndex>>
where
    W: Weight,
{
    if digraph.node_count() == 0 {
        return None;
    }
    let mut relaxation = Relaxation {
        distance: vec![W::zero(); digraph.node_count()],
        predecessor: vec![None; digraph.node_count()],
    };
    relax_rounds(digraph, &mut relaxation, &weight);
    let improved = first_improvable(digraph, &mut relaxation, weight)?;

    // The improved vertex is reachable from the cycle but not necessarily on
    // it. |V| predecessor steps are guaranteed to land inside.
    let mut inside = arc_target(digraph, improved);
    for _ in 0..digraph.node_count() {
        inside = arc_source(digraph, step(&relaxation, inside));
    }

    let mut cycle = Vec::new();
    let mut current = inside;
    loop {
        let arc = step(&relaxation, current);
        cycle.push(arc);
        current = arc_source(digraph, arc);
        if current == inside {
            break;
        }
    }
    cycle.reverse();
    log::debug!("negative cycle over {} arcs", cycle.len());
    Some(cycle)
}

fn step<W>(relaxation: &Relaxation<W>, node: NodeIndex) -> EdgeIndex {
    relaxation.predecessor[node.index()].expect("improved vertex always has a predecessor")
}

fn arc_source<E>(digraph: &DiGraph<(), E>, arc: EdgeIndex) -> NodeIndex {
    endpoints(digraph, arc).0
}

fn arc_target<E>(digraph: &DiGraph<(), E>, arc: EdgeIndex) -> NodeIndex {
    endpoints(digraph, arc).1
}

fn endpoints<E>(digraph: &DiGraph<(), E>, arc: EdgeIndex) -> (NodeIndex, NodeIndex) {
    digraph
        .edge_endpoints(arc)
        .expect("arc index always comes from this digraph")
}

/// Predecessor arcs from `source` to `target`, in path order. The caller
/// must have checked that `target` was reached.
pub(crate) fn path_arcs<E, W>(
    digraph: &DiGraph<(), E>,
    relaxation: &Relaxation<W>,
    source: NodeIndex,
    target: NodeIndex,
) -> Vec<EdgeIndex>
where
    W: Weight,
{
    let mut arcs = Vec::new();
    let mut current = target;
    while current != source {
        let arc = relaxation.predecessor[current.index()]
            .expect("every reached vertex has a predecessor chain to the source");
        arcs.push(arc);
        current = arc_source(digraph, arc);
    }
    arcs.reverse();
    arcs
}

/// Projects a graph onto a digraph of weight-carrying arcs. Undirected
/// edges contribute one arc per orientation.
fn weight_view<V, W>(graph: &Graph<V, W>) -> DiGraph<(), W>
where
    V: VertexValue,
    W: Weight,
{
    let mut view = DiGraph::with_capacity(graph.vertex_count(), 2 * graph.edge_count());
    for _ in graph.vertex_ids() {
        view.add_node(());
    }
    for edge in graph.edge_ids() {
        let (origin, target) = graph.endpoints(edge);
        let weight = graph.weight(edge);
        view.add_edge(node_index(origin), node_index(target), weight);
        if !graph.is_directed() && origin != target {
            view.add_edge(node_index(target), node_index(origin), weight);
        }
    }
    view
}

/// Finds the shortest path from `source` to `target` and returns it as a
/// fresh directed graph, regardless of whether the input is directed.
///
/// Negative weights are fine as long as no negative cycle exists; note that
/// in an undirected graph any negative edge already forms one.
pub fn shortest_path<V, W>(
    graph: &Graph<V, W>,
    source: VertexId,
    target: VertexId,
) -> Result<Graph<V, W>, Error>
where
    V: VertexValue,
    W: Weight,
{
    let view = weight_view(graph);
    let mut relaxation = relax_from(&view, node_index(source), |&weight: &W| weight);
    if first_improvable(&view, &mut relaxation, |&weight| weight).is_some() {
        return Err(Error::NegativeCycle);
    }
    if !relaxation.reached(node_index(target)) {
        return Err(Error::Unreachable);
    }
    let arcs = path_arcs(&view, &relaxation, node_index(source), node_index(target));
    log::debug!(
        "shortest path {:?} -> {:?}: {} edges, total {:?}",
        graph.value(source),
        graph.value(target),
        arcs.len(),
        relaxation.distance_to(node_index(target))
    );

    let mut builder = GraphBuilder::directed();
    builder.add_vertex(graph.value(source).clone());
    for &arc in &arcs {
        let (from, to) = endpoints(&view, arc);
        let to = graph.value(vertex_id(to)).clone();
        builder.add_vertex(to.clone());
        builder.add_edge(graph.value(vertex_id(from)).clone(), to, view[arc])?;
    }
    Ok(builder.build())
}
