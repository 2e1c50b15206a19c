//! Attributed graph container shared by every algorithm in this crate.
//!
//! Vertices and edges live in arenas and are addressed by small index
//! newtypes. Flow state is stored as plain typed fields on the edge and
//! vertex records, so algorithms mutate flows in place instead of carrying
//! side tables around.

use std::collections::BTreeMap;
use std::fmt::Debug;

use crate::error::Error;
use crate::weight::Weight;

/// Marker for values that can identify a vertex.
///
/// `Ord` backs the value-to-id lookup, `Clone` lets algorithms rebuild
/// derived graphs over the same values, `Debug` feeds logging.
pub trait VertexValue: Clone + Ord + Debug {}

impl<T> VertexValue for T where T: Clone + Ord + Debug {}

/// Index of a vertex within its graph.
#[derive(Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Hash, Debug)]
pub struct VertexId(pub(crate) usize);

impl VertexId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Index of an edge within its graph.
#[derive(Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Hash, Debug)]
pub struct EdgeId(pub(crate) usize);

impl EdgeId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Clone, Debug)]
struct Vertex<V, W> {
    value: V,
    balance: W,
    pseudo_balance: W,
}

#[derive(Clone, Debug)]
struct Edge<W> {
    origin: VertexId,
    target: VertexId,
    weight: W,
    flow: W,
    cost: W,
}

/// A graph whose edges carry a weight (read as capacity by the flow
/// algorithms), a flow and a cost, and whose vertices carry a balance.
///
/// Whether edges are directed is a runtime property of the graph; every
/// algorithm checks it against its own requirement up front.
#[derive(Clone, Debug)]
pub struct Graph<V, W> {
    directed: bool,
    vertices: Vec<Vertex<V, W>>,
    edges: Vec<Edge<W>>,
    adjacency: Vec<Vec<EdgeId>>,
    lookup: BTreeMap<V, VertexId>,
}

impl<V, W> Graph<V, W>
where
    V: VertexValue,
    W: Weight,
{
    pub fn is_directed(&self) -> bool {
        self.directed
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Iterates over all vertex ids. The iterator holds no borrow of the
    /// graph, so flows and balances may be updated while it runs.
    pub fn vertex_ids(&self) -> impl Iterator<Item = VertexId> {
        (0..self.vertices.len()).map(VertexId)
    }

    /// Iterates over all edge ids without borrowing the graph.
    pub fn edge_ids(&self) -> impl Iterator<Item = EdgeId> {
        (0..self.edges.len()).map(EdgeId)
    }

    /// Resolves a vertex value to its id.
    pub fn vertex(&self, value: &V) -> Result<VertexId, Error> {
        self.lookup.get(value).copied().ok_or(Error::UnknownVertex)
    }

    pub fn contains(&self, value: &V) -> bool {
        self.lookup.contains_key(value)
    }

    pub fn value(&self, vertex: VertexId) -> &V {
        &self.vertices[vertex.0].value
    }

    pub fn balance(&self, vertex: VertexId) -> W {
        self.vertices[vertex.0].balance
    }

    pub fn set_balance(&mut self, vertex: VertexId, balance: W) {
        self.vertices[vertex.0].balance = balance;
    }

    pub fn pseudo_balance(&self, vertex: VertexId) -> W {
        self.vertices[vertex.0].pseudo_balance
    }

    pub fn set_pseudo_balance(&mut self, vertex: VertexId, pseudo_balance: W) {
        self.vertices[vertex.0].pseudo_balance = pseudo_balance;
    }

    pub fn endpoints(&self, edge: EdgeId) -> (VertexId, VertexId) {
        let edge = &self.edges[edge.0];
        (edge.origin, edge.target)
    }

    pub fn origin(&self, edge: EdgeId) -> VertexId {
        self.edges[edge.0].origin
    }

    pub fn target(&self, edge: EdgeId) -> VertexId {
        self.edges[edge.0].target
    }

    /// Returns the endpoint of `edge` opposite to `vertex`.
    ///
    /// Panics if `vertex` is not an endpoint of `edge`.
    pub fn opposite(&self, edge: EdgeId, vertex: VertexId) -> VertexId {
        let record = &self.edges[edge.0];
        if record.origin == vertex {
            record.target
        } else if record.target == vertex {
            record.origin
        } else {
            panic!("vertex {vertex:?} is not an endpoint of edge {edge:?}");
        }
    }

    pub fn weight(&self, edge: EdgeId) -> W {
        self.edges[edge.0].weight
    }

    pub fn flow(&self, edge: EdgeId) -> W {
        self.edges[edge.0].flow
    }

    pub fn set_flow(&mut self, edge: EdgeId, flow: W) {
        self.edges[edge.0].flow = flow;
    }

    pub fn cost(&self, edge: EdgeId) -> W {
        self.edges[edge.0].cost
    }

    /// Edges incident to `vertex`: outgoing edges when the graph is
    /// directed, all incident edges otherwise.
    pub fn edges_of(&self, vertex: VertexId) -> &[EdgeId] {
        &self.adjacency[vertex.0]
    }

    /// Vertices reachable from `vertex` over a single edge.
    pub fn adjacent(&self, vertex: VertexId) -> impl Iterator<Item = VertexId> + '_ {
        self.adjacency[vertex.0]
            .iter()
            .map(move |&edge| self.opposite(edge, vertex))
    }

    /// First edge leading from `origin` to `target`. Parallel edges stay
    /// addressable through their [`EdgeId`]s.
    pub fn edge_between(&self, origin: VertexId, target: VertexId) -> Result<EdgeId, Error> {
        self.adjacency[origin.0]
            .iter()
            .copied()
            .find(|&edge| self.opposite(edge, origin) == target)
            .ok_or(Error::NotConnected)
    }

    pub fn are_connected(&self, origin: VertexId, target: VertexId) -> bool {
        self.edge_between(origin, target).is_ok()
    }

    /// Sum of all edge weights, e.g. the length of a path graph or the
    /// weight of a spanning tree.
    pub fn total_weight(&self) -> W {
        self.edges
            .iter()
            .fold(W::zero(), |total, edge| total + edge.weight)
    }

    /// Flow leaving `vertex` minus flow entering it. Self loops cancel out.
    ///
    /// This is the flow value when read at the source of a max flow, and
    /// the quantity that must match the vertex balance in a b-flow.
    pub fn net_outflow(&self, vertex: VertexId) -> W {
        let mut value = W::zero();
        for edge in &self.edges {
            if edge.origin == vertex {
                value += edge.flow;
            }
            if edge.target == vertex {
                value -= edge.flow;
            }
        }
        value
    }
}

/// Builder accumulating vertices and edges before freezing them into a
/// [`Graph`]. Endpoints are referenced by value, so vertices must be added
/// before the edges that use them.
#[derive(Clone, Debug)]
pub struct GraphBuilder<V, W> {
    directed: bool,
    vertices: Vec<Vertex<V, W>>,
    edges: Vec<Edge<W>>,
    lookup: BTreeMap<V, VertexId>,
}

impl<V, W> GraphBuilder<V, W>
where
    V: VertexValue,
    W: Weight,
{
    pub fn directed() -> Self {
        Self::new(true)
    }

    pub fn undirected() -> Self {
        Self::new(false)
    }

    fn new(directed: bool) -> Self {
        Self {
            directed,
            vertices: Vec::new(),
            edges: Vec::new(),
            lookup: BTreeMap::new(),
        }
    }

    /// Adds a vertex with a zero balance. Re-adding an existing value is a
    /// no-op that returns the existing id.
    pub fn add_vertex(&mut self, value: V) -> VertexId {
        if let Some(&existing) = self.lookup.get(&value) {
            return existing;
        }
        let id = VertexId(self.vertices.len());
        self.lookup.insert(value.clone(), id);
        self.vertices.push(Vertex {
            value,
            balance: W::zero(),
            pseudo_balance: W::zero(),
        });
        id
    }

    /// Adds a vertex with the given balance, or updates the balance if the
    /// value is already present.
    pub fn add_vertex_with_balance(&mut self, value: V, balance: W) -> VertexId {
        let id = self.add_vertex(value);
        self.vertices[id.0].balance = balance;
        id
    }

    pub fn add_vertices(&mut self, values: impl IntoIterator<Item = V>) {
        for value in values {
            self.add_vertex(value);
        }
    }

    /// Adds an edge with a zero cost between two previously added vertices.
    pub fn add_edge(&mut self, origin: V, target: V, weight: W) -> Result<EdgeId, Error> {
        self.add_edge_with_cost(origin, target, weight, W::zero())
    }

    pub fn add_edge_with_cost(
        &mut self,
        origin: V,
        target: V,
        weight: W,
        cost: W,
    ) -> Result<EdgeId, Error> {
        let origin = *self.lookup.get(&origin).ok_or(Error::UnknownVertex)?;
        let target = *self.lookup.get(&target).ok_or(Error::UnknownVertex)?;
        let id = EdgeId(self.edges.len());
        self.edges.push(Edge {
            origin,
            target,
            weight,
            flow: W::zero(),
            cost,
        });
        Ok(id)
    }

    pub fn build(self) -> Graph<V, W> {
        let mut adjacency = vec![Vec::new(); self.vertices.len()];
        for (index, edge) in self.edges.iter().enumerate() {
            adjacency[edge.origin.0].push(EdgeId(index));
            if !self.directed && edge.origin != edge.target {
                adjacency[edge.target.0].push(EdgeId(index));
            }
        }
        Graph {
            directed: self.directed,
            vertices: self.vertices,
            edges: self.edges,
            adjacency,
            lookup: self.lookup,
        }
    }
}
