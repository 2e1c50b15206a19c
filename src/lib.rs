#![deny(
    warnings,
    trivial_casts,
    trivial_numeric_casts,
    unused_import_braces,
    unused_qualifications,
    rust_2018_idioms
)]
#![forbid(unsafe_code)]

//! Flow network algorithms over a typed graph arena.
//!
//! Graphs are assembled through [`GraphBuilder`] and addressed by
//! [`VertexId`]/[`EdgeId`] handles. The [`algo`] modules cover traversal,
//! shortest paths, spanning trees, maximum flow, bipartite matching and
//! minimum cost balance flows; [`file`] reads the tab separated text
//! formats the algorithms are usually fed with.

pub mod algo;
pub mod error;
pub mod file;
pub mod graph;
pub mod node;
pub mod weight;

pub use error::Error;
pub use graph::{EdgeId, Graph, GraphBuilder, VertexId, VertexValue};
pub use node::Node;
pub use weight::{SignedWeight, Weight};
