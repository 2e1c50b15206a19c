//! Shortest path algorithms.
//!
//! [`bellman_ford_moore`] handles arbitrary edge weights and doubles as the
//! relaxation engine behind the min-cost-flow strategies; [`dijkstra`] is
//! the faster choice when all weights are non-negative.

pub mod bellman_ford_moore;
pub mod dijkstra;
