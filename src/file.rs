//! Tab separated text formats for weighted and balance graphs.
//!
//! The weighted layout declares vertices through a single count field and
//! one edge per following line, with an optional weight column. The
//! balance layout starts the same way, then carries one balance per
//! declared vertex and four-field edge lines with cost and capacity.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::str::FromStr;

use displaydoc::Display;

use crate::graph::{Graph, GraphBuilder};

/// Conditions raised while reading a graph from text.
#[derive(Debug, Display)]
pub enum ParseError {
    /// could not read the graph file: {0}
    Io(std::io::Error),
    /// line {line}: expected a number
    InvalidNumber { line: usize },
    /// line {line}: expected {expected} tab separated fields
    ExpectedFields { line: usize, expected: usize },
    /// line {line}: edge endpoint was never declared
    UnknownEndpoint { line: usize },
    /// the file ended early; expected line {line}
    UnexpectedEnd { line: usize },
}

impl std::error::Error for ParseError {}

impl From<std::io::Error> for ParseError {
    fn from(source: std::io::Error) -> Self {
        Self::Io(source)
    }
}

fn field<T: FromStr>(text: &str, line: usize) -> Result<T, ParseError> {
    text.trim()
        .parse()
        .map_err(|_| ParseError::InvalidNumber { line })
}

fn add_parsed_edge(
    builder: &mut GraphBuilder<i32, f64>,
    origin: &str,
    target: &str,
    weight: f64,
    line: usize,
) -> Result<(), ParseError> {
    let origin: i32 = field(origin, line)?;
    let target: i32 = field(target, line)?;
    builder
        .add_edge(origin, target, weight)
        .map_err(|_| ParseError::UnknownEndpoint { line })?;
    Ok(())
}

/// Reads the weighted layout: a line holding `n` declares the vertices
/// `0..n`, a `from\tto` line adds an edge of weight zero and a
/// `from\tto\tweight` line adds a weighted edge.
pub fn read_weighted_graph<R: BufRead>(
    reader: R,
    directed: bool,
) -> Result<Graph<i32, f64>, ParseError> {
    let mut builder = if directed {
        GraphBuilder::directed()
    } else {
        GraphBuilder::undirected()
    };
    for (index, text) in reader.lines().enumerate() {
        let number = index + 1;
        let text = text?;
        if text.is_empty() {
            continue;
        }
        let fields: Vec<&str> = text.split('\t').collect();
        match fields.as_slice() {
            [count] => {
                let count: i32 = field(count, number)?;
                builder.add_vertices(0..count);
            }
            [origin, target] => add_parsed_edge(&mut builder, origin, target, 0.0, number)?,
            [origin, target, weight] => {
                let weight: f64 = field(weight, number)?;
                add_parsed_edge(&mut builder, origin, target, weight, number)?;
            }
            _ => {
                return Err(ParseError::ExpectedFields {
                    line: number,
                    expected: 3,
                })
            }
        }
    }
    Ok(builder.build())
}

/// Reads the balance layout: the count line, one balance line per vertex
/// and `from\tto\tcost\tcapacity` edge lines. Balance graphs are always
/// directed; the capacity lands on the edge weight.
pub fn read_balance_graph<R: BufRead>(reader: R) -> Result<Graph<i32, f64>, ParseError> {
    let mut lines = reader.lines().enumerate();
    let first = match lines.next() {
        Some((_, text)) => text?,
        None => return Err(ParseError::UnexpectedEnd { line: 1 }),
    };
    let count: i32 = field(&first, 1)?;

    let mut builder = GraphBuilder::directed();
    let mut number = 1;
    for value in 0..count {
        number += 1;
        let text = match lines.next() {
            Some((_, text)) => text?,
            None => return Err(ParseError::UnexpectedEnd { line: number }),
        };
        let balance: f64 = field(&text, number)?;
        builder.add_vertex_with_balance(value, balance);
    }

    for (index, text) in lines {
        let number = index + 1;
        let text = text?;
        if text.is_empty() {
            continue;
        }
        let fields: Vec<&str> = text.split('\t').collect();
        let (origin, target, cost, capacity) = match fields.as_slice() {
            [origin, target, cost, capacity] => (*origin, *target, *cost, *capacity),
            _ => {
                return Err(ParseError::ExpectedFields {
                    line: number,
                    expected: 4,
                })
            }
        };
        let origin: i32 = field(origin, number)?;
        let target: i32 = field(target, number)?;
        let cost: f64 = field(cost, number)?;
        let capacity: f64 = field(capacity, number)?;
        builder
            .add_edge_with_cost(origin, target, capacity, cost)
            .map_err(|_| ParseError::UnknownEndpoint { line: number })?;
    }
    Ok(builder.build())
}

/// Reads the weighted layout from a file on disk.
pub fn load_weighted_graph(
    path: impl AsRef<Path>,
    directed: bool,
) -> Result<Graph<i32, f64>, ParseError> {
    read_weighted_graph(BufReader::new(File::open(path)?), directed)
}

/// Reads the balance layout from a file on disk.
pub fn load_balance_graph(path: impl AsRef<Path>) -> Result<Graph<i32, f64>, ParseError> {
    read_balance_graph(BufReader::new(File::open(path)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weighted_lines_may_carry_one_two_or_three_fields() {
        let text = "3\n0\t1\n1\t2\t2.5\n";
        let graph = read_weighted_graph(text.as_bytes(), false).unwrap();
        assert!(!graph.is_directed());
        assert_eq!(graph.vertex_count(), 3);
        assert_eq!(graph.edge_count(), 2);
        let plain = graph
            .edge_between(graph.vertex(&0).unwrap(), graph.vertex(&1).unwrap())
            .unwrap();
        assert_eq!(graph.weight(plain), 0.0);
        let weighted = graph
            .edge_between(graph.vertex(&1).unwrap(), graph.vertex(&2).unwrap())
            .unwrap();
        assert_eq!(graph.weight(weighted), 2.5);
    }

    #[test]
    fn numbers_that_do_not_parse_name_their_line() {
        let text = "2\n0\tone\t1.0\n";
        let outcome = read_weighted_graph(text.as_bytes(), true);
        assert!(matches!(
            outcome,
            Err(ParseError::InvalidNumber { line: 2 })
        ));
    }

    #[test]
    fn undeclared_endpoints_are_rejected() {
        let text = "2\n0\t7\t1.0\n";
        let outcome = read_weighted_graph(text.as_bytes(), true);
        assert!(matches!(
            outcome,
            Err(ParseError::UnknownEndpoint { line: 2 })
        ));
    }

    #[test]
    fn balance_files_set_balances_costs_and_capacities() {
        let text = "2\n4\n-4\n0\t1\t2\t10\n";
        let graph = read_balance_graph(text.as_bytes()).unwrap();
        assert!(graph.is_directed());
        assert_eq!(graph.vertex_count(), 2);
        let source = graph.vertex(&0).unwrap();
        let target = graph.vertex(&1).unwrap();
        assert_eq!(graph.balance(source), 4.0);
        assert_eq!(graph.balance(target), -4.0);
        let edge = graph.edge_between(source, target).unwrap();
        assert_eq!(graph.weight(edge), 10.0);
        assert_eq!(graph.cost(edge), 2.0);
    }

    #[test]
    fn truncated_balance_sections_name_the_missing_line() {
        let text = "3\n1.0\n";
        let outcome = read_balance_graph(text.as_bytes());
        assert!(matches!(
            outcome,
            Err(ParseError::UnexpectedEnd { line: 3 })
        ));
    }

    #[test]
    fn balance_edges_need_exactly_four_fields() {
        let text = "1\n0\n0\t0\t1\n";
        let outcome = read_balance_graph(text.as_bytes());
        assert!(matches!(
            outcome,
            Err(ParseError::ExpectedFields {
                line: 3,
                expected: 4
            })
        ));
    }
}
