#![warn(clippy::all, clippy::pedantic)]

use std::error::Error;
use std::path::{Path, PathBuf};

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use csv::Writer;
use serde::Serialize;
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};

use bflow::algo::max_flow::edmonds_karp;
use bflow::algo::min_cost_flow::{BFlow, CycleCanceling, MinCostFlow, SuccessiveShortestPath};
use bflow::algo::shortest_path::{bellman_ford_moore, dijkstra};
use bflow::algo::spanning_tree::{kruskal, prim};
use bflow::file::{load_balance_graph, load_weighted_graph};
use bflow::Graph;

#[derive(Parser)]
#[command(version, about = "flow network toolkit")]
struct Cli {
    /// Raise the log level once per occurrence
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Push the maximum flow from source to target
    MaxFlow {
        /// Weighted graph file; edge weights are read as capacities
        file: PathBuf,
        /// Source vertex
        source: i32,
        /// Target vertex
        target: i32,
        /// Write per edge flows to a CSV file
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Find a cost minimal flow satisfying all vertex balances
    MinCostFlow {
        /// Balance graph file
        file: PathBuf,
        /// Strategy to run
        #[arg(short, long, value_enum, default_value_t = Strategy::CycleCanceling)]
        strategy: Strategy,
        /// Write per edge flows to a CSV file
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Find a shortest path between two vertices
    ShortestPath {
        /// Weighted graph file
        file: PathBuf,
        /// Source vertex
        source: i32,
        /// Target vertex
        target: i32,
        /// Read the file as a directed graph
        #[arg(short, long)]
        directed: bool,
        /// Algorithm to run
        #[arg(short, long, value_enum, default_value_t = PathAlgorithm::BellmanFordMoore)]
        algorithm: PathAlgorithm,
    },
    /// Compute a minimum spanning tree of an undirected graph
    SpanningTree {
        /// Weighted graph file
        file: PathBuf,
        /// Algorithm to run
        #[arg(short, long, value_enum, default_value_t = TreeAlgorithm::Kruskal)]
        algorithm: TreeAlgorithm,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Strategy {
    CycleCanceling,
    SuccessiveShortestPath,
}

#[derive(Clone, Copy, ValueEnum)]
enum PathAlgorithm {
    BellmanFordMoore,
    Dijkstra,
}

#[derive(Clone, Copy, ValueEnum)]
enum TreeAlgorithm {
    Kruskal,
    Prim,
}

#[derive(Serialize)]
struct FlowRecord {
    origin: i32,
    target: i32,
    capacity: f64,
    flow: f64,
    cost: f64,
}

fn init_logging(verbose: u8) -> Result<(), Box<dyn Error>> {
    let level = match verbose {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    TermLogger::init(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )?;
    Ok(())
}

fn write_flow_csv(graph: &Graph<i32, f64>, path: &Path) -> Result<(), Box<dyn Error>> {
    let mut writer = Writer::from_path(path)?;
    for edge in graph.edge_ids() {
        let (origin, target) = graph.endpoints(edge);
        writer.serialize(FlowRecord {
            origin: *graph.value(origin),
            target: *graph.value(target),
            capacity: graph.weight(edge),
            flow: graph.flow(edge),
            cost: graph.cost(edge),
        })?;
    }
    writer.flush()?;
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;

    match cli.command {
        Command::MaxFlow {
            file,
            source,
            target,
            out,
        } => {
            let mut graph = load_weighted_graph(&file, true)?;
            let source = graph.vertex(&source)?;
            let target = graph.vertex(&target)?;
            let value = edmonds_karp(&mut graph, source, target)?;
            log::info!("maximum flow: {value}");
            println!("{value}");
            if let Some(out) = out {
                write_flow_csv(&graph, &out)?;
            }
        }
        Command::MinCostFlow {
            file,
            strategy,
            out,
        } => {
            let mut graph = load_balance_graph(&file)?;
            let outcome = match strategy {
                Strategy::CycleCanceling => CycleCanceling.min_cost_flow(&mut graph)?,
                Strategy::SuccessiveShortestPath => {
                    SuccessiveShortestPath.min_cost_flow(&mut graph)?
                }
            };
            match outcome {
                BFlow::Optimal { cost } => {
                    log::info!("minimal cost: {cost}");
                    println!("{cost}");
                    if let Some(out) = out {
                        write_flow_csv(&graph, &out)?;
                    }
                }
                BFlow::Infeasible => {
                    log::warn!("the balances cannot be satisfied");
                    println!("infeasible");
                }
            }
        }
        Command::ShortestPath {
            file,
            source,
            target,
            directed,
            algorithm,
        } => {
            let graph = load_weighted_graph(&file, directed)?;
            let source = graph.vertex(&source)?;
            let target = graph.vertex(&target)?;
            let path = match algorithm {
                PathAlgorithm::BellmanFordMoore => {
                    bellman_ford_moore::shortest_path(&graph, source, target)?
                }
                PathAlgorithm::Dijkstra => dijkstra::shortest_path(&graph, source, target)?,
            };
            log::info!("path holds {} edges", path.edge_count());
            println!("{}", path.total_weight());
        }
        Command::SpanningTree { file, algorithm } => {
            let graph = load_weighted_graph(&file, false)?;
            let tree = match algorithm {
                TreeAlgorithm::Kruskal => kruskal(&graph)?,
                TreeAlgorithm::Prim => prim(&graph)?,
            };
            log::info!("tree holds {} edges", tree.edge_count());
            println!("{}", tree.total_weight());
        }
    }
    Ok(())
}
