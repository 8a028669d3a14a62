//! CLI front end for the distributed Bellman-Ford SSSP engine.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use bellman_pgas::error::SsspError;
use bellman_pgas::loader::DirectionMode;
use bellman_pgas::orchestrator::{self, RunConfig};

/// Run a synchronous, distributed Bellman-Ford single-source shortest-paths
/// search over a simulated PGAS cluster.
#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Cli {
    /// Global source vertex.
    source: i64,

    /// Interpretation of input edges: "directed" or "undirected".
    mode: String,

    /// Path to the ASCII graph file.
    graph_path: PathBuf,

    /// Number of timed iterations to run.
    iterations: i64,

    /// Number of simulated peers.
    #[arg(long, default_value_t = 4)]
    peers: usize,
}

fn main() -> ExitCode {
    bellman_pgas::logging::init();

    let cli = Cli::parse();

    let mode = match cli.mode.parse::<DirectionMode>() {
        Ok(mode) => mode,
        Err(err) => return report_error(&err),
    };
    if cli.iterations <= 0 {
        return report_error(&SsspError::NonPositiveIterationCount(cli.iterations));
    }

    let config = RunConfig {
        source: cli.source,
        mode,
        graph_path: cli.graph_path,
        iterations: cli.iterations as usize,
        peer_count: cli.peers,
    };

    match orchestrator::run(&config) {
        Ok(report) => {
            print_report(&report);
            ExitCode::SUCCESS
        }
        Err(err) => report_error(&err),
    }
}

fn print_report(report: &orchestrator::RunReport) {
    println!("vertices: {}  peers: {}", report.vertex_count, report.peer_count);
    for (i, iter) in report.iterations.iter().enumerate() {
        println!(
            "iteration {i}: {:.6}s  {} edges  {:.2} TEPS",
            iter.wall_time_secs, iter.traversed_edges, iter.teps
        );
    }
    println!(
        "mean time: arithmetic {:.6}s  harmonic {:.6}s",
        report.arithmetic_mean_time, report.harmonic_mean_time
    );
    println!(
        "mean TEPS: arithmetic {:.2}  harmonic {:.2}",
        report.arithmetic_mean_teps, report.harmonic_mean_teps
    );
}

fn report_error(err: &SsspError) -> ExitCode {
    eprintln!("error: {err}");
    ExitCode::FAILURE
}
