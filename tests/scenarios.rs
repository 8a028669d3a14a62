//! End-to-end scenarios covering a single edge, a path, a tied diamond,
//! negative edges without a negative cycle, an unreachable vertex, and
//! parallel edges. Each scenario runs across several peer counts.

mod common;

use bellman_pgas::loader::DirectionMode;
use bellman_pgas::orchestrator::{run, RunConfig};
use bellman_pgas::state::{INFINITE_DISTANCE, NO_PREDECESSOR};

fn run_scenario(content: &str, source: i64, mode: DirectionMode, peer_count: usize) -> bellman_pgas::orchestrator::RunReport {
    let path = common::write_graph(content);
    let config = RunConfig { source, mode, graph_path: path, iterations: 1, peer_count };
    run(&config).expect("scenario run should succeed")
}

const PEER_COUNTS: [usize; 3] = [1, 2, 4];

#[test]
fn s1_single_edge() {
    for &p in &PEER_COUNTS {
        let report = run_scenario("2\n0 1 5\n", 0, DirectionMode::Directed, p);
        assert_eq!(&report.final_distance[0..2], &[0, 5], "peer_count={p}");
        assert_eq!(&report.final_predecessor[0..2], &[NO_PREDECESSOR, 0], "peer_count={p}");
    }
}

#[test]
fn s2_path() {
    for &p in &PEER_COUNTS {
        let report = run_scenario("4\n0 1 1\n1 2 1\n2 3 1\n", 0, DirectionMode::Directed, p);
        assert_eq!(&report.final_distance[0..4], &[0, 1, 2, 3], "peer_count={p}");
    }
}

#[test]
fn s3_diamond_with_tie() {
    for &p in &PEER_COUNTS {
        let report = run_scenario(
            "4\n0 1 2\n0 2 2\n1 3 3\n2 3 3\n",
            0,
            DirectionMode::Directed,
            p,
        );
        assert_eq!(&report.final_distance[0..4], &[0, 2, 2, 5], "peer_count={p}");
        let pred3 = report.final_predecessor[3];
        assert!(pred3 == 1 || pred3 == 2, "peer_count={p} predecessor[3]={pred3}");
    }
}

#[test]
fn s4_negative_edges_no_negative_cycle() {
    for &p in &PEER_COUNTS {
        let report = run_scenario("3\n0 1 4\n0 2 5\n1 2 -2\n", 0, DirectionMode::Directed, p);
        assert_eq!(&report.final_distance[0..3], &[0, 4, 2], "peer_count={p}");
    }
}

#[test]
fn s5_unreachable() {
    for &p in &PEER_COUNTS {
        let report = run_scenario("3\n0 1 7\n", 0, DirectionMode::Directed, p);
        assert_eq!(report.final_distance[0], 0, "peer_count={p}");
        assert_eq!(report.final_distance[1], 7, "peer_count={p}");
        assert_eq!(report.final_distance[2], INFINITE_DISTANCE, "peer_count={p}");
        assert_eq!(report.final_predecessor[2], NO_PREDECESSOR, "peer_count={p}");
    }
}

#[test]
fn s6_parallel_edges() {
    for &p in &PEER_COUNTS {
        let report = run_scenario("2\n0 1 10\n0 1 3\n0 1 8\n", 0, DirectionMode::Directed, p);
        assert_eq!(&report.final_distance[0..2], &[0, 3], "peer_count={p}");
    }
}

#[test]
fn out_of_range_source_is_rejected() {
    let path = common::write_graph("2\n0 1 5\n");
    let config = RunConfig {
        source: 50,
        mode: DirectionMode::Directed,
        graph_path: path,
        iterations: 1,
        peer_count: 1,
    };
    assert!(run(&config).is_err());
}

#[test]
fn undirected_symmetry_s1() {
    // distance[a] from source s equals distance[s] from source a.
    let report_from_0 = run_scenario("2\n0 1 5\n", 0, DirectionMode::Undirected, 2);
    let report_from_1 = run_scenario("2\n0 1 5\n", 1, DirectionMode::Undirected, 2);
    assert_eq!(report_from_0.final_distance[1], report_from_1.final_distance[0]);
}
