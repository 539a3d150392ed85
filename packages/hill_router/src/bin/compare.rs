//! Offline comparison harness: run the flat and hilly engines against the
//! random baseline over repeated trials with random endpoints, and report
//! the mean elevation gain of each. Trials run in parallel; the engines
//! only ever read from the shared graph.

use hill_router::common::config::{RouteConfig, RouteMode};
use hill_router::common::graph_data::RouteGraph;
use hill_router::loading::file::load_graph_file;
use hill_router::loading::petgraph::create_graph;
use hill_router::routing::baseline::RandomDetours;
use hill_router::routing::flat::minimize_gain;
use hill_router::routing::hilly::maximize_gain;

use indicatif::ProgressBar;
use petgraph::graph::NodeIndex;
use rand::seq::SliceRandom;
use rayon::prelude::*;
use std::env;
use std::path::Path;

struct TrialResult {
    flat_gain: f64,
    hilly_gain: f64,
    random_gain: f64,
}

/// Run all three engines over one endpoint pair. Pairs which turn out to be
/// disconnected are skipped rather than aborting the run
fn run_trial(
    graph: &RouteGraph,
    source: NodeIndex,
    target: NodeIndex,
    percent: f64,
) -> Option<TrialResult> {
    let flat = minimize_gain(
        graph,
        source,
        target,
        &RouteConfig::new(RouteMode::Flat, percent),
    )
    .ok()?;

    let hilly = maximize_gain(
        graph,
        source,
        target,
        &RouteConfig::new(RouteMode::Hilly, percent),
    )
    .ok()?;

    let generator = RandomDetours::new(
        graph,
        source,
        target,
        &RouteConfig::new(RouteMode::Random, percent),
    )
    .ok()?;
    let random = generator.sample(graph, &mut rand::thread_rng()).ok()?;

    Some(TrialResult {
        flat_gain: flat.metrics.gain,
        hilly_gain: hilly.metrics.gain,
        random_gain: random.metrics.gain,
    })
}

fn main() {
    let args: Vec<String> = env::args().collect();

    let graph_path = args
        .get(1)
        .cloned()
        .unwrap_or_else(|| "city_graph.json".to_string());
    let trials: usize =
        args.get(2).and_then(|raw| raw.parse().ok()).unwrap_or(25);
    let percent: f64 =
        args.get(3).and_then(|raw| raw.parse().ok()).unwrap_or(1.5);

    let graph_file = load_graph_file(Path::new(&graph_path))
        .expect("Error reading the city graph file!");
    let graph = create_graph(graph_file.nodes, graph_file.edges);

    let node_list: Vec<NodeIndex> = graph.node_indices().collect();
    if node_list.len() < 2 {
        println!("The graph needs at least two nodes to draw endpoints from");
        return;
    }

    // Draw the endpoint pairs up front so trials can run in parallel
    let mut rng = rand::thread_rng();
    let pairs: Vec<(NodeIndex, NodeIndex)> = (0..trials)
        .map(|_| {
            let chosen: Vec<&NodeIndex> =
                node_list.choose_multiple(&mut rng, 2).collect();
            (*chosen[0], *chosen[1])
        })
        .collect();

    let bar = ProgressBar::new(trials as u64);

    let results: Vec<TrialResult> = pairs
        .par_iter()
        .filter_map(|(source, target)| {
            let result = run_trial(&graph, *source, *target, percent);
            bar.inc(1);
            result
        })
        .collect();

    bar.finish();

    if results.is_empty() {
        println!("No connected endpoint pairs were drawn, nothing to report");
        return;
    }

    let count = results.len() as f64;
    let flat_mean =
        results.iter().map(|r| r.flat_gain).sum::<f64>() / count;
    let hilly_mean =
        results.iter().map(|r| r.hilly_gain).sum::<f64>() / count;
    let random_mean =
        results.iter().map(|r| r.random_gain).sum::<f64>() / count;

    println!("{:?} of {:?} trials found a route", results.len(), trials);
    println!(
        "Mean elevation gain: flat {:.1}m, random {:.1}m, hilly {:.1}m",
        flat_mean, random_mean, hilly_mean
    );
}
