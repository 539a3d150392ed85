//! This module defines the elevation-gain minimization engine. Each
//! iteration assigns every edge a transient grade weight blending normalized
//! length and normalized elevation gain, runs a shortest path under that
//! weight, and keeps the result if it fits the length budget. The blend
//! coefficient is driven either by binary search or by an evenly-stepped
//! sweep; every feasible path seen is retained, and the flattest one wins.

use petgraph::graph::NodeIndex;

use crate::common::config::RouteConfig;
use crate::common::error::{Error, Result};
use crate::common::graph_data::RouteGraph;
use crate::routing::common::{
    GradeTable, ResolveBy, ResolvedPath, Route, build_route,
    resolve_node_path, shortest_path_by_grade, shortest_path_by_length,
};

/// How the blend coefficient moves between iterations
enum AlphaSchedule {
    /// Adaptive bisection between a feasible floor and an infeasible ceiling
    Bisect,
    /// Fixed decrements from 1.0 down to 0.0, no adaptation
    Linear,
}

/// A feasible path recorded during the search
struct PathCandidate {
    nodes: Vec<NodeIndex>,
    resolved: ResolvedPath,
}

/// Sum length and elevation gain over every edge in the graph. The totals
/// are used purely as normalization constants for the grade blend
fn edge_totals(graph: &RouteGraph) -> (f64, f64) {
    let mut total_dist = 0.0;
    let mut total_gain = 0.0;

    for edge_inx in graph.edge_indices() {
        if let Some(edata) = graph.edge_weight(edge_inx) {
            total_dist += edata.distance;
            total_gain += edata.elevation_gain;
        }
    }

    (total_dist, total_gain)
}

/// Build the transient grade weights for one iteration:
/// alpha * normalized gain + (1 - alpha) * normalized length. The table is
/// private to the calling search, so concurrent searches never observe each
/// other's weights
fn build_grade_table(
    graph: &RouteGraph,
    alpha: f64,
    total_dist: f64,
    total_gain: f64,
) -> GradeTable {
    let mut grades: GradeTable = vec![0.0; graph.edge_count()];

    for edge_inx in graph.edge_indices() {
        if let Some(edata) = graph.edge_weight(edge_inx) {
            // A graph without any climbing contributes no gain term
            let gain_term = if total_gain > 0.0 {
                alpha * edata.elevation_gain / total_gain
            } else {
                0.0
            };
            let dist_term = if total_dist > 0.0 {
                (1.0 - alpha) * edata.distance / total_dist
            } else {
                0.0
            };
            grades[edge_inx.index()] = gain_term + dist_term;
        }
    }

    grades
}

/// Shared search driver for both alpha schedules
fn run_search(
    graph: &RouteGraph,
    source: NodeIndex,
    target: NodeIndex,
    config: &RouteConfig,
    schedule: AlphaSchedule,
) -> Result<Route> {
    if config.percent_shortest_path < 1.0 {
        return Err(Error::InvalidConstraint {
            value: config.percent_shortest_path,
        });
    }

    // The shortest path by length seeds the candidate set, so the result can
    // never gain more than the unconstrained baseline
    let (_, min_dist_path) = shortest_path_by_length(graph, source, target)?;
    let seed =
        resolve_node_path(graph, &min_dist_path, &ResolveBy::MinLength)?;
    let max_dist = seed.dist * config.percent_shortest_path;

    let (total_dist, total_gain) = edge_totals(graph);

    let mut candidates = vec![PathCandidate {
        nodes: min_dist_path,
        resolved: seed,
    }];

    let mut alpha_min = 0.0;
    let mut alpha_max = 1.0;
    let mut alpha = 1.0;

    for iteration in 0..config.iterations {
        let grades = build_grade_table(graph, alpha, total_dist, total_gain);

        let (_, path) =
            shortest_path_by_grade(graph, source, target, &grades)?;
        let resolved =
            resolve_node_path(graph, &path, &ResolveBy::MinGrade(&grades))?;

        if resolved.dist <= max_dist {
            candidates.push(PathCandidate {
                nodes: path,
                resolved,
            });
            alpha_min = alpha;

            // The gain-only weighting is already within budget; no blend
            // can improve on it
            if alpha == 1.0 {
                break;
            }
        } else {
            alpha_max = alpha;
        }

        alpha = match schedule {
            AlphaSchedule::Bisect => (alpha_min + alpha_max) / 2.0,
            AlphaSchedule::Linear => {
                1.0 - (iteration + 1) as f64 / config.iterations as f64
            }
        };
    }

    let best = match candidates
        .into_iter()
        .min_by(|a, b| a.resolved.gain.total_cmp(&b.resolved.gain))
    {
        Some(best) => best,
        // The seed candidate is always present
        None => return Err(Error::EmptyPath),
    };

    build_route(graph, &best.nodes, best.resolved)
}

/// Produce the path with the least total elevation gain whose length stays
/// within percent_shortest_path times the shortest length, by binary search
/// over the grade blend coefficient
pub fn minimize_gain(
    graph: &RouteGraph,
    source: NodeIndex,
    target: NodeIndex,
    config: &RouteConfig,
) -> Result<Route> {
    run_search(graph, source, target, config, AlphaSchedule::Bisect)
}

/// Comparison baseline for the binary search: identical candidate retention
/// and result selection, but the blend coefficient sweeps down in equal
/// steps instead of bisecting
pub fn minimize_gain_linear(
    graph: &RouteGraph,
    source: NodeIndex,
    target: NodeIndex,
    config: &RouteConfig,
) -> Result<Route> {
    run_search(graph, source, target, config, AlphaSchedule::Linear)
}
