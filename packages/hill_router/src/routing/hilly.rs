//! This module defines the elevation-gain maximization engine. Starting from
//! the shortest path, it looks for climbing detours around each segment,
//! ranks them by gain density, and greedily splices them in while the total
//! length stays within the user's budget.

use petgraph::graph::NodeIndex;

use crate::common::config::RouteConfig;
use crate::common::error::Result;
use crate::common::graph_data::RouteGraph;
use crate::routing::alternates::{excluded_for_segment, simple_paths};
use crate::routing::common::{
    ResolveBy, Route, build_route, resolve_node_path, shortest_path_by_length,
    splice_segment,
};

/// A scored detour candidate between two anchor nodes of the shortest path
#[derive(Debug, Clone)]
struct Detour {
    score: f64,
    nodes: Vec<NodeIndex>,
    anchor_src: NodeIndex,
    anchor_dst: NodeIndex,
}

/// For one segment of the shortest path, find the alternate with the highest
/// gain density. The direct two-node connection is never a detour, and
/// candidates which gain nothing are dropped
fn best_detour_for_segment(
    graph: &RouteGraph,
    shortest_path: &[NodeIndex],
    segment: usize,
    cutoff: usize,
) -> Option<Detour> {
    let anchor_src = shortest_path[segment];
    let anchor_dst = shortest_path[segment + 1];

    let excluded = excluded_for_segment(shortest_path, segment);
    let candidates =
        simple_paths(graph, anchor_src, anchor_dst, cutoff, &excluded);

    let mut best: Option<Detour> = None;
    for candidate in candidates {
        if candidate.len() == 2 {
            continue;
        }

        let resolved = match resolve_node_path(
            graph,
            &candidate,
            &ResolveBy::MaxElevationGain,
        ) {
            Ok(resolved) => resolved,
            // Enumerated paths always resolve; skip rather than abort
            Err(_) => continue,
        };

        if resolved.gain <= 0.0 || resolved.dist <= 0.0 {
            continue;
        }

        let score = resolved.gain_density();

        let replace = match &best {
            None => true,
            Some(current) => score > current.score,
        };
        if replace {
            best = Some(Detour {
                score,
                nodes: candidate,
                anchor_src,
                anchor_dst,
            });
        }
    }

    best
}

/// Produce a route from source to target whose total length stays within
/// percent_shortest_path times the shortest length, favouring detours with
/// high elevation gain per meter. Splices are committed greedily in score
/// order, so each one is measured against the working path as already
/// modified by the splices before it
pub fn maximize_gain(
    graph: &RouteGraph,
    source: NodeIndex,
    target: NodeIndex,
    config: &RouteConfig,
) -> Result<Route> {
    let (shortest_len, shortest_path) =
        shortest_path_by_length(graph, source, target)?;
    let max_length = shortest_len * config.percent_shortest_path;

    // Best candidate per segment of the shortest path
    let mut detours = Vec::<Detour>::new();
    for segment in 0..shortest_path.len() - 1 {
        if let Some(detour) = best_detour_for_segment(
            graph,
            &shortest_path,
            segment,
            config.cutoff,
        ) {
            detours.push(detour);
        }
    }

    detours.sort_by(|a, b| b.score.total_cmp(&a.score));

    let mut working_path = shortest_path;

    for detour in detours {
        let spliced = match splice_segment(
            &working_path,
            detour.anchor_src,
            detour.anchor_dst,
            &detour.nodes,
        ) {
            Some(spliced) => spliced,
            None => continue,
        };

        let resolved = resolve_node_path(
            graph,
            &spliced,
            &ResolveBy::MaxElevationGain,
        )?;

        if resolved.dist <= max_length {
            working_path = spliced;
        }
    }

    let resolved =
        resolve_node_path(graph, &working_path, &ResolveBy::MaxElevationGain)?;

    build_route(graph, &working_path, resolved)
}
