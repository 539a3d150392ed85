//! This module defines the bounded enumeration of alternate simple paths
//! between two anchor nodes. The search runs over a masked view of the
//! graph: a set of excluded node indexes checked during traversal, which
//! behaves like an induced subgraph without copying anything.

use petgraph::graph::NodeIndex;
use rustc_hash::FxHashSet;

use crate::common::graph_data::RouteGraph;

/// Build the excluded-node mask for a detour search around one segment of a
/// reference path: every node of the path except the segment's two anchors.
/// This forces any alternate found between the anchors to stay off the rest
/// of the reference path
pub fn excluded_for_segment(
    path: &[NodeIndex],
    segment: usize,
) -> FxHashSet<NodeIndex> {
    path.iter()
        .enumerate()
        .filter(|(inx, _)| *inx != segment && *inx != segment + 1)
        .map(|(_, node)| *node)
        .collect()
}

/// Enumerate every simple path from source to target whose edge count does
/// not exceed the cutoff, ignoring nodes in the excluded mask. A node
/// reachable over several parallel edges is only stepped to once; the choice
/// between parallel edges happens later, when the path is resolved.
///
/// A cutoff below one is treated as "no paths", not an error. Likewise a
/// search from a node to itself yields nothing.
pub fn simple_paths(
    graph: &RouteGraph,
    source: NodeIndex,
    target: NodeIndex,
    cutoff: usize,
    excluded: &FxHashSet<NodeIndex>,
) -> Vec<Vec<NodeIndex>> {
    if cutoff < 1
        || source == target
        || excluded.contains(&source)
        || excluded.contains(&target)
    {
        return Vec::new();
    }

    let mut found = Vec::<Vec<NodeIndex>>::new();
    let mut path = vec![source];
    let mut visited = FxHashSet::<NodeIndex>::default();
    visited.insert(source);

    extend_paths(
        graph,
        source,
        target,
        cutoff,
        excluded,
        &mut path,
        &mut visited,
        &mut found,
    );

    found
}

/// Depth-first extension of the current branch. The visited set tracks the
/// nodes of the branch only, so alternates through shared intermediates are
/// still found once the branch backtracks
fn extend_paths(
    graph: &RouteGraph,
    current: NodeIndex,
    target: NodeIndex,
    cutoff: usize,
    excluded: &FxHashSet<NodeIndex>,
    path: &mut Vec<NodeIndex>,
    visited: &mut FxHashSet<NodeIndex>,
    found: &mut Vec<Vec<NodeIndex>>,
) {
    // Parallel edges surface the same neighbour repeatedly, step to it once
    let mut stepped = FxHashSet::<NodeIndex>::default();

    for neighbour in graph.neighbors(current) {
        if !stepped.insert(neighbour) {
            continue;
        }

        if neighbour == target {
            let mut complete = path.clone();
            complete.push(target);
            found.push(complete);
            continue;
        }

        if visited.contains(&neighbour) || excluded.contains(&neighbour) {
            continue;
        }

        // One edge to reach the neighbour, at least one more to reach the
        // target
        if path.len() >= cutoff {
            continue;
        }

        path.push(neighbour);
        visited.insert(neighbour);
        extend_paths(
            graph, neighbour, target, cutoff, excluded, path, visited, found,
        );
        visited.remove(&neighbour);
        path.pop();
    }
}
