pub mod geometry;
pub mod metrics;

use crate::routing::common::geometry::RouteGeometry;
use crate::routing::common::metrics::RouteMetrics;

use petgraph::algo::astar;
use petgraph::graph::{EdgeReference, NodeIndex};
use petgraph::visit::EdgeRef;

use serde::Serialize;
use std::hash::{DefaultHasher, Hash, Hasher};

use crate::common::error::{Error, Result};
use crate::common::graph_data::{EdgeData, RouteGraph, edges_between, node_data};

/// Transient per-search edge weights, indexed by petgraph edge index. Built
/// fresh for every minimization iteration so that nothing is ever written
/// into the shared graph
pub type GradeTable = Vec<f64>;

/// Selects which edge wins when several parallel edges connect the same
/// ordered node pair
pub enum ResolveBy<'a> {
    /// Pick the edge with the largest elevation gain
    MaxElevationGain,
    /// Pick the edge with the smallest length
    MinLength,
    /// Pick the edge with the smallest transient grade weight
    MinGrade(&'a GradeTable),
}

/// The outcome of resolving a node path against the graph: aggregate length
/// and elevation gain over the chosen edges, plus the chosen key per step
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedPath {
    pub dist: f64,
    pub gain: f64,
    pub keys: Vec<u32>,
}

impl ResolvedPath {
    /// Elevation gain per meter travelled, used to rank detours
    pub fn gain_density(&self) -> f64 {
        if self.dist > 0.0 {
            self.gain / self.dist
        } else {
            0.0
        }
    }
}

/// Build the NoPath error for a disconnected source/target pair
fn no_path(graph: &RouteGraph, source: NodeIndex, target: NodeIndex) -> Error {
    let source_id = graph.node_weight(source).map(|n| n.id).unwrap_or_default();
    let target = graph.node_weight(target).map(|n| n.id).unwrap_or_default();
    Error::NoPath { source_id, target }
}

/// Compute the shortest path from source to target by edge length
pub fn shortest_path_by_length(
    graph: &RouteGraph,
    source: NodeIndex,
    target: NodeIndex,
) -> Result<(f64, Vec<NodeIndex>)> {
    astar(
        graph,
        source,
        |finish| finish == target,
        |eref| eref.weight().distance,
        |_| 0.0,
    )
    .ok_or_else(|| no_path(graph, source, target))
}

/// Compute the shortest path from source to target under the provided
/// transient grade weights
pub fn shortest_path_by_grade(
    graph: &RouteGraph,
    source: NodeIndex,
    target: NodeIndex,
    grades: &GradeTable,
) -> Result<(f64, Vec<NodeIndex>)> {
    astar(
        graph,
        source,
        |finish| finish == target,
        |eref| grades[eref.id().index()],
        |_| 0.0,
    )
    .ok_or_else(|| no_path(graph, source, target))
}

/// For each consecutive pair in the provided node path, select the best of
/// the edges connecting them under the chosen criterion. Selection is
/// deterministic: the first strictly better edge in graph iteration order
/// wins. Paths produced by the search engines always resolve; a
/// DisconnectedPath error therefore indicates a malformed external path
pub fn resolve_node_path(
    graph: &RouteGraph,
    path: &[NodeIndex],
    by: &ResolveBy,
) -> Result<ResolvedPath> {
    if path.len() < 2 {
        return Err(Error::EmptyPath);
    }

    let mut dist = 0.0;
    let mut gain = 0.0;
    let mut keys = Vec::<u32>::with_capacity(path.len() - 1);

    for pair in path.windows(2) {
        let edges =
            edges_between(graph, pair[0], pair[1]).map_err(|err| match err {
                Error::NoEdge { src, dst } => Error::DisconnectedPath { src, dst },
                other => other,
            })?;

        let mut best: Option<(f64, EdgeReference<EdgeData>)> = None;
        for eref in edges {
            let value = match by {
                ResolveBy::MaxElevationGain => eref.weight().elevation_gain,
                ResolveBy::MinLength => eref.weight().distance,
                ResolveBy::MinGrade(grades) => grades[eref.id().index()],
            };

            let better = match &best {
                None => true,
                Some((best_value, _)) => match by {
                    ResolveBy::MaxElevationGain => value > *best_value,
                    _ => value < *best_value,
                },
            };

            if better {
                best = Some((value, eref));
            }
        }

        match best {
            Some((_, eref)) => {
                let edata = eref.weight();
                dist += edata.distance;
                gain += edata.elevation_gain;
                keys.push(edata.key);
            }
            // edges_between returned at least one edge, so this is
            // unreachable
            None => {
                return Err(Error::DisconnectedPath {
                    src: node_data(graph, pair[0])?.id,
                    dst: node_data(graph, pair[1])?.id,
                });
            }
        }
    }

    Ok(ResolvedPath { dist, gain, keys })
}

/// Zip a node path and its chosen keys into a physical edge path of
/// (src id, dst id, key) triples
pub fn to_edge_path(
    graph: &RouteGraph,
    path: &[NodeIndex],
    keys: &[u32],
) -> Result<Vec<(i64, i64, u32)>> {
    let mut edge_path = Vec::<(i64, i64, u32)>::with_capacity(keys.len());

    for (pair, key) in path.windows(2).zip(keys) {
        edge_path.push((
            node_data(graph, pair[0])?.id,
            node_data(graph, pair[1])?.id,
            *key,
        ));
    }

    Ok(edge_path)
}

/// Replace the stretch of the working path between two anchor nodes with a
/// replacement node sequence (which itself runs from the first anchor to the
/// second). Anchors are located by their first occurrence. Returns None if
/// either anchor is missing from the working path
pub fn splice_segment(
    working_path: &[NodeIndex],
    anchor_src: NodeIndex,
    anchor_dst: NodeIndex,
    replacement: &[NodeIndex],
) -> Option<Vec<NodeIndex>> {
    let src_inx = working_path.iter().position(|node| *node == anchor_src)?;
    let dst_inx = working_path.iter().position(|node| *node == anchor_dst)?;

    let mut spliced = working_path[..src_inx].to_vec();
    spliced.extend(replacement.iter());
    spliced.extend(working_path[dst_inx + 1..].iter());

    Some(spliced)
}

/// Container for a completed route. This holds the information required by
/// the webapp in order to render it, plus the resolved edge path
#[derive(Debug, Serialize)]
pub struct Route {
    pub metrics: RouteMetrics,
    pub edge_path: Vec<(i64, i64, u32)>,
    pub geometry: RouteGeometry,
    pub id: u64,
}

/// Assemble the returned route from a node path and its resolution
pub fn build_route(
    graph: &RouteGraph,
    path: &[NodeIndex],
    resolved: ResolvedPath,
) -> Result<Route> {
    let edge_path = to_edge_path(graph, path, &resolved.keys)?;

    let mut hasher = DefaultHasher::new();
    edge_path.hash(&mut hasher);
    let id = hasher.finish();

    let geometry = RouteGeometry::from_node_path(graph, path, &resolved.keys)?;

    Ok(Route {
        metrics: RouteMetrics {
            dist: resolved.dist,
            gain: resolved.gain,
        },
        edge_path,
        geometry,
        id,
    })
}
