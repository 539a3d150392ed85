//! This module defines the randomized baseline path generator. It exists to
//! give the two optimizing engines a null model to be compared against:
//! alternates are drawn uniformly at random rather than by score, with the
//! same subgraph masking and the same length budget. It never runs on the
//! production request path unless explicitly asked for.

use petgraph::graph::NodeIndex;
use rand::Rng;
use rand::seq::SliceRandom;

use crate::common::config::RouteConfig;
use crate::common::error::Result;
use crate::common::graph_data::RouteGraph;
use crate::routing::alternates::{excluded_for_segment, simple_paths};
use crate::routing::common::{
    ResolveBy, Route, build_route, resolve_node_path, shortest_path_by_length,
    splice_segment,
};

/// How often (in segments of the shortest path) an anchor is placed
const ANCHOR_INTERVAL: usize = 10;

/// Caches alternate simple paths around anchor segments of the shortest
/// path, so that repeated samples do not re-enumerate
pub struct RandomDetours {
    shortest_path: Vec<NodeIndex>,
    max_length: f64,
    alternates: Vec<Vec<Vec<NodeIndex>>>,
}

impl RandomDetours {
    /// Build the alternate-path cache for the provided endpoints. Anchors
    /// sit at every tenth segment and at the final segment; all other
    /// segments keep an empty alternate list
    pub fn new(
        graph: &RouteGraph,
        source: NodeIndex,
        target: NodeIndex,
        config: &RouteConfig,
    ) -> Result<RandomDetours> {
        let (shortest_len, shortest_path) =
            shortest_path_by_length(graph, source, target)?;
        let max_length = shortest_len * config.percent_shortest_path;

        let segments = shortest_path.len() - 1;
        let mut alternates = Vec::<Vec<Vec<NodeIndex>>>::with_capacity(segments);

        for segment in 0..segments {
            if segment % ANCHOR_INTERVAL == 0 || segment == segments - 1 {
                let excluded = excluded_for_segment(&shortest_path, segment);
                alternates.push(simple_paths(
                    graph,
                    shortest_path[segment],
                    shortest_path[segment + 1],
                    config.cutoff,
                    &excluded,
                ));
            } else {
                alternates.push(Vec::new());
            }
        }

        Ok(RandomDetours {
            shortest_path,
            max_length,
            alternates,
        })
    }

    /// Draw one random route: for each anchor segment, pick an alternate
    /// uniformly at random and splice it in, keeping the splice only if the
    /// total length stays under the budget. Anchors with nothing cached are
    /// left untouched
    pub fn sample<R: Rng>(
        &self,
        graph: &RouteGraph,
        rng: &mut R,
    ) -> Result<Route> {
        let mut working_path = self.shortest_path.clone();

        for (segment, candidates) in self.alternates.iter().enumerate() {
            let choice = match candidates.choose(rng) {
                Some(choice) => choice,
                None => continue,
            };

            let spliced = match splice_segment(
                &working_path,
                self.shortest_path[segment],
                self.shortest_path[segment + 1],
                choice,
            ) {
                Some(spliced) => spliced,
                None => continue,
            };

            let resolved =
                resolve_node_path(graph, &spliced, &ResolveBy::MinLength)?;

            if resolved.dist < self.max_length {
                working_path = spliced;
            }
        }

        let resolved =
            resolve_node_path(graph, &working_path, &ResolveBy::MinLength)?;

        build_route(graph, &working_path, resolved)
    }
}
