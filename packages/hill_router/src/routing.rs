//! Route search over the city graph. Each engine is reachable through the
//! single find_route entry point, dispatched on the requested mode.

pub mod alternates;
pub mod baseline;
pub mod common;
pub mod flat;
pub mod hilly;

use petgraph::graph::NodeIndex;

use crate::common::config::{RouteConfig, RouteMode};
use crate::common::error::Result;
use crate::common::graph_data::RouteGraph;
use crate::routing::baseline::RandomDetours;
use crate::routing::common::Route;

/// Run one route search between the provided node indexes. Hilly maximizes
/// elevation gain within the length budget, Flat minimizes it, and Random
/// draws a baseline route for comparison against the other two
pub fn find_route(
    graph: &RouteGraph,
    source: NodeIndex,
    target: NodeIndex,
    config: &RouteConfig,
) -> Result<Route> {
    match config.route_mode {
        RouteMode::Hilly => hilly::maximize_gain(graph, source, target, config),
        RouteMode::Flat => flat::minimize_gain(graph, source, target, config),
        RouteMode::Random => {
            let generator = RandomDetours::new(graph, source, target, config)?;
            generator.sample(graph, &mut rand::thread_rng())
        }
    }
}
