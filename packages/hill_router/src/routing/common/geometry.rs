//! Defines the struct which contains the physical geometry of a completed
//! route. The full coordinate trace is down-sampled to a fixed number of
//! waypoints before being handed to the frontend; search never looks at
//! geometry.

use petgraph::graph::NodeIndex;
use serde::Serialize;

use crate::common::bbox::BBox;
use crate::common::error::{Error, Result};
use crate::common::graph_data::{RouteGraph, edges_between, node_data};
use petgraph::visit::EdgeRef;

/// Maximum number of waypoints handed to the map renderer
pub const MAX_DISPLAY_COORDS: usize = 23;

/// Stores the geometry of a route in a format which can easily be rendered
/// in the frontend
#[derive(Debug, Serialize)]
pub struct RouteGeometry {
    pub coords: Vec<(f64, f64)>,
    pub bbox: BBox,
}

impl RouteGeometry {
    /// Trace the full coordinate sequence of a resolved path (node
    /// coordinates plus any intermediate edge geometry), then down-sample it
    /// for display
    pub fn from_node_path(
        graph: &RouteGraph,
        path: &[NodeIndex],
        keys: &[u32],
    ) -> Result<RouteGeometry> {
        if path.len() < 2 {
            return Err(Error::EmptyPath);
        }

        let mut coords = Vec::<(f64, f64)>::new();

        let start = node_data(graph, path[0])?;
        coords.push((start.lat, start.lon));

        for (pair, key) in path.windows(2).zip(keys) {
            let edges = edges_between(graph, pair[0], pair[1])?;
            let eref = edges
                .into_iter()
                .find(|eref| eref.weight().key == *key)
                .ok_or(Error::NoEdge {
                    src: node_data(graph, pair[0])?.id,
                    dst: node_data(graph, pair[1])?.id,
                })?;

            let edata = eref.weight();
            for (lat, lon) in edata.lats.iter().zip(edata.lons.iter()) {
                coords.push((*lat, *lon));
            }

            let dst = node_data(graph, pair[1])?;
            coords.push((dst.lat, dst.lon));
        }

        let bbox = get_bbox(&coords);

        Ok(RouteGeometry {
            coords: downsample(coords),
            bbox,
        })
    }
}

/// Determine the bounding box covering every traced coordinate
fn get_bbox(coords: &[(f64, f64)]) -> BBox {
    let mut bbox = BBox {
        min_lat: f64::MAX,
        min_lon: f64::MAX,
        max_lat: f64::MIN,
        max_lon: f64::MIN,
    };

    for (lat, lon) in coords {
        bbox.min_lat = bbox.min_lat.min(*lat);
        bbox.min_lon = bbox.min_lon.min(*lon);
        bbox.max_lat = bbox.max_lat.max(*lat);
        bbox.max_lon = bbox.max_lon.max(*lon);
    }

    bbox
}

/// Reduce a coordinate trace to at most MAX_DISPLAY_COORDS waypoints by
/// keeping every nth point
fn downsample(coords: Vec<(f64, f64)>) -> Vec<(f64, f64)> {
    if coords.len() <= MAX_DISPLAY_COORDS {
        return coords;
    }

    let step = coords.len() / MAX_DISPLAY_COORDS + 1;
    coords.into_iter().step_by(step).collect()
}
