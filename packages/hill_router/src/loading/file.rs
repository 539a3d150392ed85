//! The structs defined here describe the on-disk representation of a city
//! graph: one record per node, and one record per physical road segment.
//! Segments are stored once; directionality (including the independently
//! derived reverse elevation gain) is reconstructed when the graph is built.

use serde::Deserialize;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::common::error::Result;
use crate::common::graph_data::NodeData;

/// Container for a single node record from the graph file
#[derive(Deserialize, Debug, Clone, Copy)]
pub struct NodeRow {
    pub id: i64,
    pub lat: f64,
    pub lon: f64,
    pub elevation: f64,
    pub ele_resolution: f64,
}

impl Into<NodeData> for NodeRow {
    fn into(self) -> NodeData {
        NodeData {
            id: self.id,
            lat: self.lat,
            lon: self.lon,
            elevation: self.elevation,
            ele_resolution: self.ele_resolution,
        }
    }
}

/// Container for a single road segment record from the graph file. The
/// elevations vector holds samples taken along the segment from src to dst;
/// it may be empty when the construction step could only sample the two
/// endpoint nodes
#[derive(Deserialize, Debug, Clone)]
pub struct EdgeRow {
    pub src: i64,
    pub dst: i64,
    pub distance: f64,
    #[serde(default)]
    pub lats: Vec<f64>,
    #[serde(default)]
    pub lons: Vec<f64>,
    #[serde(default)]
    pub elevations: Vec<f64>,
}

/// Top level structure of the serialized city graph
#[derive(Deserialize, Debug)]
pub struct GraphFile {
    pub nodes: Vec<NodeRow>,
    pub edges: Vec<EdgeRow>,
}

/// Read a serialized city graph from the provided path
pub fn load_graph_file(path: &Path) -> Result<GraphFile> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let parsed: GraphFile = serde_json::from_reader(reader)?;
    Ok(parsed)
}
