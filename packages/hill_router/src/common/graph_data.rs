//! Defines the weights stored in the petgraph graph, along with the accessors
//! which the routing algorithms use to look nodes and edges up. The graph is
//! a directed multigraph: several edges may connect the same ordered node
//! pair, each carrying its own key.

use petgraph::graph::{EdgeReference, NodeIndex};
use petgraph::visit::IntoNodeReferences;
use petgraph::{Directed, Graph};

use crate::common::error::{Error, Result};

/// The graph type used throughout this package
pub type RouteGraph = Graph<NodeData, EdgeData, Directed, u32>;

/// Sets the data which will be stored as node weights in the petgraph graph.
/// Attributes are immutable once the graph has been created
#[derive(Default, Debug, Clone, Copy, PartialEq)]
pub struct NodeData {
    pub id: i64,
    pub lat: f64,
    pub lon: f64,
    pub elevation: f64,
    /// Spatial granularity (in meters) at which this node's elevation was
    /// sampled, carried through from the graph construction step
    pub ele_resolution: f64,
}

/// Container for edge metadata which will be stored in the graph. The key
/// disambiguates parallel edges connecting the same ordered node pair, and
/// elevation_gain is directional: descents contribute zero, so the gain of
/// the reverse edge is derived independently rather than negated
#[derive(Default, Debug, Clone, PartialEq)]
pub struct EdgeData {
    pub src: i64,
    pub dst: i64,
    pub key: u32,
    pub distance: f64,
    pub elevation_gain: f64,
    pub lats: Vec<f64>,
    pub lons: Vec<f64>,
}

/// Find the index of the node carrying the provided stable id. Node indexes
/// are not stable across graph rebuilds, so callers hold ids and look the
/// index up per graph
pub fn node_index_by_id(graph: &RouteGraph, id: i64) -> Result<NodeIndex> {
    for (node_inx, node_data) in graph.node_references() {
        if node_data.id == id {
            return Ok(node_inx);
        }
    }
    Err(Error::NodeNotFound { id })
}

/// Fetch the weight of the node at the provided index
pub fn node_data(graph: &RouteGraph, inx: NodeIndex) -> Result<&NodeData> {
    graph.node_weight(inx).ok_or(Error::NodeNotFound {
        id: inx.index() as i64,
    })
}

/// Fetch every edge connecting src to dst, in graph iteration order. At
/// least one edge must exist, otherwise NoEdge is returned
pub fn edges_between<'a>(
    graph: &'a RouteGraph,
    src: NodeIndex,
    dst: NodeIndex,
) -> Result<Vec<EdgeReference<'a, EdgeData>>> {
    let edges: Vec<EdgeReference<'a, EdgeData>> =
        graph.edges_connecting(src, dst).collect();

    if edges.is_empty() {
        return Err(Error::NoEdge {
            src: node_data(graph, src)?.id,
            dst: node_data(graph, dst)?.id,
        });
    }

    Ok(edges)
}

#[cfg(test)]
mod tests {

    use super::*;

    /// Build a two node graph with a pair of parallel edges between them
    fn get_test_graph() -> (NodeIndex, NodeIndex, NodeIndex, RouteGraph) {
        let mut graph = RouteGraph::new();

        let node_1 = graph.add_node(NodeData {
            id: 101,
            ..Default::default()
        });
        let node_2 = graph.add_node(NodeData {
            id: 102,
            ..Default::default()
        });
        let node_3 = graph.add_node(NodeData {
            id: 103,
            ..Default::default()
        });

        graph.add_edge(
            node_1,
            node_2,
            EdgeData {
                src: 101,
                dst: 102,
                key: 0,
                distance: 10.0,
                ..Default::default()
            },
        );
        graph.add_edge(
            node_1,
            node_2,
            EdgeData {
                src: 101,
                dst: 102,
                key: 1,
                distance: 15.0,
                ..Default::default()
            },
        );

        (node_1, node_2, node_3, graph)
    }

    /// Looking a node up by its stable id should return its current index
    #[test]
    fn test_node_index_by_id_found() {
        let (_, node_2, _, graph) = get_test_graph();

        let result = node_index_by_id(&graph, 102)
            .expect("Node 102 should have been found");

        assert_eq!(result, node_2);
    }

    /// Looking up an id which is not in the graph should fail with
    /// NodeNotFound
    #[test]
    fn test_node_index_by_id_missing() {
        let (_, _, _, graph) = get_test_graph();

        match node_index_by_id(&graph, 999) {
            Err(Error::NodeNotFound { id }) => assert_eq!(id, 999),
            _ => panic!("Should have received a NodeNotFound error"),
        }
    }

    /// Both parallel edges between a connected pair should be returned
    #[test]
    fn test_edges_between_parallel() {
        let (node_1, node_2, _, graph) = get_test_graph();

        let result = edges_between(&graph, node_1, node_2)
            .expect("The nodes should be connected");

        assert_eq!(result.len(), 2);
    }

    /// An unconnected ordered pair should fail with NoEdge
    #[test]
    fn test_edges_between_missing() {
        let (node_1, _, node_3, graph) = get_test_graph();

        match edges_between(&graph, node_1, node_3) {
            Err(Error::NoEdge { src, dst }) => {
                assert_eq!(src, 101);
                assert_eq!(dst, 103);
            }
            _ => panic!("Should have received a NoEdge error"),
        }
    }
}
