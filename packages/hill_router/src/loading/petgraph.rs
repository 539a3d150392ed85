use crate::common::error::{Error, Result};
use crate::common::graph_data::{EdgeData, NodeData, RouteGraph};
use crate::loading::file::{EdgeRow, NodeRow};
use core::f64;
use geo::{Distance, Haversine, Point};
use petgraph::graph::NodeIndex;
use petgraph::visit::IntoNodeReferences;
use rustc_hash::{FxHashMap, FxHashSet};

/// Nodes in the graph need to have associated lat/lon data. To achieve this,
/// we create a mapping from node ids as they appear in the graph file to
/// NodeData structs. As edges are added, these can then be retrieved and added
/// to the graph. Edges must also be provided here, as we only want to add the
/// nodes which are used in one of the edges.
pub fn generate_node_map(
    nodes: Vec<NodeRow>,
    edges: &Vec<EdgeRow>,
) -> FxHashMap<i64, NodeData> {
    let mut node_map = FxHashMap::<i64, NodeData>::default();
    let mut used_nodes = FxHashSet::<i64>::default();

    for edge in edges {
        used_nodes.insert(edge.src);
        used_nodes.insert(edge.dst);
    }

    for node in nodes {
        if used_nodes.contains(&node.id) {
            node_map.insert(node.id, node.into());
        }
    }

    node_map
}

/// Sum the positive elevation deltas across a sequence of samples. Descents
/// contribute zero, so traversing the same samples in the opposite direction
/// generally produces a different total.
pub fn sum_elevation_gains(elevations: &[f64]) -> f64 {
    elevations
        .windows(2)
        .map(|pair| (pair[1] - pair[0]).max(0.0))
        .sum()
}

/// Fetch the next available parallel-edge key for the provided ordered node
/// pair, starting from zero
fn next_key(
    counters: &mut FxHashMap<(i64, i64), u32>,
    src: i64,
    dst: i64,
) -> u32 {
    let counter = counters.entry((src, dst)).or_insert(0);
    let key = *counter;
    *counter += 1;
    key
}

/// Based on the data which has been read in from the graph file, generate
/// a petgraph graph which can be used for route plotting. Every segment row
/// produces a forward edge and a reverse edge; the reverse edge's elevation
/// gain is derived from the reversed sample sequence. Parallel edges between
/// the same ordered pair receive ascending keys in row order.
pub fn create_graph(nodes: Vec<NodeRow>, edges: Vec<EdgeRow>) -> RouteGraph {
    // Set up empty graph
    let mut graph = RouteGraph::new();

    // Unpack node data
    let node_weights_by_id = generate_node_map(nodes, &edges);

    // Add all nodes to the graph, create mapping from stable ids to node
    // indexes
    let mut node_id_inx_map = FxHashMap::<i64, NodeIndex>::default();
    for (id, weight) in node_weights_by_id.iter() {
        let node_inx = graph.add_node(*weight);
        node_id_inx_map.insert(*id, node_inx);
    }

    let mut key_counters = FxHashMap::<(i64, i64), u32>::default();

    for edge in edges {
        // Fetch indexes for src and dst as they appear in the graph
        let src_inx = match node_id_inx_map.get(&edge.src) {
            Some(src_inx) => *src_inx,
            None => continue,
        };
        let dst_inx = match node_id_inx_map.get(&edge.dst) {
            Some(dst_inx) => *dst_inx,
            None => continue,
        };

        // Elevation samples along the segment, falling back to the endpoint
        // node elevations when the segment itself was not sampled
        let elevations = if edge.elevations.len() >= 2 {
            edge.elevations.clone()
        } else {
            let src_ele = match node_weights_by_id.get(&edge.src) {
                Some(node) => node.elevation,
                None => continue,
            };
            let dst_ele = match node_weights_by_id.get(&edge.dst) {
                Some(node) => node.elevation,
                None => continue,
            };
            vec![src_ele, dst_ele]
        };

        let reversed: Vec<f64> = elevations.iter().rev().copied().collect();

        let forward_key = next_key(&mut key_counters, edge.src, edge.dst);
        graph.add_edge(
            src_inx,
            dst_inx,
            EdgeData {
                src: edge.src,
                dst: edge.dst,
                key: forward_key,
                distance: edge.distance,
                elevation_gain: sum_elevation_gains(&elevations),
                lats: edge.lats.clone(),
                lons: edge.lons.clone(),
            },
        );

        let reverse_key = next_key(&mut key_counters, edge.dst, edge.src);
        graph.add_edge(
            dst_inx,
            src_inx,
            EdgeData {
                src: edge.dst,
                dst: edge.src,
                key: reverse_key,
                distance: edge.distance,
                elevation_gain: sum_elevation_gains(&reversed),
                lats: edge.lats.iter().rev().copied().collect(),
                lons: edge.lons.iter().rev().copied().collect(),
            },
        );
    }

    graph
}

/// Based on the user's selected start or end point, determine the closest
/// available node to it
pub fn nearest_node(graph: &RouteGraph, target: Point) -> Result<NodeIndex> {
    // Set variables to keep track of the current closest node
    let mut smallest_dist = f64::MAX;
    let mut closest_inx: Option<NodeIndex> = None;

    for (node_index, node_weight) in graph.node_references() {
        // Get distance for the current node from the requested point
        let node_coords: Point = (node_weight.lon, node_weight.lat).into();

        let dist_to_node = Haversine::distance(target, node_coords);

        // Store details of new closest node if applicable
        if dist_to_node < smallest_dist {
            smallest_dist = dist_to_node;
            closest_inx = Some(node_index);
        }
    }

    closest_inx.ok_or(Error::EmptyGraph)
}

#[cfg(test)]
mod tests {

    use super::*;
    use approx::assert_abs_diff_eq;

    fn get_test_rows() -> (Vec<NodeRow>, Vec<EdgeRow>) {
        let nodes = vec![
            NodeRow {
                id: 1,
                lat: 50.0,
                lon: -1.0,
                elevation: 100.0,
                ele_resolution: 9.5,
            },
            NodeRow {
                id: 2,
                lat: 50.001,
                lon: -1.0,
                elevation: 110.0,
                ele_resolution: 9.5,
            },
            // Not referenced by any edge, should be dropped
            NodeRow {
                id: 3,
                lat: 51.0,
                lon: -1.0,
                elevation: 50.0,
                ele_resolution: 9.5,
            },
        ];

        let edges = vec![EdgeRow {
            src: 1,
            dst: 2,
            distance: 120.0,
            lats: vec![50.0, 50.001],
            lons: vec![-1.0, -1.0],
            elevations: vec![100.0, 95.0, 110.0],
        }];

        (nodes, edges)
    }

    /// Check that only nodes referenced by at least one edge are mapped
    #[test]
    fn test_generate_node_map() {
        let (nodes, edges) = get_test_rows();

        let result = generate_node_map(nodes, &edges);

        assert_eq!(result.len(), 2);
        assert!(result.contains_key(&1));
        assert!(result.contains_key(&2));
        assert!(!result.contains_key(&3));
    }

    #[cfg(test)]
    mod test_sum_elevation_gains {

        use super::*;

        /// Descents along the way must not cancel out climbs
        #[test]
        fn test_forward() {
            let test_elevations = vec![100.0, 95.0, 110.0];

            let result = sum_elevation_gains(&test_elevations);

            assert_abs_diff_eq!(result, 15.0);
        }

        /// The reverse traversal re-derives its own gain rather than
        /// negating the forward gain
        #[test]
        fn test_reverse() {
            let test_elevations = vec![110.0, 95.0, 100.0];

            let result = sum_elevation_gains(&test_elevations);

            assert_abs_diff_eq!(result, 5.0);
        }

        /// Fewer than two samples means no deltas to sum
        #[test]
        fn test_single_sample() {
            let result = sum_elevation_gains(&[100.0]);

            assert_abs_diff_eq!(result, 0.0);
        }
    }

    /// Check that a segment row produces a forward and a reverse edge with
    /// independently derived gains
    #[test]
    fn test_create_graph_reverse_edges() {
        let (nodes, edges) = get_test_rows();

        let graph = create_graph(nodes, edges);

        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.edge_count(), 2);

        let mut forward_gain = None;
        let mut reverse_gain = None;
        for edge_inx in graph.edge_indices() {
            let edata = graph.edge_weight(edge_inx).unwrap();
            if edata.src == 1 {
                forward_gain = Some(edata.elevation_gain);
            } else {
                reverse_gain = Some(edata.elevation_gain);
            }
        }

        assert_abs_diff_eq!(forward_gain.unwrap(), 15.0);
        assert_abs_diff_eq!(reverse_gain.unwrap(), 5.0);
    }

    /// Check that repeated rows for the same ordered pair receive ascending
    /// parallel-edge keys
    #[test]
    fn test_create_graph_parallel_keys() {
        let (nodes, mut edges) = get_test_rows();
        edges.push(EdgeRow {
            src: 1,
            dst: 2,
            distance: 200.0,
            lats: Vec::new(),
            lons: Vec::new(),
            elevations: Vec::new(),
        });

        let graph = create_graph(nodes, edges);

        // Two rows, each producing a forward and a reverse edge
        assert_eq!(graph.edge_count(), 4);

        let mut forward_keys: Vec<u32> = graph
            .edge_indices()
            .filter_map(|inx| graph.edge_weight(inx))
            .filter(|edata| edata.src == 1)
            .map(|edata| edata.key)
            .collect();
        forward_keys.sort();

        assert_eq!(forward_keys, vec![0, 1]);
    }

    /// The second row above has no elevation samples; its gain must fall
    /// back to the endpoint node elevations
    #[test]
    fn test_create_graph_node_elevation_fallback() {
        let (nodes, _) = get_test_rows();
        let edges = vec![EdgeRow {
            src: 1,
            dst: 2,
            distance: 200.0,
            lats: Vec::new(),
            lons: Vec::new(),
            elevations: Vec::new(),
        }];

        let graph = create_graph(nodes, edges);

        for edge_inx in graph.edge_indices() {
            let edata = graph.edge_weight(edge_inx).unwrap();
            if edata.src == 1 {
                // 100m -> 110m
                assert_abs_diff_eq!(edata.elevation_gain, 10.0);
            } else {
                // 110m -> 100m, pure descent
                assert_abs_diff_eq!(edata.elevation_gain, 0.0);
            }
        }
    }

    #[cfg(test)]
    mod test_nearest_node {

        use super::*;

        /// The node closest to the requested point should be returned
        #[test]
        fn test_closest() {
            let (nodes, edges) = get_test_rows();
            let graph = create_graph(nodes, edges);

            let result = nearest_node(&graph, (-1.0, 50.0008).into())
                .expect("A node should have been found");

            let weight = graph.node_weight(result).unwrap();
            assert_eq!(weight.id, 2);
        }

        /// An empty graph cannot provide a nearest node
        #[test]
        fn test_empty_graph() {
            let graph = RouteGraph::new();

            match nearest_node(&graph, (0.0, 0.0).into()) {
                Err(Error::EmptyGraph) => (),
                _ => panic!("Should have received an EmptyGraph error"),
            }
        }
    }
}
