//! Densification: re-expanding skeleton edges into chains of evenly spaced
//! interpolated nodes bounded by a maximum segment length.

use hashbrown::HashMap;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;

use super::skeleton::SkeletonGraph;
use crate::geometry::{self, LocalProjection};
use crate::model::{DensifiedGraph, GeodeticEdge, TrackNode};
use crate::NodeId;

/// Expands every skeleton edge whose planar length exceeds `max_distance`
/// into `ceil(length / max_distance)` segments, minting `interpolated` nodes
/// at the cut points. Interpolated points with bitwise-identical coordinates
/// (converging skeleton paths) resolve to one node. The output aliases
/// nothing: each call builds a fresh graph.
pub(crate) fn densify(
    skeleton: &SkeletonGraph,
    projection: &LocalProjection,
    max_distance: f64,
    max_node_id: NodeId,
) -> DensifiedGraph {
    let mut graph: DiGraph<TrackNode, GeodeticEdge> = DiGraph::new();
    let mut permanent_indices: HashMap<NodeId, NodeIndex> = HashMap::new();
    let mut interpolated_by_coordinates: HashMap<(u64, u64), NodeIndex> = HashMap::new();
    let mut next_node_id = max_node_id;

    for edge in skeleton.graph.edge_references() {
        let source = &skeleton.graph[edge.source()];
        let target = &skeleton.graph[edge.target()];
        let max_speed = edge.weight().max_speed;

        let source_idx = *permanent_indices
            .entry(source.id)
            .or_insert_with(|| graph.add_node(source.clone()));
        let target_idx = *permanent_indices
            .entry(target.id)
            .or_insert_with(|| graph.add_node(target.clone()));

        let samples = geometry::evenly_spaced_points(&edge.weight().path, max_distance, projection);

        let mut previous = source_idx;
        for (lat, lon) in samples {
            let node_idx = *interpolated_by_coordinates
                .entry((lat.to_bits(), lon.to_bits()))
                .or_insert_with(|| {
                    next_node_id += 1;
                    graph.add_node(TrackNode::interpolated(next_node_id, lat, lon))
                });
            add_geodetic_edge(&mut graph, previous, node_idx, max_speed);
            previous = node_idx;
        }
        add_geodetic_edge(&mut graph, previous, target_idx, max_speed);
    }

    DensifiedGraph::new(graph)
}

fn add_geodetic_edge(
    graph: &mut DiGraph<TrackNode, GeodeticEdge>,
    source: NodeIndex,
    target: NodeIndex,
    max_speed: f64,
) {
    let (azimuth, length) = geometry::azimuth_and_length(graph[source].point(), graph[target].point());
    graph.add_edge(
        source,
        target,
        GeodeticEdge {
            azimuth,
            length,
            max_speed,
        },
    );
}
