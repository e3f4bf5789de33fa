//! Classification of permanent nodes: the vertices that must survive
//! simplification and anchor the skeleton graph.

use hashbrown::HashSet;
use petgraph::Direction;
use petgraph::graph::NodeIndex;
use petgraph::visit::EdgeRef;

use crate::model::{NodeType, RawTrackGraph};

/// Union of the three independent permanence predicates: tram stops on the
/// track network, crossings/endpoints, and speed-change points.
pub(crate) fn find_permanent_nodes(graph: &RawTrackGraph) -> HashSet<NodeIndex> {
    let mut permanent = tram_stop_nodes(graph);
    permanent.extend(crossing_and_endpoint_nodes(graph));
    permanent.extend(speed_change_nodes(graph));
    permanent
}

/// Tram stops that are actually linked into the track graph. Stops on
/// decommissioned or unlinked track exist in the raw point records but never
/// make it here, because only way-referenced nodes become graph vertices.
fn tram_stop_nodes(graph: &RawTrackGraph) -> HashSet<NodeIndex> {
    graph
        .node_indices()
        .filter(|&idx| graph[idx].node_type == NodeType::TramStop)
        .collect()
}

/// Nodes whose distinct neighbor set (predecessors ∪ successors) has a size
/// other than 2: switches and crossings (> 2) as well as endpoints and
/// isolated nodes (0 or 1), in one rule. Distinct identities are counted, not
/// edges, so an ordinary through-node on a two-way track stays collapsible.
fn crossing_and_endpoint_nodes(graph: &RawTrackGraph) -> HashSet<NodeIndex> {
    graph
        .node_indices()
        .filter(|&idx| {
            let neighbors: HashSet<NodeIndex> = graph
                .neighbors_directed(idx, Direction::Incoming)
                .chain(graph.neighbors_directed(idx, Direction::Outgoing))
                .collect();
            neighbors.len() != 2
        })
        .collect()
}

/// Nodes where the speed limit changes between incident track segments:
/// more than one distinct `max_speed` across all in- and out-edges.
fn speed_change_nodes(graph: &RawTrackGraph) -> HashSet<NodeIndex> {
    graph
        .node_indices()
        .filter(|&idx| {
            let speeds: HashSet<u64> = graph
                .edges_directed(idx, Direction::Incoming)
                .chain(graph.edges_directed(idx, Direction::Outgoing))
                .map(|edge| edge.weight().max_speed.to_bits())
                .collect();
            speeds.len() > 1
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{TrackEdge, TrackNode};

    fn node(id: i64, node_type: NodeType) -> TrackNode {
        TrackNode {
            id,
            lat: 0.0,
            lon: 0.0,
            node_type,
            name: None,
        }
    }

    #[test]
    fn two_way_through_node_is_not_permanent() {
        let mut graph = RawTrackGraph::new();
        let a = graph.add_node(node(1, NodeType::Unknown));
        let b = graph.add_node(node(2, NodeType::Unknown));
        let c = graph.add_node(node(3, NodeType::Unknown));
        for (s, t) in [(a, b), (b, a), (b, c), (c, b)] {
            graph.add_edge(s, t, TrackEdge { max_speed: 10.0 });
        }

        let permanent = find_permanent_nodes(&graph);
        // Endpoints are permanent, the through-node is not.
        assert!(permanent.contains(&a));
        assert!(!permanent.contains(&b));
        assert!(permanent.contains(&c));
    }

    #[test]
    fn junction_and_speed_change_are_permanent() {
        let mut graph = RawTrackGraph::new();
        let hub = graph.add_node(node(1, NodeType::Unknown));
        let arms: Vec<_> = (2..5)
            .map(|id| graph.add_node(node(id, NodeType::Unknown)))
            .collect();
        for &arm in &arms {
            graph.add_edge(hub, arm, TrackEdge { max_speed: 10.0 });
            graph.add_edge(arm, hub, TrackEdge { max_speed: 10.0 });
        }

        let d = graph.add_node(node(5, NodeType::Unknown));
        let e = graph.add_node(node(6, NodeType::Unknown));
        // Speed drops between the two segments through `d`.
        graph.add_edge(arms[0], d, TrackEdge { max_speed: 10.0 });
        graph.add_edge(d, e, TrackEdge { max_speed: 5.0 });

        let permanent = find_permanent_nodes(&graph);
        assert!(permanent.contains(&hub));
        assert!(permanent.contains(&d));
    }

    #[test]
    fn tram_stop_on_track_is_permanent() {
        let mut graph = RawTrackGraph::new();
        let a = graph.add_node(node(1, NodeType::Unknown));
        let stop = graph.add_node(node(2, NodeType::TramStop));
        let c = graph.add_node(node(3, NodeType::Unknown));
        for (s, t) in [(a, stop), (stop, a), (stop, c), (c, stop)] {
            graph.add_edge(s, t, TrackEdge { max_speed: 10.0 });
        }

        // Degree-2 and uniform speed, yet permanent by stop type.
        assert!(find_permanent_nodes(&graph).contains(&stop));
    }
}
