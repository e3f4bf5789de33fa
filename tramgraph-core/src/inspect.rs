//! Queries over a finished densified graph: shortest paths and path
//! plausibility checks used to validate an entire timetable's stop-to-stop
//! segments.

use geo::{Distance, Geodesic};
use hashbrown::{HashMap, HashSet};
use itertools::Itertools;
use petgraph::algo::astar;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;

use crate::geometry;
use crate::model::{DensifiedGraph, GeodeticEdge, TrackNode};
use crate::{Error, NodeId};

/// Read-only inspector over a densified graph.
///
/// The node-by-id index is built once at construction; beyond it the
/// inspector is stateless and safe for concurrent queries.
pub struct TramTrackGraphInspector<'a> {
    graph: &'a DiGraph<TrackNode, GeodeticEdge>,
    nodes_by_id: HashMap<NodeId, NodeIndex>,
}

impl<'a> TramTrackGraphInspector<'a> {
    pub fn new(graph: &'a DensifiedGraph) -> Self {
        let graph = graph.graph();
        let nodes_by_id = graph
            .node_indices()
            .map(|idx| (graph[idx].id, idx))
            .collect();
        Self { graph, nodes_by_id }
    }

    /// Shortest path between two nodes by total ellipsoidal edge length,
    /// found with A*. The straight-line ellipsoidal distance to the goal is
    /// an admissible heuristic: it never overestimates the remaining true
    /// distance.
    ///
    /// # Errors
    ///
    /// [`Error::NodeNotFound`] when either id is absent from the graph,
    /// [`Error::NoPathFound`] when the graph is disconnected between them.
    pub fn shortest_path(&self, start: NodeId, end: NodeId) -> Result<Vec<&'a TrackNode>, Error> {
        let start_idx = self.resolve(start)?;
        let end_idx = self.resolve(end)?;
        let goal = self.graph[end_idx].point();

        let (_, path) = astar(
            self.graph,
            start_idx,
            |node| node == end_idx,
            |edge| edge.weight().length,
            |node| Geodesic.distance(self.graph[node].point(), goal),
        )
        .ok_or(Error::NoPathFound { start, end })?;

        Ok(path.into_iter().map(|idx| &self.graph[idx]).collect())
    }

    /// Validates that a path between two stops exists and is plausibly
    /// short: its ellipsoidal length must not exceed the straight-line
    /// distance scaled by `max_distance_ratio`.
    ///
    /// # Errors
    ///
    /// [`Error::NodeNotFound`], [`Error::NoPathFound`], or
    /// [`Error::PathTooLong`] carrying the actual and allowed distances.
    pub fn check_path_viability(
        &self,
        start: NodeId,
        end: NodeId,
        max_distance_ratio: f64,
    ) -> Result<(), Error> {
        let start_point = self.graph[self.resolve(start)?].point();
        let end_point = self.graph[self.resolve(end)?].point();
        let path = self.shortest_path(start, end)?;

        let path_distance = geometry::path_length(path.iter().map(|node| node.point()));
        let allowed_distance = Geodesic.distance(start_point, end_point) * max_distance_ratio;

        if path_distance > allowed_distance {
            return Err(Error::PathTooLong {
                start,
                end,
                actual_distance: path_distance,
                allowed_distance,
            });
        }
        Ok(())
    }

    /// All distinct consecutive stop pairs across the given trips, as
    /// produced by the schedule-matching collaborator. Used to batch-validate
    /// a timetable's stop-to-stop segments with
    /// [`Self::check_path_viability`].
    pub fn unique_stop_pairs(
        stop_nodes_by_trip_id: &HashMap<String, Vec<NodeId>>,
    ) -> HashSet<(NodeId, NodeId)> {
        stop_nodes_by_trip_id
            .values()
            .flat_map(|stop_ids| stop_ids.iter().copied().tuple_windows())
            .collect()
    }

    fn resolve(&self, id: NodeId) -> Result<NodeIndex, Error> {
        self.nodes_by_id
            .get(&id)
            .copied()
            .ok_or(Error::NodeNotFound(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stop_pairs_are_deduplicated_across_trips() {
        let trips: HashMap<String, Vec<NodeId>> = HashMap::from_iter([
            ("trip_1".to_owned(), vec![1, 2, 3]),
            ("trip_2".to_owned(), vec![2, 3, 4]),
            ("trip_3".to_owned(), vec![1, 2]),
        ]);

        let pairs = TramTrackGraphInspector::unique_stop_pairs(&trips);
        assert_eq!(pairs, HashSet::from_iter([(1, 2), (2, 3), (3, 4)]));
    }

    #[test]
    fn single_stop_trip_yields_no_pairs() {
        let trips: HashMap<String, Vec<NodeId>> =
            HashMap::from_iter([("trip_1".to_owned(), vec![5])]);
        assert!(TramTrackGraphInspector::unique_stop_pairs(&trips).is_empty());
    }
}
