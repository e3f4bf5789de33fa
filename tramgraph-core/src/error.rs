use thiserror::Error;

use crate::NodeId;

/// A skeleton walk that found no non-backtracking successor before reaching
/// a permanent node. Signals inconsistent raw topology, e.g. a one-way track
/// ending in the middle of a chain.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error(
    "track from permanent node {from_node_id} changes direction at non-permanent node {at_node_id}"
)]
pub struct TrackDirectionChange {
    /// Permanent node the walk started from.
    pub from_node_id: NodeId,
    /// Non-permanent node at which the walk got stuck.
    pub at_node_id: NodeId,
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("maximum distance between nodes must be greater than 0, got {0}")]
    InvalidMaxDistance(f64),
    #[error("node with id {0} not found in the graph")]
    NodeNotFound(NodeId),
    #[error("no path found between stops: {start} -> {end}")]
    NoPathFound { start: NodeId, end: NodeId },
    #[error(
        "path too long: {start} -> {end} distance: {actual_distance:.1} > allowed: {allowed_distance:.1}"
    )]
    PathTooLong {
        start: NodeId,
        end: NodeId,
        actual_distance: f64,
        allowed_distance: f64,
    },
    /// Aggregate of every failed skeleton walk in one pass; raised only after
    /// all walks have been attempted so one report covers the whole graph.
    #[error("{} track direction changes detected during densification", .0.len())]
    TrackDirectionChanges(Vec<TrackDirectionChange>),
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Invalid data: {0}")]
    InvalidData(String),
}
