use petgraph::graph::DiGraph;
use petgraph::visit::EdgeRef;
use serde::Serialize;

use super::TrackNode;

/// Directed graph over all way-derived nodes; mutated only while the
/// transformer constructs it, read-only afterwards.
pub type RawTrackGraph = DiGraph<TrackNode, TrackEdge>;

/// Edge of the raw track graph.
#[derive(Debug, Clone, Copy)]
pub struct TrackEdge {
    /// Speed limit in m/s, parsed from the source way.
    pub max_speed: f64,
}

/// Edge of a densified graph, annotated with true ellipsoidal measurements
/// between its endpoints.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct GeodeticEdge {
    /// Forward azimuth at the source node, degrees in −180..180.
    pub azimuth: f64,
    /// Ellipsoidal (WGS84) distance in meters.
    pub length: f64,
    /// Speed limit in m/s, inherited from the skeleton edge.
    pub max_speed: f64,
}

/// Routable graph produced by densification: permanent nodes plus freshly
/// minted interpolated nodes, never mutated after construction. Each
/// densification call returns an independent instance.
#[derive(Debug)]
pub struct DensifiedGraph {
    graph: DiGraph<TrackNode, GeodeticEdge>,
}

impl DensifiedGraph {
    pub(crate) fn new(graph: DiGraph<TrackNode, GeodeticEdge>) -> Self {
        Self { graph }
    }

    /// Read-only view of the underlying graph.
    pub fn graph(&self) -> &DiGraph<TrackNode, GeodeticEdge> {
        &self.graph
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn nodes(&self) -> impl Iterator<Item = &TrackNode> {
        self.graph.node_weights()
    }

    /// Edges as (source, target, annotation) triples.
    pub fn edges(&self) -> impl Iterator<Item = (&TrackNode, &TrackNode, &GeodeticEdge)> {
        self.graph
            .edge_references()
            .map(|e| (&self.graph[e.source()], &self.graph[e.target()], e.weight()))
    }
}
