//! Track graph transformation: raw way records in, routable densified
//! graphs out.

mod densify;
mod permanent;
mod skeleton;

use hashbrown::{HashMap, HashSet};
use petgraph::graph::NodeIndex;

use crate::geometry::LocalProjection;
use crate::loading::CityConfiguration;
use crate::model::{DensifiedGraph, NodeType, RawNode, RawTrackGraph, TrackEdge, TrackNode, TramWay};
use crate::{Error, NodeId};

/// Processes raw tram infrastructure data into a directed track graph and
/// derives densified variants of it on demand.
///
/// The raw graph and the permanent node set are computed once at construction
/// and never mutated afterwards, so [`Self::densify_graph_by_max_distance`]
/// calls at different granularities are independent and safe to run in
/// parallel.
#[derive(Debug)]
pub struct TramTrackGraphTransformer {
    graph: RawTrackGraph,
    permanent: HashSet<NodeIndex>,
    projection: LocalProjection,
    max_node_id: NodeId,
}

impl TramTrackGraphTransformer {
    /// Builds the raw track graph from way and point records and classifies
    /// its permanent nodes.
    ///
    /// Node types come from the source `railway` tag, except that any node id
    /// mentioned in the configuration's custom stop mapping is a tram stop
    /// regardless of its tag: such nodes are matched against the external
    /// schedule and must be able to act as stops even when untagged.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidData`] when a way references a node id absent
    /// from the point records.
    pub fn new(
        ways: &[TramWay],
        points: &[RawNode],
        configuration: &CityConfiguration,
    ) -> Result<Self, Error> {
        let mapped_stop_ids = configuration.mapped_stop_node_ids();

        let nodes_by_id: HashMap<NodeId, TrackNode> = points
            .iter()
            .map(|point| {
                let node_type = if mapped_stop_ids.contains(&point.id) {
                    NodeType::TramStop
                } else {
                    NodeType::from_tag(point.tags.get("railway").map(String::as_str))
                };
                let node = TrackNode {
                    id: point.id,
                    lat: point.lat,
                    lon: point.lon,
                    node_type,
                    name: point.tags.get("name").cloned(),
                };
                (point.id, node)
            })
            .collect();

        let graph = build_raw_graph(ways, &nodes_by_id)?;
        let permanent = permanent::find_permanent_nodes(&graph);
        let projection =
            LocalProjection::centered_on(graph.node_weights().map(|n| (n.lat, n.lon)));
        let max_node_id = nodes_by_id.keys().copied().max().unwrap_or_default();

        Ok(Self {
            graph,
            permanent,
            projection,
            max_node_id,
        })
    }

    /// Ids of the nodes that survive every simplification: tram stops on the
    /// network, crossings and endpoints, and speed-change points.
    pub fn permanent_node_ids(&self) -> HashSet<NodeId> {
        self.permanent.iter().map(|&idx| self.graph[idx].id).collect()
    }

    /// Builds a routable graph in which no edge is longer than
    /// `max_distance_in_meters`, by collapsing the raw graph onto its
    /// permanent nodes and re-expanding each chain into evenly spaced
    /// `interpolated` nodes. Every call returns a fresh, independent graph.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidMaxDistance`] for a non-positive (or NaN)
    /// limit before any work is done, and [`Error::TrackDirectionChanges`]
    /// carrying every failed skeleton walk of the pass when the raw topology
    /// is inconsistent.
    pub fn densify_graph_by_max_distance(
        &self,
        max_distance_in_meters: f64,
    ) -> Result<DensifiedGraph, Error> {
        if !(max_distance_in_meters > 0.0) {
            return Err(Error::InvalidMaxDistance(max_distance_in_meters));
        }

        let skeleton = skeleton::build_skeleton(&self.graph, &self.permanent)?;
        Ok(densify::densify(
            &skeleton,
            &self.projection,
            max_distance_in_meters,
            self.max_node_id,
        ))
    }
}

/// One or two directed edges per consecutive way-node pair, depending on the
/// one-way tag. Repeated contributions from overlapping ways update the edge
/// in place rather than stacking parallels.
fn build_raw_graph(
    ways: &[TramWay],
    nodes_by_id: &HashMap<NodeId, TrackNode>,
) -> Result<RawTrackGraph, Error> {
    let mut graph = RawTrackGraph::new();
    let mut indices: HashMap<NodeId, NodeIndex> = HashMap::new();

    for way in ways {
        let max_speed = way.max_speed();
        let is_oneway = way.is_oneway();

        for pair in way.node_ids.windows(2) {
            let source = resolve_node(&mut graph, &mut indices, nodes_by_id, way.id, pair[0])?;
            let target = resolve_node(&mut graph, &mut indices, nodes_by_id, way.id, pair[1])?;

            graph.update_edge(source, target, TrackEdge { max_speed });
            if !is_oneway {
                graph.update_edge(target, source, TrackEdge { max_speed });
            }
        }
    }

    Ok(graph)
}

fn resolve_node(
    graph: &mut RawTrackGraph,
    indices: &mut HashMap<NodeId, NodeIndex>,
    nodes_by_id: &HashMap<NodeId, TrackNode>,
    way_id: i64,
    node_id: NodeId,
) -> Result<NodeIndex, Error> {
    if let Some(&idx) = indices.get(&node_id) {
        return Ok(idx);
    }
    let node = nodes_by_id.get(&node_id).ok_or_else(|| {
        Error::InvalidData(format!("way {way_id} references unknown node {node_id}"))
    })?;
    let idx = graph.add_node(node.clone());
    indices.insert(node_id, idx);
    Ok(idx)
}
