//! Skeleton construction: collapsing chains of non-permanent nodes between
//! permanent anchors into single edges that remember their geometry.

use geo::Point;
use hashbrown::{HashMap, HashSet};
use petgraph::Direction;
use petgraph::graph::{DiGraph, NodeIndex};
use rayon::prelude::*;

use crate::model::{RawTrackGraph, TrackNode};
use crate::{Error, NodeId, TrackDirectionChange};

/// Edge of the skeleton graph: reachability through exactly one chain of
/// non-permanent nodes, with the chain's full geometry and the speed of its
/// first hop (uniform along the chain, since any speed change would have made
/// the node permanent).
#[derive(Debug, Clone)]
pub(crate) struct SkeletonEdge {
    /// Ordered coordinate path from source to target, endpoints included,
    /// as (x = lon, y = lat) points.
    pub path: Vec<Point<f64>>,
    pub max_speed: f64,
}

/// Minimal graph whose vertices are exactly the permanent nodes.
#[derive(Debug)]
pub(crate) struct SkeletonGraph {
    pub graph: DiGraph<TrackNode, SkeletonEdge>,
}

/// Walks from every permanent node along every raw successor until the next
/// permanent node, in parallel; the walks share nothing but the immutable raw
/// graph. Failed walks are collected across the whole pass and raised
/// together as one aggregate error so a caller sees every inconsistency in a
/// single report.
pub(crate) fn build_skeleton(
    raw: &RawTrackGraph,
    permanent: &HashSet<NodeIndex>,
) -> Result<SkeletonGraph, Error> {
    // Deterministic walk order regardless of set iteration order.
    let mut starts: Vec<(NodeIndex, NodeIndex)> = permanent
        .iter()
        .flat_map(|&p| {
            raw.neighbors_directed(p, Direction::Outgoing)
                .map(move |s| (p, s))
        })
        .collect();
    starts.sort_by_key(|&(p, s)| (raw[p].id, raw[s].id));

    let walks: Vec<Result<(NodeIndex, NodeIndex, SkeletonEdge), TrackDirectionChange>> = starts
        .par_iter()
        .map(|&(p, s)| walk_to_next_permanent(raw, permanent, p, s))
        .collect();

    let mut graph = DiGraph::new();
    let mut indices: HashMap<NodeId, NodeIndex> = HashMap::new();
    let mut errors: Vec<TrackDirectionChange> = Vec::new();

    for walk in walks {
        match walk {
            Ok((source, target, edge)) => {
                let source = *indices
                    .entry(raw[source].id)
                    .or_insert_with(|| graph.add_node(raw[source].clone()));
                let target = *indices
                    .entry(raw[target].id)
                    .or_insert_with(|| graph.add_node(raw[target].clone()));
                graph.add_edge(source, target, edge);
            }
            Err(error) => errors.push(error),
        }
    }

    if !errors.is_empty() {
        errors.sort_by_key(|e| (e.from_node_id, e.at_node_id));
        return Err(Error::TrackDirectionChanges(errors));
    }

    Ok(SkeletonGraph { graph })
}

/// Non-backtracking walk carrying `(previous, current)` state: at every
/// non-permanent node the single successor that is not the node we came from
/// is taken. A true degree-2 chain node has exactly one such candidate; none
/// means the track direction flips mid-chain, which is a data error.
fn walk_to_next_permanent(
    raw: &RawTrackGraph,
    permanent: &HashSet<NodeIndex>,
    start: NodeIndex,
    successor: NodeIndex,
) -> Result<(NodeIndex, NodeIndex, SkeletonEdge), TrackDirectionChange> {
    let first_hop = raw
        .find_edge(start, successor)
        .map(|e| raw[e].max_speed)
        .unwrap_or_default();

    let mut path = vec![raw[start].point()];
    let (mut previous, mut current) = (start, successor);

    while !permanent.contains(&current) {
        path.push(raw[current].point());

        let candidate = raw
            .neighbors_directed(current, Direction::Outgoing)
            .find(|&n| n != previous);
        let Some(next) = candidate else {
            return Err(TrackDirectionChange {
                from_node_id: raw[start].id,
                at_node_id: raw[current].id,
            });
        };

        if cfg!(debug_assertions) {
            // Speed is uniform along a chain by construction of the
            // classifier; a violation here means the permanent set upstream
            // is stale.
            if let Some(e) = raw.find_edge(current, next) {
                debug_assert_eq!(raw[e].max_speed.to_bits(), first_hop.to_bits());
            }
        }

        (previous, current) = (current, next);
    }

    path.push(raw[current].point());

    Ok((
        start,
        current,
        SkeletonEdge {
            path,
            max_speed: first_hop,
        },
    ))
}
