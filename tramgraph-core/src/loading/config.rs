use std::path::Path;

use hashbrown::{HashMap, HashSet};
use log::info;
use serde::{Deserialize, Deserializer};

use crate::{Error, NodeId};

/// Per-pair override for the path plausibility ratio, for stop pairs where
/// the network legitimately detours (river crossings, one-way loops).
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct TramStopPairCheck {
    pub source: NodeId,
    pub destination: NodeId,
    pub ratio: f64,
}

/// Static configuration of one city's network build.
///
/// The `custom_stop_mapping` table assigns external schedule stop ids to
/// graph node ids; any node mentioned there acts as a tram stop regardless of
/// how the source data tags it. JSON accepts either a single node id or a
/// list per stop id.
#[derive(Debug, Clone, Deserialize)]
pub struct CityConfiguration {
    pub city: String,
    pub country: String,
    pub osm_area_name: String,
    pub gtfs_url: String,
    #[serde(default)]
    pub ignored_gtfs_lines: Vec<String>,
    #[serde(default)]
    pub ignored_osm_relations: Vec<i64>,
    #[serde(default, deserialize_with = "one_or_many_node_ids")]
    pub custom_stop_mapping: HashMap<String, Vec<NodeId>>,
    pub max_distance_ratio: f64,
    #[serde(default)]
    pub custom_tram_stop_pair_max_distance_checks: Vec<TramStopPairCheck>,
}

impl CityConfiguration {
    /// Loads and validates a configuration file.
    pub fn from_path(path: &Path) -> Result<Self, Error> {
        let raw = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&raw)
            .map_err(|e| Error::InvalidData(format!("invalid configuration {}: {e}", path.display())))?;
        info!(
            "Loaded configuration for {} ({} custom stop mappings)",
            config.city,
            config.custom_stop_mapping.len()
        );
        Ok(config)
    }

    /// All node ids force-typed as tram stops by the mapping table.
    pub fn mapped_stop_node_ids(&self) -> HashSet<NodeId> {
        self.custom_stop_mapping
            .values()
            .flatten()
            .copied()
            .collect()
    }

    /// Plausibility ratio for a stop pair: the per-pair override when one is
    /// configured, the city-wide default otherwise.
    pub fn ratio_for_pair(&self, source: NodeId, destination: NodeId) -> f64 {
        self.custom_tram_stop_pair_max_distance_checks
            .iter()
            .find(|check| check.source == source && check.destination == destination)
            .map_or(self.max_distance_ratio, |check| check.ratio)
    }
}

fn one_or_many_node_ids<'de, D>(deserializer: D) -> Result<HashMap<String, Vec<NodeId>>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(NodeId),
        Many(Vec<NodeId>),
    }

    let raw: HashMap<String, OneOrMany> = HashMap::deserialize(deserializer)?;
    Ok(raw
        .into_iter()
        .map(|(stop_id, ids)| {
            let ids = match ids {
                OneOrMany::One(id) => vec![id],
                OneOrMany::Many(ids) => ids,
            };
            (stop_id, ids)
        })
        .collect())
}
