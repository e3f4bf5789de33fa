use std::hash::{Hash, Hasher};

use geo::Point;
use serde::Serialize;

use crate::NodeId;

/// Semantic role of a node in the tram network, taken from the source
/// `railway` tag. Unrecognized or missing values decode to [`NodeType::Unknown`]
/// rather than failing the build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum NodeType {
    #[serde(rename = "unknown")]
    Unknown,
    #[serde(rename = "tram_stop")]
    TramStop,
    #[serde(rename = "switch")]
    Switch,
    #[serde(rename = "tram_crossing")]
    TramCrossing,
    #[serde(rename = "crossing")]
    Crossing,
    #[serde(rename = "tram_level_crossing")]
    TramLevelCrossing,
    #[serde(rename = "railway_crossing")]
    RailwayCrossing,
    #[serde(rename = "tram_level_crossing;railway_crossing")]
    TramLevelAndRailwayCrossing,
    #[serde(rename = "power_supply")]
    PowerSupply,
    #[serde(rename = "buffer_stop")]
    BufferStop,
    /// Minted during densification, never present in source data.
    #[serde(rename = "interpolated")]
    Interpolated,
}

impl NodeType {
    /// Total decoding of a raw tag value; anything unrecognized is `Unknown`.
    pub fn from_tag(value: Option<&str>) -> Self {
        match value {
            Some("tram_stop") => Self::TramStop,
            Some("switch") => Self::Switch,
            Some("tram_crossing") => Self::TramCrossing,
            Some("crossing") => Self::Crossing,
            Some("tram_level_crossing") => Self::TramLevelCrossing,
            Some("railway_crossing") => Self::RailwayCrossing,
            Some("tram_level_crossing;railway_crossing") => Self::TramLevelAndRailwayCrossing,
            Some("power_supply") => Self::PowerSupply,
            Some("buffer_stop") => Self::BufferStop,
            Some("interpolated") => Self::Interpolated,
            _ => Self::Unknown,
        }
    }
}

/// A point of the tram network.
///
/// Identity and hashing are by `id` alone: the same physical location can be
/// re-derived with slightly different metadata at different construction
/// phases, and all of them must compare equal. Within one graph a node id is
/// unique.
#[derive(Debug, Clone, Serialize)]
pub struct TrackNode {
    pub id: NodeId,
    pub lat: f64,
    pub lon: f64,
    #[serde(rename = "type")]
    pub node_type: NodeType,
    /// Stop name when the source data carries one.
    pub name: Option<String>,
}

impl TrackNode {
    pub(crate) fn interpolated(id: NodeId, lat: f64, lon: f64) -> Self {
        Self {
            id,
            lat,
            lon,
            node_type: NodeType::Interpolated,
            name: None,
        }
    }

    /// Coordinates as a geo point (x = lon, y = lat).
    pub fn point(&self) -> Point<f64> {
        Point::new(self.lon, self.lat)
    }
}

impl PartialEq for TrackNode {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TrackNode {}

impl Hash for TrackNode {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
